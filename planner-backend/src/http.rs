use once_cell::sync::Lazy;
use reqwest::Client;
use std::time::Duration;

/// Global shared HTTP client singleton.
///
/// No overall request timeout is set: a model call waits as long as the
/// model server takes. Callers that want a bound set one per request via
/// `.timeout()`.
static SHARED_CLIENT: Lazy<Client> = Lazy::new(|| {
    Client::builder()
        .pool_max_idle_per_host(5)
        .pool_idle_timeout(Duration::from_secs(90))
        .build()
        .expect("Failed to create shared HTTP client")
});

/// Returns a reference to the global shared HTTP client.
pub fn shared_client() -> &'static Client {
    &SHARED_CLIENT
}
