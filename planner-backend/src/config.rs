use chrono::NaiveDate;
use std::env;
use std::path::PathBuf;
use std::str::FromStr;

pub const DEFAULT_PORT: u16 = 8000;
pub const DEFAULT_BIND_ADDRESS: &str = "127.0.0.1";
pub const DEFAULT_DATA_DIR: &str = "data";
pub const DEFAULT_OLLAMA_ENDPOINT: &str = "http://localhost:11434/api/chat";
pub const DEFAULT_OLLAMA_GENERATE_ENDPOINT: &str = "http://localhost:11434/api/generate";
pub const DEFAULT_OLLAMA_MODEL: &str = "llama3.1:8b";
const CHAT_LOG_FILE: &str = "chat.log";

#[derive(Clone, Debug)]
pub struct Config {
    pub port: u16,
    pub bind_address: String,
    /// Root holding `days/` and `schedule.txt`
    pub data_dir: PathBuf,
    pub ollama_endpoint: String,
    pub ollama_generate_endpoint: String,
    pub ollama_model: String,
    /// Unset means the model call may block indefinitely
    pub ollama_timeout_secs: Option<u64>,
    pub chat_log_path: PathBuf,
    /// Pins "today" for the chat context; local date when unset
    pub current_date: Option<NaiveDate>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            port: DEFAULT_PORT,
            bind_address: DEFAULT_BIND_ADDRESS.to_string(),
            data_dir: PathBuf::from(DEFAULT_DATA_DIR),
            ollama_endpoint: DEFAULT_OLLAMA_ENDPOINT.to_string(),
            ollama_generate_endpoint: DEFAULT_OLLAMA_GENERATE_ENDPOINT.to_string(),
            ollama_model: DEFAULT_OLLAMA_MODEL.to_string(),
            ollama_timeout_secs: None,
            chat_log_path: PathBuf::from(DEFAULT_DATA_DIR).join(CHAT_LOG_FILE),
            current_date: None,
        }
    }
}

impl Config {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build a config from any key lookup (the process environment in production).
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        let data_dir = lookup("PLANNER_DATA_DIR")
            .map(PathBuf::from)
            .unwrap_or(defaults.data_dir);
        let chat_log_path = lookup("CHAT_LOG_PATH")
            .map(PathBuf::from)
            .unwrap_or_else(|| data_dir.join(CHAT_LOG_FILE));

        Self {
            port: parsed(&lookup, "PORT").unwrap_or(defaults.port),
            bind_address: lookup("BIND_ADDRESS").unwrap_or(defaults.bind_address),
            data_dir,
            ollama_endpoint: lookup("OLLAMA_ENDPOINT").unwrap_or(defaults.ollama_endpoint),
            ollama_generate_endpoint: lookup("OLLAMA_GENERATE_ENDPOINT")
                .unwrap_or(defaults.ollama_generate_endpoint),
            ollama_model: lookup("OLLAMA_MODEL").unwrap_or(defaults.ollama_model),
            ollama_timeout_secs: parsed(&lookup, "OLLAMA_TIMEOUT_SECS"),
            chat_log_path,
            current_date: lookup("PLANNER_CURRENT_DATE").and_then(|raw| {
                NaiveDate::parse_from_str(&raw, "%Y-%m-%d")
                    .map_err(|_| {
                        log::warn!("Ignoring PLANNER_CURRENT_DATE={}: expected YYYY-MM-DD", raw)
                    })
                    .ok()
            }),
        }
    }

    /// The date treated as "today" by the chat context and the calendar
    pub fn today(&self) -> NaiveDate {
        self.current_date
            .unwrap_or_else(|| chrono::Local::now().date_naive())
    }
}

fn parsed<F, T>(lookup: &F, key: &str) -> Option<T>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
{
    let raw = lookup(key)?;
    match raw.trim().parse() {
        Ok(value) => Some(value),
        Err(_) => {
            log::warn!("Ignoring {}={}: not a valid number", key, raw);
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = Config::from_lookup(lookup_from(&[]));
        assert_eq!(config.port, 8000);
        assert_eq!(config.data_dir, PathBuf::from("data"));
        assert_eq!(config.chat_log_path, PathBuf::from("data/chat.log"));
        assert_eq!(config.ollama_model, "llama3.1:8b");
        assert!(config.ollama_timeout_secs.is_none());
        assert!(config.current_date.is_none());
    }

    #[test]
    fn test_overrides() {
        let config = Config::from_lookup(lookup_from(&[
            ("PORT", "9100"),
            ("PLANNER_DATA_DIR", "/tmp/planner"),
            ("OLLAMA_TIMEOUT_SECS", "30"),
            ("PLANNER_CURRENT_DATE", "2025-04-20"),
        ]));
        assert_eq!(config.port, 9100);
        assert_eq!(config.chat_log_path, PathBuf::from("/tmp/planner/chat.log"));
        assert_eq!(config.ollama_timeout_secs, Some(30));
        assert_eq!(config.today(), NaiveDate::from_ymd_opt(2025, 4, 20).unwrap());
    }

    #[test]
    fn test_bad_values_fall_back() {
        let config = Config::from_lookup(lookup_from(&[
            ("PORT", "eighty"),
            ("PLANNER_CURRENT_DATE", "20/04/2025"),
        ]));
        assert_eq!(config.port, DEFAULT_PORT);
        assert!(config.current_date.is_none());
    }
}
