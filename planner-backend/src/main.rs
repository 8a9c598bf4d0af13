use actix_cors::Cors;
use actix_web::{middleware::Logger, web, App, HttpServer};
use dotenv::dotenv;
use std::sync::Arc;

use planner_backend::config::Config;
use planner_backend::controllers;
use planner_backend::store::DayStore;
use planner_backend::AppState;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    dotenv().ok();
    env_logger::init();

    let config = Config::from_env();

    log::info!("Using data directory {}", config.data_dir.display());
    let store = Arc::new(DayStore::new(&config.data_dir));
    store.ensure_dirs().await?;

    let bind_address = config.bind_address.clone();
    let port = config.port;
    log::info!("Starting planner server on {}:{}", bind_address, port);

    HttpServer::new(move || {
        let cors = Cors::default()
            .allow_any_origin()
            .allow_any_method()
            .allow_any_header()
            .max_age(3600);

        App::new()
            .app_data(web::Data::new(AppState {
                store: Arc::clone(&store),
            }))
            .wrap(Logger::default())
            .wrap(cors)
            .configure(controllers::configure)
    })
    .bind((bind_address.as_str(), port))?
    .run()
    .await
}
