//! Fill the data directory with a week of generated daily plans and a
//! weekly schedule, using the local Ollama server.

use dotenv::dotenv;

use planner_backend::ai::LlamaClient;
use planner_backend::config::Config;
use planner_backend::mock_data::{self, DEFAULT_DAYS};
use planner_backend::store::DayStore;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenv().ok();
    env_logger::init();

    let config = Config::from_env();
    let store = DayStore::new(&config.data_dir);
    store.ensure_dirs().await?;

    let model = LlamaClient::from_config(&config);
    log::info!(
        "Generating {} days of plans with {} into {}",
        DEFAULT_DAYS,
        model.model(),
        config.data_dir.display()
    );

    let summary = mock_data::seed(&store, &model, config.today(), DEFAULT_DAYS).await?;

    for date in &summary.written {
        println!("Created entry for {}", date);
    }
    for (date, error) in &summary.failed {
        println!("Skipped {}: {}", date, error);
    }
    if summary.schedule_written {
        println!("Created {}", store.schedule_path().display());
    }
    Ok(())
}
