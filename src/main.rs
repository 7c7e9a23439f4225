use page_data_architecture::config::AppConfig;
use page_data_architecture::seed;
use page_data_architecture::store::{FileStore, MemoryStore, Store};
use std::sync::Arc;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables from .env file if it exists
    dotenvy::dotenv().ok();

    use env_logger::Builder;
    use log::LevelFilter;

    Builder::new()
        .filter_level(LevelFilter::Info)
        .parse_default_env()
        .init();

    println!("Page Data Architecture document server");

    // Load configuration
    let config = AppConfig::load()?;
    println!(
        "Configuration loaded: server={}:{}",
        config.server.host, config.server.port
    );

    match config.data_dir() {
        Some(data_dir) => {
            println!("Storing documents in {}", data_dir);
            let store = Arc::new(FileStore::open(&data_dir).await?);
            run(store, &config).await
        }
        None => {
            println!("Storing documents in memory");
            run(Arc::new(MemoryStore::new()), &config).await
        }
    }
}

async fn run<S: Store + 'static>(store: Arc<S>, config: &AppConfig) -> anyhow::Result<()> {
    // Load seed data for demonstration (optional)
    if std::env::var("LOAD_SEED_DATA").unwrap_or_default() == "true" {
        println!("Loading seed data...");
        let id = seed::load_seed_data(&*store).await?;
        println!("Seed document available at /documents/{}", id);
    }

    println!("Server running on http://{}", config.server_address());
    page_data_architecture::serve(store, config).await
}
