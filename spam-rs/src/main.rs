use spam_rs::config::Config;
use spam_rs::logging;
use spam_rs::pipeline::TrainedPipeline;
use spam_rs::shell::Shell;
use spam_rs::web::WebServer;
use std::sync::Arc;
use tracing::{error, info};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load configuration
    let config_path =
        std::env::var("SPAM_RS_CONFIG").unwrap_or_else(|_| "config.toml".to_string());
    let config = Config::load_or_default(&config_path)?;

    // Initialize logging
    logging::init(&config.logging)?;

    info!("Starting spam-rs");
    info!("  Dataset: {}", config.dataset.path.display());
    info!("  Listening on: {}", config.server.listen_addr);

    // Train once before serving anything
    let pipeline = match TrainedPipeline::build(&config.dataset, &config.model) {
        Ok(pipeline) => Arc::new(pipeline),
        Err(e) => {
            error!("Failed to build classifier: {}", e);
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    };

    let shell = Shell::new(pipeline, config.dataset.preview_rows);
    let server = WebServer::new(shell, config.server.listen_addr.clone());
    server.run().await?;

    Ok(())
}
