use anyhow::{Context, Result};
use registry_double::{DoubleConfig, RegistryDouble};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    dotenv::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config = DoubleConfig::from_env().context("Failed to read registry double configuration")?;
    tracing::info!("Starting registry double with {:?}", config);

    let running = RegistryDouble::from_config(config)
        .start()
        .await
        .context("Failed to start registry double")?;

    println!("Registry double listening on {}", running.url());
    println!("Available endpoints:");
    println!("  POST   /api/v3/registry");
    println!("  PUT    /api/v3/registry");
    println!("  GET    /api/v3/registry/all");
    println!("  GET    /api/v3/registry/serviceId/{{id}}");
    println!("  DELETE /api/v3/registry/serviceId/{{id}}");
    println!("  GET    /api/v3/ping");

    tokio::signal::ctrl_c()
        .await
        .context("Failed to listen for shutdown signal")?;

    tracing::info!("Shutting down registry double");
    running.stop().await.context("Failed to stop registry double")?;

    Ok(())
}
