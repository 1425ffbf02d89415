use query_router::config::AppConfig;
use query_router::{init_tracing, run};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = AppConfig::load()?;
    init_tracing(&config);

    if let Err(e) = run(config).await {
        tracing::error!(error = %e, "query router stopped");
        return Err(e.into());
    }
    Ok(())
}
