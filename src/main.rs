use facial_analysis_api::{config::Configuration, error::AppError, network::Server};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

fn init_logging(configuration: &Configuration) {
    // RUST_LOG wins over the configured filter.
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&configuration.log_filter));

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .init();
}

#[tokio::main]
async fn main() -> Result<(), AppError> {
    let configuration = Configuration::from_env()?;
    init_logging(&configuration);
    tracing::debug!(?configuration, "Loaded configuration");

    Server::new(configuration).start().await
}
