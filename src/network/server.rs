use axum::{extract::DefaultBodyLimit, http::HeaderValue, routing::post, Router};
use tokio::net::TcpListener;
use tower_http::{
    cors::{AllowOrigin, Any, CorsLayer},
    trace::TraceLayer,
};
use tracing::{error, info, warn};

use crate::{
    analysis::FacialAnalysisService,
    config::Configuration,
    error::AppError,
    network::routes::{facial_analysis_handler, FACIAL_ANALYSIS_PATH},
};

pub struct Server {
    configuration: Configuration,
}

impl Server {
    pub fn new(configuration: Configuration) -> Self {
        Self { configuration }
    }

    pub fn router(&self) -> Router {
        build_router(&self.configuration)
    }

    /// Serves until Ctrl-C or SIGTERM, then drains in-flight requests.
    pub async fn start(self) -> Result<(), AppError> {
        let address = self.configuration.bind_address();
        info!("Starting facial analysis server on {}", address);
        let listener = TcpListener::bind(&address)
            .await
            .map_err(|e| AppError::Bind(e, address.clone()))?;

        if let Ok(local_addr) = listener.local_addr() {
            info!(%local_addr, path = FACIAL_ANALYSIS_PATH, "server listening");
        }

        axum::serve(listener, self.router())
            .with_graceful_shutdown(shutdown_signal())
            .await
            .map_err(AppError::Serve)?;

        info!("Server stopped");
        Ok(())
    }
}

pub fn build_router(configuration: &Configuration) -> Router {
    let service = FacialAnalysisService::from_configuration(configuration);

    Router::new()
        .route(FACIAL_ANALYSIS_PATH, post(facial_analysis_handler))
        .with_state(service)
        .layer(DefaultBodyLimit::max(configuration.max_body_bytes))
        .layer(cors_layer(&configuration.allowed_origins))
        .layer(TraceLayer::new_for_http())
}

fn cors_layer(allowed_origins: &[String]) -> CorsLayer {
    let cors = CorsLayer::new().allow_methods(Any).allow_headers(Any);
    if allowed_origins.is_empty() {
        return cors.allow_origin(Any);
    }

    let origins: Vec<HeaderValue> = allowed_origins
        .iter()
        .filter_map(|origin| match HeaderValue::from_str(origin) {
            Ok(value) => Some(value),
            Err(_) => {
                warn!(%origin, "Ignoring invalid CORS origin");
                None
            }
        })
        .collect();
    cors.allow_origin(AllowOrigin::list(origins))
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            error!("Failed to listen for Ctrl-C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                error!("Failed to listen for SIGTERM: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
    info!("Shutdown signal received");
}
