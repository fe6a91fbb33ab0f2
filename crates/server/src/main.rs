use axum::extract::DefaultBodyLimit;
use axum::middleware;
use tokio::net::TcpListener;
use tower_http::request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer};
use tower_http::trace::TraceLayer;

use server::auth::middleware::auth_middleware;
use server::{config, db, health, openapi, telemetry};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let _ = dotenvy::dotenv();
    telemetry::init_tracing();

    let app_config = config::load_config();
    health::record_start_time();

    let tracer_provider = if app_config.features.telemetry {
        telemetry::init_telemetry()?
    } else {
        None
    };

    let pool = db::create_pool()?;
    db::run_migrations(&pool).await?;
    tracing::info!("Database migrations applied");

    let mut app = openapi::app_router(pool);
    if tracer_provider.is_some() {
        app = app.layer(telemetry::OtelTraceLayer);
    }
    // Layers run outermost-last: request id, tracing, auth, body limit.
    let app = app
        .layer(DefaultBodyLimit::max(config::max_body_bytes()))
        .layer(middleware::from_fn(auth_middleware))
        .layer(TraceLayer::new_for_http())
        .layer(PropagateRequestIdLayer::x_request_id())
        .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid));

    let addr = config::bind_addr()?;
    let listener = TcpListener::bind(addr).await?;
    tracing::info!(%addr, "To-do API listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    if let Some(provider) = tracer_provider {
        if let Err(e) = provider.shutdown() {
            tracing::warn!(error = %e, "Failed to flush telemetry");
        }
    }
    tracing::info!("To-do API stopped");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to install Ctrl+C handler");
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to install SIGTERM handler");
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
    tracing::info!("Shutdown signal received");
}
