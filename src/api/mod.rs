mod handlers;
pub mod views;

pub use handlers::{entry_url, error_url};

use axum::{routing::get, Router};
use tokio::net::TcpListener;
use tower::ServiceBuilder;
use tower_http::trace::TraceLayer;

use crate::config::WikiConfig;
use crate::store::EntryStore;

pub fn create_router(store: EntryStore) -> Router {
    Router::new()
        .route("/", get(handlers::index))
        .route("/search/", get(handlers::search_form).post(handlers::search))
        .route("/new/", get(handlers::new_entry_form).post(handlers::create_entry))
        .route(
            "/edit/{entry}",
            get(handlers::edit_entry_form).post(handlers::update_entry),
        )
        .route("/error/{error_message}", get(handlers::show_error))
        .route("/{title}", get(handlers::show_entry))
        .layer(ServiceBuilder::new().layer(TraceLayer::new_for_http()))
        .with_state(store)
}

/// Serve the encyclopedia until Ctrl-C or SIGTERM.
pub async fn serve(config: &WikiConfig, store: EntryStore) -> anyhow::Result<()> {
    let app = create_router(store);

    let listener = TcpListener::bind(config.addr()).await?;
    tracing::info!("Encyclopedia listening on http://{}", config.addr());

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    tracing::info!("Encyclopedia server stopped");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to listen for Ctrl-C: {}", e);
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
                tracing::error!("Failed to listen for SIGTERM: {}", e);
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
}
