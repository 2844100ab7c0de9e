use std::net::SocketAddr;
use std::sync::Arc;

use axum::routing::get;
use axum::Router;

pub mod handlers;
pub mod render;

pub use handlers::AppState;

pub fn create_app(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::index).post(handlers::index_submit))
        .route("/search", get(handlers::search))
        .route("/summarize", get(handlers::summarize))
        .with_state(Arc::new(state))
}

pub async fn serve(state: AppState, port: u16) -> Result<(), std::io::Error> {
    let app = create_app(state);
    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    tracing::info!("listening on http://{addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await
}
