//! Trade API server
//!
//! Binds to loopback only; the board and the API run on the same machine.

use std::net::SocketAddr;

use axum::Router;
use tokio::net::TcpListener;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use crate::routes::create_router;
use crate::AppState;

/// `/health` and `/trades` behind request tracing and open CORS
pub fn create_app(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    create_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
}

/// Bind `127.0.0.1:port` and serve trades until the listener fails
pub async fn start_server(state: AppState, port: u16) -> Result<(), std::io::Error> {
    let addr = SocketAddr::from(([127, 0, 0, 1], port));
    let listener = TcpListener::bind(addr).await?;
    serve(listener, state).await
}

/// Serve on a listener the caller bound, e.g. port 0 in tests
pub async fn serve(listener: TcpListener, state: AppState) -> Result<(), std::io::Error> {
    tracing::info!("Starting trade API on {}", listener.local_addr()?);
    axum::serve(listener, create_app(state)).await
}
