//! HTTP liveness listener
//!
//! Hosting platforms ping this endpoint to keep the process alive. It knows nothing
//! about the bot or the store; it only proves the process is running.

use axum::{extract::State, http::StatusCode, response::IntoResponse, routing::get, Router};
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tokio::net::TcpListener;
use tokio::time::Instant;

use crate::core::error::AppResult;

/// Application state for the liveness server
#[derive(Clone)]
struct AppState {
    start_time: Instant,
}

/// Builds the liveness router.
///
/// Both `/` and `/health` answer `200 OK` with a JSON status body.
pub fn router() -> Router {
    let state = AppState {
        start_time: Instant::now(),
    };

    Router::new()
        .route("/", get(health_handler))
        .route("/health", get(health_handler))
        .with_state(Arc::new(state))
}

/// Start the liveness HTTP server
///
/// # Arguments
/// * `port` - Port to listen on (PORT env var, default 3000)
///
/// # Errors
/// Returns [`crate::AppError::Io`] when the port cannot be bound or serving fails.
pub async fn start_health_server(port: u16) -> AppResult<()> {
    let addr = SocketAddr::from(([0, 0, 0, 0], port));

    let listener = TcpListener::bind(&addr).await?;
    log::info!("Server is running on port {}", port);
    log::info!("  /health - Liveness check");

    axum::serve(listener, router()).await?;
    Ok(())
}

async fn health_handler(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let uptime = state.start_time.elapsed();

    let health_status = serde_json::json!({
        "status": "ok",
        "service": "regbot",
        "version": env!("CARGO_PKG_VERSION"),
        "uptime_seconds": uptime.as_secs(),
        "uptime_human": format_duration(uptime),
    });

    (StatusCode::OK, axum::Json(health_status))
}

/// Uptime as hours, minutes and seconds; hours are not folded into days.
fn format_duration(duration: Duration) -> String {
    let total_secs = duration.as_secs();
    let (hours, minutes, seconds) = (total_secs / 3600, (total_secs % 3600) / 60, total_secs % 60);

    match (hours, minutes) {
        (0, 0) => format!("{}s", seconds),
        (0, _) => format!("{}m {:02}s", minutes, seconds),
        _ => format!("{}h {:02}m {:02}s", hours, minutes, seconds),
    }
}
