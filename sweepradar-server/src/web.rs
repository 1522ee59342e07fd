//! HTTP API
//!
//! | Route                  | Body                                  |
//! |------------------------|---------------------------------------|
//! | `GET /api/blips`       | latest [`BlipSnapshot`]               |
//! | `GET /api/blips/{id}`  | one [`BlipView`], 404 when not active |
//! | `GET /api/sensor`      | validated [`SensorConfig`]            |
//! | `GET /api/summary`     | blip counts per state and beam angle  |

use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use std::collections::HashMap;
use std::net::{Ipv4Addr, SocketAddr};
use std::sync::Arc;
use tokio::net::TcpListener;
use tokio_graceful_shutdown::SubsystemHandle;

use sweepradar_core::{BlipSnapshot, BlipView, SensorConfig, SnapshotHandle, TargetId};

/// Shared state for all handlers
#[derive(Clone)]
pub struct AppState {
    pub blips: SnapshotHandle,
    pub sensor: Arc<SensorConfig>,
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/api/blips", get(get_blips))
        .route("/api/blips/{id}", get(get_blip))
        .route("/api/sensor", get(get_sensor))
        .route("/api/summary", get(get_summary))
        .with_state(state)
}

async fn get_blips(State(state): State<AppState>) -> Json<BlipSnapshot> {
    Json(state.blips.load().as_ref().clone())
}

async fn get_blip(
    State(state): State<AppState>,
    Path(id): Path<u32>,
) -> Result<Json<BlipView>, StatusCode> {
    state
        .blips
        .load()
        .get(TargetId(id))
        .cloned()
        .map(Json)
        .ok_or(StatusCode::NOT_FOUND)
}

async fn get_sensor(State(state): State<AppState>) -> Json<SensorConfig> {
    Json(state.sensor.as_ref().clone())
}

async fn get_summary(State(state): State<AppState>) -> Json<HashMap<String, serde_json::Value>> {
    Json(state.blips.load().to_summary_map())
}

/// Serve the API until shutdown is requested
pub async fn serve(state: AppState, port: u16, subsys: SubsystemHandle) -> anyhow::Result<()> {
    let addr = SocketAddr::from((Ipv4Addr::UNSPECIFIED, port));
    let listener = TcpListener::bind(addr).await?;
    log::info!("Listening on http://{}", listener.local_addr()?);

    axum::serve(listener, router(state))
        .with_graceful_shutdown(async move { subsys.on_shutdown_requested().await })
        .await?;

    log::debug!("Webserver stopped");
    Ok(())
}
