mod handlers;
mod sweeper;

use std::sync::Arc;
use std::time::Duration;

use axum::body::Bytes;
use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::response::Json;
use axum::routing::{get, post, put};
use axum::Router;
use serde::de::DeserializeOwned;

use self::sweeper::start_sweep_loop;
use crate::error::{Error, Result};
use crate::store::{BroadcastRegistry, PlaybackTracker, SongCatalog};
use crate::types::{
    Broadcast, CreateBroadcastReply, CreateBroadcastRequest, HealthReply, ListBroadcastsReply,
    PlaybackState, SongReply, SongUpdateRequest, StateUpdate, SuccessReply,
};

pub type SharedService = Arc<BroadcastService>;

pub struct BroadcastService {
    registry: Arc<BroadcastRegistry>,
    playback: Arc<PlaybackTracker>,
    catalog: Arc<SongCatalog>,
}

impl BroadcastService {
    pub fn new(sweep_interval: Duration, inactive_threshold: Duration) -> Self {
        let service = Self::with_empty_stores();

        start_sweep_loop(
            Arc::clone(&service.registry),
            Arc::clone(&service.playback),
            sweep_interval,
            inactive_threshold,
        );

        service
    }

    /// A service with no sweep task attached.
    pub fn with_empty_stores() -> Self {
        Self {
            registry: Arc::new(BroadcastRegistry::new()),
            playback: Arc::new(PlaybackTracker::new()),
            catalog: Arc::new(SongCatalog::new()),
        }
    }
}

pub fn router(service: SharedService) -> Router {
    Router::new()
        .route("/", get(health))
        .route("/api/broadcasts", get(list_broadcasts))
        .route("/api/broadcast/create", post(create_broadcast))
        .route("/api/broadcast/song/{song_id}", get(get_song))
        .route(
            "/api/broadcast/{id}",
            get(get_broadcast).delete(stop_broadcast),
        )
        .route("/api/broadcast/{id}/state", get(get_state).put(update_state))
        .route("/api/broadcast/{id}/song", put(set_song))
        .with_state(service)
}

fn json_body<T>(payload: std::result::Result<Json<T>, JsonRejection>) -> Result<T> {
    payload
        .map(|Json(body)| body)
        .map_err(|rejection| Error::BadRequest(rejection.body_text()))
}

/// An empty body reads as `T::default()`, every field omitted.
fn json_body_or_default<T: DeserializeOwned + Default>(body: &[u8]) -> Result<T> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Ok(T::default());
    }
    serde_json::from_slice(body).map_err(|err| Error::BadRequest(err.to_string()))
}

async fn health(State(service): State<SharedService>) -> Result<Json<HealthReply>> {
    service.handle_health().await
}

async fn list_broadcasts(
    State(service): State<SharedService>,
) -> Result<Json<ListBroadcastsReply>> {
    service.handle_list_broadcasts().await
}

async fn create_broadcast(
    State(service): State<SharedService>,
    payload: std::result::Result<Json<CreateBroadcastRequest>, JsonRejection>,
) -> Result<Json<CreateBroadcastReply>> {
    service.handle_create_broadcast(json_body(payload)?).await
}

async fn get_broadcast(
    State(service): State<SharedService>,
    Path(id): Path<String>,
) -> Result<Json<Broadcast>> {
    service.handle_get_broadcast(&id).await
}

async fn stop_broadcast(
    State(service): State<SharedService>,
    Path(id): Path<String>,
) -> Result<Json<SuccessReply>> {
    service.handle_stop_broadcast(&id).await
}

async fn get_state(
    State(service): State<SharedService>,
    Path(id): Path<String>,
) -> Result<Json<PlaybackState>> {
    service.handle_get_state(&id).await
}

async fn update_state(
    State(service): State<SharedService>,
    Path(id): Path<String>,
    body: Bytes,
) -> Result<Json<SuccessReply>> {
    let update: StateUpdate = json_body_or_default(&body)?;
    service.handle_update_state(&id, update).await
}

async fn set_song(
    State(service): State<SharedService>,
    Path(id): Path<String>,
    payload: std::result::Result<Json<SongUpdateRequest>, JsonRejection>,
) -> Result<Json<SuccessReply>> {
    service.handle_set_song(&id, json_body(payload)?).await
}

async fn get_song(
    State(service): State<SharedService>,
    Path(song_id): Path<String>,
) -> Result<Json<SongReply>> {
    service.handle_get_song(&song_id).await
}
