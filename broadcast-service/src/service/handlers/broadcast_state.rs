use axum::response::Json;
use tracing::debug;

use crate::error::{Error, Result};
use crate::types::{PlaybackState, StateUpdate, SuccessReply};

impl crate::service::BroadcastService {
    pub async fn handle_get_state(&self, id: &str) -> Result<Json<PlaybackState>> {
        match self.playback.get_state(id)? {
            Some(state) => {
                debug!("Fetched broadcast state: {}", id);
                Ok(Json(state))
            }
            None => {
                debug!("Broadcast state not found: {}", id);
                Err(Error::NotFound("Broadcast state not found"))
            }
        }
    }

    /// Position ticks merge onto the current state; the broadcast id need not be registered.
    pub async fn handle_update_state(
        &self,
        id: &str,
        update: StateUpdate,
    ) -> Result<Json<SuccessReply>> {
        if update.position.is_some_and(|position| position < 0.0) {
            return Err(Error::BadRequest("Position must be non-negative".to_string()));
        }

        let state = self.playback.update_state(id, &update)?;
        self.registry.touch(id)?;

        debug!(
            "Updated broadcast state {}: position={}s, playing={}",
            id, state.position, state.is_playing
        );

        Ok(Json(SuccessReply::ok()))
    }
}
