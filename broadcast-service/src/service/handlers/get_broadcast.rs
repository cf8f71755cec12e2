use axum::response::Json;
use tracing::debug;

use crate::error::{Error, Result};
use crate::types::Broadcast;

impl crate::service::BroadcastService {
    pub async fn handle_get_broadcast(&self, id: &str) -> Result<Json<Broadcast>> {
        match self.registry.get(id)? {
            Some(broadcast) => {
                debug!("Fetched broadcast info: {}", id);
                Ok(Json(broadcast))
            }
            None => {
                debug!("Broadcast not found: {}", id);
                Err(Error::NotFound("Broadcast not found"))
            }
        }
    }
}
