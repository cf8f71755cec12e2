use axum::response::Json;
use tracing::{debug, info};

use crate::error::Result;
use crate::types::SuccessReply;

impl crate::service::BroadcastService {
    /// Removes the registry entry and its playback state. Unknown ids succeed.
    pub async fn handle_stop_broadcast(&self, id: &str) -> Result<Json<SuccessReply>> {
        let existed = self.registry.delete(id)?;
        self.playback.clear(id)?;

        if existed {
            info!("Stopped broadcast: {}", id);
        } else {
            debug!("Stop requested for unknown broadcast: {}", id);
        }

        Ok(Json(SuccessReply::ok()))
    }
}
