use axum::response::Json;
use tracing::info;

use crate::error::{Error, Result};
use crate::types::{CreateBroadcastReply, CreateBroadcastRequest};

impl crate::service::BroadcastService {
    pub async fn handle_create_broadcast(
        &self,
        req: CreateBroadcastRequest,
    ) -> Result<Json<CreateBroadcastReply>> {
        let key = req
            .key()
            .ok_or_else(|| Error::BadRequest("Broadcast id required".to_string()))?;

        let broadcast = self
            .registry
            .create(key, req.name.as_deref(), req.host_name.as_deref())?;

        info!("Started broadcast: {} by {}", broadcast.id, broadcast.host_name);

        Ok(Json(CreateBroadcastReply {
            success: true,
            broadcast,
        }))
    }
}
