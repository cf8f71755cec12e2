use axum::response::Json;

use crate::error::Result;
use crate::types::ListBroadcastsReply;

impl crate::service::BroadcastService {
    pub async fn handle_list_broadcasts(&self) -> Result<Json<ListBroadcastsReply>> {
        let broadcasts = self.registry.list_active()?;
        Ok(Json(ListBroadcastsReply { broadcasts }))
    }
}
