use axum::response::Json;
use time::format_description::well_known::Rfc3339;
use time::OffsetDateTime;

use crate::error::Result;
use crate::types::HealthReply;

impl crate::service::BroadcastService {
    pub async fn handle_health(&self) -> Result<Json<HealthReply>> {
        Ok(Json(HealthReply {
            message: "Broadcast Relay Server".to_string(),
            status: "running".to_string(),
            time: OffsetDateTime::now_utc().format(&Rfc3339)?,
            active_broadcasts: self.registry.len()?,
            version: env!("CARGO_PKG_VERSION").to_string(),
        }))
    }
}
