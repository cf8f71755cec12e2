mod broadcast_song;
mod broadcast_state;
mod create_broadcast;
mod get_broadcast;
mod health;
mod list_broadcasts;
mod stop_broadcast;

#[cfg(test)]
pub(crate) mod test_support {
    use crate::service::BroadcastService;
    use crate::types::{SongPayload, SongUpdateRequest};

    pub fn service() -> BroadcastService {
        BroadcastService::with_empty_stores()
    }

    pub fn song_request(id: Option<&str>, title: &str, duration: Option<f64>) -> SongUpdateRequest {
        SongUpdateRequest {
            song: Some(SongPayload {
                id: id.map(str::to_string),
                title: Some(title.to_string()),
                artist: Some("The Testers".to_string()),
                duration,
                ..Default::default()
            }),
        }
    }
}
