use axum::response::Json;
use tracing::debug;

use crate::error::{Error, Result};
use crate::types::{now_ms, SongReply, SongUpdateRequest, SuccessReply};

impl crate::service::BroadcastService {
    /// Stores the song in the catalog, then restarts playback for `id` at position 0.
    pub async fn handle_set_song(
        &self,
        id: &str,
        req: SongUpdateRequest,
    ) -> Result<Json<SuccessReply>> {
        let song = req
            .song
            .and_then(|payload| payload.into_song(now_ms()))
            .ok_or_else(|| Error::BadRequest("Song data required".to_string()))?;

        let song_id = song.id.clone();
        let duration = song.duration;
        let title = song.title.clone().unwrap_or_default();

        self.catalog.put(song)?;
        self.playback.set_song(id, &song_id, duration)?;
        self.registry.touch(id)?;

        debug!("Updated broadcast {} with song: {} ({})", id, title, song_id);

        Ok(Json(SuccessReply::ok()))
    }

    pub async fn handle_get_song(&self, song_id: &str) -> Result<Json<SongReply>> {
        match self.catalog.get(song_id)? {
            Some(song) => {
                debug!("Fetched song: {}", song_id);
                Ok(Json(SongReply { song }))
            }
            None => {
                debug!("Song not found: {}", song_id);
                Err(Error::NotFound("Song not found"))
            }
        }
    }
}
