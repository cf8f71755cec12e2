use std::collections::HashMap;
use std::sync::Mutex;

use crate::error::{Error, Result};
use crate::types::Song;

/// Song payloads by id, shared across all broadcasts. Never swept.
#[derive(Debug, Default)]
pub struct SongCatalog {
    songs: Mutex<HashMap<String, Song>>,
}

impl SongCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn put(&self, song: Song) -> Result<()> {
        if song.id.is_empty() {
            return Err(Error::BadRequest("Song data required".to_string()));
        }
        let mut songs = self.songs.lock().map_err(|_| Error::Lock)?;
        songs.insert(song.id.clone(), song);
        Ok(())
    }

    pub fn get(&self, id: &str) -> Result<Option<Song>> {
        let songs = self.songs.lock().map_err(|_| Error::Lock)?;
        Ok(songs.get(id).cloned())
    }

    #[cfg(test)]
    pub fn len(&self) -> Result<usize> {
        let songs = self.songs.lock().map_err(|_| Error::Lock)?;
        Ok(songs.len())
    }
}
