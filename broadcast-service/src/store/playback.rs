use std::collections::HashMap;
use std::sync::Mutex;

use crate::error::{Error, Result};
use crate::types::{now_ms, PlaybackState, StateUpdate};

/// Latest playback snapshot per broadcast key. Entries may exist without a
/// matching registry entry.
#[derive(Debug, Default)]
pub struct PlaybackTracker {
    states: Mutex<HashMap<String, PlaybackState>>,
}

impl PlaybackTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// A new song is a discontinuity: every mutable field is replaced.
    pub fn set_song(
        &self,
        key: &str,
        song_id: &str,
        duration: Option<f64>,
    ) -> Result<PlaybackState> {
        let state = PlaybackState {
            current_song: Some(song_id.to_string()),
            position: 0.0,
            is_playing: true,
            duration: duration.unwrap_or(0.0),
            last_updated: now_ms(),
            is_active: true,
        };

        let mut states = self.states.lock().map_err(|_| Error::Lock)?;
        states.insert(key.to_string(), state.clone());
        Ok(state)
    }

    /// Merges a position tick onto the existing state, creating one if absent.
    /// `currentSong` and `duration` are never touched here.
    pub fn update_state(&self, key: &str, update: &StateUpdate) -> Result<PlaybackState> {
        let mut states = self.states.lock().map_err(|_| Error::Lock)?;
        let state = states.entry(key.to_string()).or_default();

        state.position = update.position.unwrap_or(0.0);
        state.is_playing = update.is_playing.unwrap_or(false);
        state.last_updated = update
            .last_updated
            .filter(|ts| ts.is_finite() && *ts > 0.0)
            .map(|ts| ts as u64)
            .unwrap_or_else(now_ms);
        state.is_active = true;

        Ok(state.clone())
    }

    pub fn get_state(&self, key: &str) -> Result<Option<PlaybackState>> {
        let states = self.states.lock().map_err(|_| Error::Lock)?;
        Ok(states.get(key).cloned())
    }

    pub fn clear(&self, key: &str) -> Result<()> {
        let mut states = self.states.lock().map_err(|_| Error::Lock)?;
        states.remove(key);
        Ok(())
    }

    /// Removes several keys under a single lock.
    pub fn clear_many(&self, keys: &[String]) -> Result<()> {
        if keys.is_empty() {
            return Ok(());
        }
        let mut states = self.states.lock().map_err(|_| Error::Lock)?;
        for key in keys {
            states.remove(key);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_song_resets_playback() {
        let tracker = PlaybackTracker::new();
        tracker
            .update_state(
                "k1",
                &StateUpdate {
                    position: Some(97.0),
                    is_playing: Some(false),
                    last_updated: Some(5.0),
                },
            )
            .unwrap();

        tracker.set_song("k1", "song-2", Some(180.0)).unwrap();

        let state = tracker.get_state("k1").unwrap().unwrap();
        assert_eq!(state.current_song.as_deref(), Some("song-2"));
        assert_eq!(state.position, 0.0);
        assert!(state.is_playing);
        assert_eq!(state.duration, 180.0);
        assert!(state.is_active);
        assert!(state.last_updated > 5);
    }

    #[test]
    fn test_set_song_without_duration() {
        let tracker = PlaybackTracker::new();
        let state = tracker.set_song("k1", "song-1", None).unwrap();
        assert_eq!(state.duration, 0.0);
    }

    #[test]
    fn test_update_state_preserves_song() {
        let tracker = PlaybackTracker::new();
        tracker.set_song("k1", "song-1", Some(200.0)).unwrap();

        let update = StateUpdate {
            position: Some(42.0),
            ..Default::default()
        };
        let state = tracker.update_state("k1", &update).unwrap();

        assert_eq!(state.current_song.as_deref(), Some("song-1"));
        assert_eq!(state.duration, 200.0);
        assert_eq!(state.position, 42.0);
        assert!(!state.is_playing, "omitted isPlaying defaults to false");
    }

    #[test]
    fn test_update_state_creates_missing_entry() {
        let tracker = PlaybackTracker::new();
        let state = tracker
            .update_state("new", &StateUpdate::default())
            .unwrap();

        assert_eq!(state.current_song, None);
        assert_eq!(state.position, 0.0);
        assert!(!state.is_playing);
        assert!(state.is_active);
        assert!(tracker.get_state("new").unwrap().is_some());
    }

    #[test]
    fn test_update_state_keeps_client_timestamp() {
        let tracker = PlaybackTracker::new();
        let update = StateUpdate {
            position: Some(3.5),
            is_playing: Some(true),
            last_updated: Some(1_700_000_000_000.0),
        };
        let state = tracker.update_state("k1", &update).unwrap();

        assert_eq!(state.last_updated, 1_700_000_000_000);
        assert!(state.is_playing);
    }

    #[test]
    fn test_update_state_truncates_fractional_timestamp() {
        let tracker = PlaybackTracker::new();
        let update = StateUpdate {
            last_updated: Some(1_700_000_000_000.5),
            ..Default::default()
        };
        let state = tracker.update_state("k1", &update).unwrap();

        assert_eq!(state.last_updated, 1_700_000_000_000);
    }

    #[test]
    fn test_update_state_zero_timestamp_means_now() {
        let tracker = PlaybackTracker::new();
        let before = now_ms();
        let update = StateUpdate {
            last_updated: Some(0.0),
            ..Default::default()
        };
        let state = tracker.update_state("k1", &update).unwrap();

        assert!(state.last_updated >= before);
    }

    #[test]
    fn test_clear_and_clear_many() {
        let tracker = PlaybackTracker::new();
        tracker.set_song("a", "s", None).unwrap();
        tracker.set_song("b", "s", None).unwrap();
        tracker.set_song("c", "s", None).unwrap();

        tracker.clear("a").unwrap();
        tracker.clear("a").unwrap();
        tracker
            .clear_many(&["b".to_string(), "missing".to_string()])
            .unwrap();

        assert!(tracker.get_state("a").unwrap().is_none());
        assert!(tracker.get_state("b").unwrap().is_none());
        assert!(tracker.get_state("c").unwrap().is_some());
    }
}
