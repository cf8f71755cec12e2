use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Milliseconds since the Unix epoch.
pub fn now_ms() -> u64 {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .unwrap_or_default()
        .as_millis() as u64
}

/// A live session registered by a host under a client-chosen key.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Broadcast {
    pub id: String,
    pub name: String,
    pub host_name: String,
    pub is_active: bool,
    pub last_activity: u64,
}

/// Latest reported playback snapshot for one broadcast key.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlaybackState {
    /// Weak reference into the song catalog.
    pub current_song: Option<String>,
    pub position: f64,
    pub is_playing: bool,
    pub duration: f64,
    pub last_updated: u64,
    pub is_active: bool,
}

impl Default for PlaybackState {
    fn default() -> Self {
        Self {
            current_song: None,
            position: 0.0,
            is_playing: false,
            duration: 0.0,
            last_updated: now_ms(),
            is_active: true,
        }
    }
}

/// Song payload as pushed by a host. Fields this service does not know about
/// are kept in `extra` and handed back to viewers untouched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Song {
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub artist: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lyrics: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub waveform: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration: Option<f64>,
    /// Ingestion time, set by the server.
    pub timestamp: u64,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateBroadcastRequest {
    pub id: Option<String>,
    #[serde(alias = "broadcastName")]
    pub name: Option<String>,
    pub host_name: Option<String>,
}

impl CreateBroadcastRequest {
    /// The registry key: `id`, falling back to `name`. Empty strings don't count.
    pub fn key(&self) -> Option<&str> {
        self.id
            .as_deref()
            .filter(|id| !id.is_empty())
            .or_else(|| self.name.as_deref().filter(|name| !name.is_empty()))
    }
}

#[derive(Debug, Default, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StateUpdate {
    pub position: Option<f64>,
    pub is_playing: Option<bool>,
    /// Client clock in epoch ms; fractions are truncated, zero means "now".
    pub last_updated: Option<f64>,
}

#[derive(Debug, Default, Deserialize)]
pub struct SongUpdateRequest {
    pub song: Option<SongPayload>,
}

#[derive(Debug, Default, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SongPayload {
    pub id: Option<String>,
    pub title: Option<String>,
    pub artist: Option<String>,
    pub lyrics: Option<String>,
    pub waveform: Option<Value>,
    pub duration: Option<f64>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl SongPayload {
    /// Stamps the payload with its ingestion time. Returns `None` without a usable id.
    pub fn into_song(mut self, timestamp: u64) -> Option<Song> {
        let id = self.id.filter(|id| !id.is_empty())?;
        // the server owns the ingestion time
        self.extra.remove("timestamp");
        Some(Song {
            id,
            title: self.title,
            artist: self.artist,
            lyrics: self.lyrics,
            waveform: self.waveform,
            duration: self.duration,
            timestamp,
            extra: self.extra,
        })
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct SuccessReply {
    pub success: bool,
}

impl SuccessReply {
    pub fn ok() -> Self {
        Self { success: true }
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct CreateBroadcastReply {
    pub success: bool,
    pub broadcast: Broadcast,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ListBroadcastsReply {
    pub broadcasts: Vec<Broadcast>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct SongReply {
    pub song: Song,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthReply {
    pub message: String,
    pub status: String,
    pub time: String,
    pub active_broadcasts: usize,
    pub version: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorReply {
    pub error: String,
}
