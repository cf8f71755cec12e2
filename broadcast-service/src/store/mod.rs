mod catalog;
mod playback;
mod registry;

pub use self::catalog::SongCatalog;
pub use self::playback::PlaybackTracker;
pub use self::registry::BroadcastRegistry;
