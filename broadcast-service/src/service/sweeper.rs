use std::sync::Arc;
use std::time::Duration;

use tokio::task::JoinHandle;
use tokio::time;
use tracing::{info, warn};

use crate::error::Result;
use crate::store::{BroadcastRegistry, PlaybackTracker};
use crate::types::now_ms;

const MIN_SWEEP_INTERVAL: Duration = Duration::from_millis(1);

/// One sweep pass. Each mapping is locked once, never both at the same time.
pub fn sweep_inactive(
    registry: &BroadcastRegistry,
    playback: &PlaybackTracker,
    now: u64,
    inactive_threshold: Duration,
) -> Result<Vec<String>> {
    let removed = registry.remove_idle(now, inactive_threshold)?;
    playback.clear_many(&removed)?;

    for id in &removed {
        info!("Cleaning up inactive broadcast: {}", id);
    }

    Ok(removed)
}

pub fn start_sweep_loop(
    registry: Arc<BroadcastRegistry>,
    playback: Arc<PlaybackTracker>,
    sweep_interval: Duration,
    inactive_threshold: Duration,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        let mut interval = time::interval(sweep_interval.max(MIN_SWEEP_INTERVAL));
        loop {
            interval.tick().await;

            let now = now_ms();
            if let Err(err) = sweep_inactive(&registry, &playback, now, inactive_threshold) {
                warn!("Broadcast sweep failed: {}", err);
            }
        }
    })
}
