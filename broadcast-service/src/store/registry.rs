use std::collections::HashMap;
use std::sync::Mutex;
use std::time::Duration;

use crate::error::{Error, Result};
use crate::types::{now_ms, Broadcast};

/// Which broadcasts exist, keyed by the client-chosen id.
#[derive(Debug, Default)]
pub struct BroadcastRegistry {
    broadcasts: Mutex<HashMap<String, Broadcast>>,
}

impl BroadcastRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts or fully replaces the entry for `key`.
    pub fn create(
        &self,
        key: &str,
        name: Option<&str>,
        host_name: Option<&str>,
    ) -> Result<Broadcast> {
        let host_name = host_name
            .filter(|host| !host.is_empty())
            .unwrap_or("Host")
            .to_string();
        let name = match name.filter(|name| !name.is_empty()) {
            Some(name) => name.to_string(),
            None => format!("{}'s Broadcast", host_name),
        };

        let broadcast = Broadcast {
            id: key.to_string(),
            name,
            host_name,
            is_active: true,
            last_activity: now_ms(),
        };

        self.insert(broadcast.clone())?;
        Ok(broadcast)
    }

    pub(crate) fn insert(&self, broadcast: Broadcast) -> Result<()> {
        let mut broadcasts = self.broadcasts.lock().map_err(|_| Error::Lock)?;
        broadcasts.insert(broadcast.id.clone(), broadcast);
        Ok(())
    }

    pub fn get(&self, key: &str) -> Result<Option<Broadcast>> {
        let broadcasts = self.broadcasts.lock().map_err(|_| Error::Lock)?;
        Ok(broadcasts.get(key).cloned())
    }

    /// Removes `key`. Returns whether an entry was present.
    pub fn delete(&self, key: &str) -> Result<bool> {
        let mut broadcasts = self.broadcasts.lock().map_err(|_| Error::Lock)?;
        Ok(broadcasts.remove(key).is_some())
    }

    pub fn list_active(&self) -> Result<Vec<Broadcast>> {
        let broadcasts = self.broadcasts.lock().map_err(|_| Error::Lock)?;
        Ok(broadcasts.values().cloned().collect())
    }

    pub fn len(&self) -> Result<usize> {
        let broadcasts = self.broadcasts.lock().map_err(|_| Error::Lock)?;
        Ok(broadcasts.len())
    }

    /// Refreshes `lastActivity`. Unknown keys are ignored.
    pub fn touch(&self, key: &str) -> Result<()> {
        let mut broadcasts = self.broadcasts.lock().map_err(|_| Error::Lock)?;
        if let Some(broadcast) = broadcasts.get_mut(key) {
            broadcast.last_activity = now_ms();
        }
        Ok(())
    }

    /// Drops every entry idle for longer than `threshold` as of `now` (epoch ms)
    /// and returns the removed keys.
    pub fn remove_idle(&self, now: u64, threshold: Duration) -> Result<Vec<String>> {
        let threshold_ms = threshold.as_millis() as u64;
        let mut broadcasts = self.broadcasts.lock().map_err(|_| Error::Lock)?;

        let mut removed = Vec::new();
        broadcasts.retain(|key, broadcast| {
            let keep = now.saturating_sub(broadcast.last_activity) <= threshold_ms;
            if !keep {
                removed.push(key.clone());
            }
            keep
        });

        Ok(removed)
    }
}
