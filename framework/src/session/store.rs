use super::Flash;
use std::collections::HashMap;
use std::sync::RwLock;
use std::time::{Duration, Instant};

/// Server-side storage for flash data, keyed by session id
pub trait FlashStore: Send + Sync {
    /// Queue flash data for the session's next request
    fn put(&self, session_id: &str, flash: Flash);

    /// Remove and return the queued flash data (empty when none)
    fn take(&self, session_id: &str) -> Flash;
}

/// In-process flash store
///
/// An entry lives until the owning session makes its next request or until
/// it is older than the store's TTL, whichever comes first. Expired entries
/// are swept on every `put`, so sessions that never come back do not pile
/// up. Nothing is persisted across restarts.
pub struct MemoryFlashStore {
    entries: RwLock<HashMap<String, (Flash, Instant)>>,
    ttl: Duration,
}

impl MemoryFlashStore {
    pub const DEFAULT_TTL: Duration = Duration::from_secs(300);

    pub fn new() -> Self {
        Self::with_ttl(Self::DEFAULT_TTL)
    }

    pub fn with_ttl(ttl: Duration) -> Self {
        Self {
            entries: RwLock::new(HashMap::new()),
            ttl,
        }
    }

    /// Number of sessions with pending flash data
    pub fn len(&self) -> usize {
        self.entries.read().map(|entries| entries.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn expired(&self, stored_at: Instant, now: Instant) -> bool {
        now.duration_since(stored_at) >= self.ttl
    }
}

impl Default for MemoryFlashStore {
    fn default() -> Self {
        Self::new()
    }
}

impl FlashStore for MemoryFlashStore {
    fn put(&self, session_id: &str, flash: Flash) {
        let now = Instant::now();
        if let Ok(mut entries) = self.entries.write() {
            let before = entries.len();
            entries.retain(|_, (_, stored_at)| !self.expired(*stored_at, now));
            let swept = before - entries.len();
            if swept > 0 {
                tracing::debug!(swept, "expired flash entries dropped");
            }

            let (pending, stored_at) = entries
                .entry(session_id.to_string())
                .or_insert_with(|| (Flash::default(), now));
            pending.merge(flash);
            *stored_at = now;
        }
    }

    fn take(&self, session_id: &str) -> Flash {
        let now = Instant::now();
        self.entries
            .write()
            .ok()
            .and_then(|mut entries| entries.remove(session_id))
            .filter(|(_, stored_at)| !self.expired(*stored_at, now))
            .map(|(flash, _)| flash)
            .unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn flash(key: &str, text: &str) -> Flash {
        let mut flash = Flash::new();
        flash.put(key, text);
        flash
    }

    #[test]
    fn take_reads_once() {
        let store = MemoryFlashStore::new();
        store.put("session-a", flash("message", "Task deleted successfully!"));

        assert_eq!(
            store.take("session-a").text("message"),
            Some("Task deleted successfully!")
        );
        assert!(store.take("session-a").is_empty());
        assert!(store.is_empty());
    }

    #[test]
    fn sessions_are_isolated() {
        let store = MemoryFlashStore::new();
        store.put("session-a", flash("error", "nope"));

        assert!(store.take("session-b").is_empty());
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn put_sweeps_expired_entries() {
        let store = MemoryFlashStore::with_ttl(Duration::ZERO);
        store.put("session-a", flash("message", "Task added successfully!"));
        store.put("session-b", flash("message", "Task added successfully!"));
        store.put("session-c", flash("message", "Task added successfully!"));

        assert_eq!(store.len(), 1);
    }

    #[test]
    fn expired_flash_is_not_delivered() {
        let store = MemoryFlashStore::with_ttl(Duration::ZERO);
        store.put("session-a", flash("error", "too late"));

        assert!(store.take("session-a").is_empty());
        assert!(store.is_empty());
    }
}
