// Folio
// Copyright (C) 2025 Folio Contributors

// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU Affero General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.

// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
// GNU Affero General Public License for more details.

// You should have received a copy of the GNU Affero General Public License
// along with this program.  If not, see <http://www.gnu.org/licenses/>.

//! Session flag storage and polling
//!
//! The authenticated flag lives in shared client storage written by the
//! login flow, outside this crate's control, so changes are observed by
//! polling: a short interval while authenticated, a longer one while not.
//! Staleness is bounded by the poll interval. Transitions are additionally
//! published on a watch channel so shells can subscribe instead of
//! re-polling.

use parking_lot::RwLock;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::watch;
use tracing::debug;

/// Shared storage for the session's authenticated flag.
///
/// Only the boolean flag is held client-side; the session itself is a
/// httpOnly cookie the transport carries automatically.
pub trait SessionFlags: Send + Sync {
    /// Whether a session flag is currently present
    fn is_authenticated(&self) -> bool;

    /// Record a login/logout performed by the shell
    fn set_authenticated(&self, value: bool);

    /// Remove the flag entirely
    fn clear(&self);
}

/// In-memory session flag storage, used by tests and headless shells
#[derive(Debug, Default)]
pub struct InMemorySessionFlags {
    flag: RwLock<bool>,
}

impl InMemorySessionFlags {
    /// Create storage with no session flag set
    pub fn new() -> Self {
        Self::default()
    }
}

impl SessionFlags for InMemorySessionFlags {
    fn is_authenticated(&self) -> bool {
        *self.flag.read()
    }

    fn set_authenticated(&self, value: bool) {
        *self.flag.write() = value;
    }

    fn clear(&self) {
        *self.flag.write() = false;
    }
}

/// Polls the session flag and publishes transitions
pub struct SessionWatcher {
    flags: Arc<dyn SessionFlags>,

    /// Poll interval while a session flag is present
    active_interval: Duration,

    /// Poll interval while logged out
    idle_interval: Duration,

    tx: watch::Sender<bool>,
}

impl SessionWatcher {
    /// Create a watcher over the given flag storage
    pub fn new(flags: Arc<dyn SessionFlags>, active_interval: Duration, idle_interval: Duration) -> Self {
        let (tx, _) = watch::channel(flags.is_authenticated());

        Self {
            flags,
            active_interval,
            idle_interval,
            tx,
        }
    }

    /// Subscribe to authentication transitions.
    ///
    /// The receiver's current value is the flag as of watcher creation.
    pub fn subscribe(&self) -> watch::Receiver<bool> {
        self.tx.subscribe()
    }

    /// Spawn the polling loop
    pub fn spawn(self) -> tokio::task::JoinHandle<()> {
        tokio::spawn(async move {
            let mut last = *self.tx.borrow();

            loop {
                let wait = if last { self.active_interval } else { self.idle_interval };
                tokio::time::sleep(wait).await;

                let now = self.flags.is_authenticated();
                if now != last {
                    debug!(authenticated = now, "Session flag transition observed");
                    let _ = self.tx.send(now);
                    last = now;
                }
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::time::timeout;

    #[test]
    fn test_in_memory_flags() {
        let flags = InMemorySessionFlags::new();
        assert!(!flags.is_authenticated());

        flags.set_authenticated(true);
        assert!(flags.is_authenticated());

        flags.clear();
        assert!(!flags.is_authenticated());
    }

    #[tokio::test]
    async fn test_watcher_publishes_transitions() {
        let flags: Arc<dyn SessionFlags> = Arc::new(InMemorySessionFlags::new());
        let watcher = SessionWatcher::new(flags.clone(), Duration::from_millis(5), Duration::from_millis(5));
        let mut rx = watcher.subscribe();
        let handle = watcher.spawn();

        assert!(!*rx.borrow());

        flags.set_authenticated(true);
        timeout(Duration::from_secs(1), rx.changed()).await.unwrap().unwrap();
        assert!(*rx.borrow());

        flags.clear();
        timeout(Duration::from_secs(1), rx.changed()).await.unwrap().unwrap();
        assert!(!*rx.borrow());

        handle.abort();
    }

    #[tokio::test]
    async fn test_watcher_initial_value_reflects_flag() {
        let flags: Arc<dyn SessionFlags> = Arc::new(InMemorySessionFlags::new());
        flags.set_authenticated(true);

        let watcher = SessionWatcher::new(flags, Duration::from_millis(5), Duration::from_millis(5));
        assert!(*watcher.subscribe().borrow());
    }
}
