//! The served resource's last-modified stamp.
//!
//! Content updates are simulated: an updater task rewrites the stamp with
//! the current time on a fixed period. Connections only ever read it.

use std::sync::Arc;
use std::time::{Duration, SystemTime};

use arc_swap::ArcSwapOption;
use tokio::task::JoinHandle;

/// Formats `time` as an RFC 1123 date, e.g. `Sun, 06 Nov 1994 08:49:37 GMT`.
pub fn http_date(time: SystemTime) -> String {
    httpdate::fmt_http_date(time)
}

/// The current time as an HTTP date.
pub fn http_now() -> String {
    http_date(SystemTime::now())
}

/// Shared last-modified value.
///
/// Reads are lock-free snapshots and may observe a value stored concurrently
/// with the read. The value is `None` until the first update.
#[derive(Debug, Default)]
pub struct ServerClock {
    last_modified: ArcSwapOption<String>,
}

impl ServerClock {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_last_modified(value: impl Into<String>) -> Self {
        let clock = Self::new();
        clock.set(value);
        clock
    }

    /// Current stamp, or `None` if it was never set.
    pub fn last_modified(&self) -> Option<String> {
        self.last_modified.load_full().map(|v| v.as_ref().clone())
    }

    pub fn set(&self, value: impl Into<String>) {
        self.last_modified.store(Some(Arc::new(value.into())));
    }

    /// Marks the resource as modified now.
    pub fn touch(&self) {
        self.set(http_now());
    }
}

/// Spawns the task that touches `clock` every `period`, starting immediately.
pub fn spawn_updater(clock: Arc<ServerClock>, period: Duration) -> JoinHandle<()> {
    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(period);

        loop {
            ticker.tick().await;
            clock.touch();
            tracing::debug!(last_modified = ?clock.last_modified(), "Resource updated");
        }
    })
}
