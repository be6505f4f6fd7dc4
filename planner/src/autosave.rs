//! Auto-save scheduler.
//!
//! The host owns the clock and calls [`AutoSave::run`] from whatever tick it
//! already has (an animation frame, an idle callback, a timer). A save is
//! attempted once per interval and only for maps that have tiles. Failures
//! are logged and swallowed; the next attempt waits a full interval either
//! way.

#[cfg(test)]
#[path = "autosave_test.rs"]
mod autosave_test;

use std::time::{Duration, Instant};

use tracing::{debug, error, info};

use crate::config::PlannerConfig;
use crate::session::MapSession;
use crate::storage::{KeyValueStore, MapLibrary};

#[derive(Debug, Clone, Copy)]
pub struct AutoSave {
    interval: Duration,
    last_attempt: Instant,
}

impl AutoSave {
    /// Start the timer at `now`; the first attempt is one interval later.
    #[must_use]
    pub fn new(interval: Duration, now: Instant) -> Self {
        Self { interval, last_attempt: now }
    }

    #[must_use]
    pub fn from_config(config: &PlannerConfig, now: Instant) -> Self {
        Self::new(config.autosave_interval, now)
    }

    #[must_use]
    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Whether a full interval has passed since the last attempt.
    #[must_use]
    pub fn due(&self, now: Instant) -> bool {
        now.saturating_duration_since(self.last_attempt) >= self.interval
    }

    /// Save the session's map if the timer is due and the map has tiles.
    /// Returns whether a save succeeded.
    pub fn run<S: KeyValueStore>(&mut self, now: Instant, session: &mut MapSession, library: &mut MapLibrary<S>) -> bool {
        if !self.due(now) {
            return false;
        }
        self.last_attempt = now;

        if session.map().tiles.is_empty() {
            debug!(map_id = %session.map().id, "auto-save skipped: map has no tiles");
            return false;
        }
        match library.save(session.map()) {
            Ok(summary) => {
                session.mark_saved();
                info!(map_id = %summary.id, "auto-saved map");
                true
            }
            Err(e) => {
                error!(map_id = %session.map().id, error = %e, code = e.error_code(), "auto-save failed");
                false
            }
        }
    }
}
