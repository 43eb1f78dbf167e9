use alloc::format;
use alloc::string::String;
use chrono::prelude::*;

/// Wall-clock stopwatch for one session. The caller provides `now` for every reading, so the timer itself never
/// touches a clock.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct Timer {
    started_at: Option<DateTime<Utc>>,
    stopped_at: Option<DateTime<Utc>>,
    /// Highest value reported so far, keeps readings monotonic if the clock steps back.
    last_secs: u32,
}

impl Timer {
    pub fn is_running(&self) -> bool {
        self.started_at.is_some() && self.stopped_at.is_none()
    }

    pub fn is_stopped(&self) -> bool {
        self.stopped_at.is_some()
    }

    /// Starts measuring, no-op when already started.
    pub fn start(&mut self, now: DateTime<Utc>) {
        if self.started_at.is_none() {
            log::debug!("timer started at {}", now);
            self.started_at = Some(now);
        }
    }

    /// Freezes the reading. Only the first call after start has an effect.
    pub fn stop(&mut self, now: DateTime<Utc>) -> bool {
        if !self.is_running() {
            return false;
        }
        self.last_secs = self.elapsed_secs(now);
        self.stopped_at = Some(now);
        log::debug!("timer stopped at {} after {}s", now, self.last_secs);
        true
    }

    /// Seconds elapsed since start, 0 if not started.
    pub fn elapsed_secs(&self, now: DateTime<Utc>) -> u32 {
        let Some(started_at) = self.started_at else {
            return 0;
        };
        if self.stopped_at.is_some() {
            return self.last_secs;
        }
        let secs = (now - started_at).num_seconds().clamp(0, u32::MAX.into()) as u32;
        secs.max(self.last_secs)
    }

    /// Records a reading, returning it only when it moved past the previous one.
    pub fn observe(&mut self, now: DateTime<Utc>) -> Option<u32> {
        let secs = self.elapsed_secs(now);
        if secs == self.last_secs {
            return None;
        }
        self.last_secs = secs;
        Some(secs)
    }
}

/// `MM:SS`, zero padded. Minutes keep counting past 99.
pub fn format_clock(secs: u32) -> String {
    format!("{:02}:{:02}", secs / 60, secs % 60)
}
