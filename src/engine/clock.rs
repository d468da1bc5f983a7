use std::time::Duration;

/// Display-only elapsed play time. Shares nothing with the grid.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ElapsedClock {
    elapsed: Duration,
    stopped: bool,
}

impl ElapsedClock {
    pub fn advance(&mut self, dt: Duration) {
        if !self.stopped {
            self.elapsed += dt;
        }
    }

    pub fn stop(&mut self) {
        self.stopped = true;
    }

    pub fn elapsed(&self) -> Duration {
        self.elapsed
    }

    pub fn whole_seconds(&self) -> u64 {
        self.elapsed.as_secs()
    }
}

/// `MM:SS`, minutes keep growing past 59.
pub fn format_clock(seconds: u64) -> String {
    format!("{:02}:{:02}", seconds / 60, seconds % 60)
}
