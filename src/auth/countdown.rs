//! Second-granularity countdown driven by explicit ticks

use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Countdown {
    remaining: u32,
}

impl Countdown {
    pub fn new(secs: u32) -> Self {
        Self { remaining: secs }
    }

    /// Advance one second; returns true on the tick that reaches zero
    pub fn tick(&mut self) -> bool {
        if self.remaining == 0 {
            return false;
        }
        self.remaining -= 1;
        self.remaining == 0
    }

    pub fn remaining(&self) -> u32 {
        self.remaining
    }

    pub fn is_done(&self) -> bool {
        self.remaining == 0
    }

    pub fn reset(&mut self, secs: u32) {
        self.remaining = secs;
    }
}

/// Renders as `mm:ss`
impl fmt::Display for Countdown {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}", self.remaining / 60, self.remaining % 60)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tick_reports_zero_once() {
        let mut c = Countdown::new(2);
        assert!(!c.tick());
        assert!(c.tick());
        assert!(c.is_done());
        assert!(!c.tick());
        assert_eq!(c.remaining(), 0);
    }

    #[test]
    fn test_display_and_reset() {
        let mut c = Countdown::new(300);
        assert_eq!(c.to_string(), "05:00");
        c.tick();
        assert_eq!(c.to_string(), "04:59");
        c.reset(61);
        assert_eq!(c.to_string(), "01:01");
    }
}
