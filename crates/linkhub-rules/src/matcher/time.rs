//! Hour-of-day windows.

use crate::rule::TimeRule;

/// A half-open `[start, end)` range of hours.
///
/// When `start > end` the window wraps past midnight, so `22..5` covers
/// 22:00–04:59. `start == end` is an empty window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HourWindow {
    start: i64,
    end: i64,
}

impl HourWindow {
    pub fn new(start: i64, end: i64) -> Self {
        Self { start, end }
    }

    /// Returns true if the window crosses midnight.
    pub fn wraps(&self) -> bool {
        self.start > self.end
    }

    pub fn contains(&self, hour: u8) -> bool {
        let h = i64::from(hour);
        if self.wraps() {
            h >= self.start || h < self.end
        } else {
            self.start <= h && h < self.end
        }
    }
}

impl From<&TimeRule> for HourWindow {
    fn from(rule: &TimeRule) -> Self {
        Self::new(rule.start_hour, rule.end_hour)
    }
}
