//! Presentation helpers
//!
//! Formatting and redraw timing for whatever front end polls the engine.
//! Nothing here touches engine state.

use chrono::{DateTime, Duration, Utc};

/// Format a hold duration as `HH:MM:SS`, or `--:--:--` when nobody holds
pub fn format_hold_duration(duration: Option<Duration>) -> String {
    let Some(duration) = duration else {
        return "--:--:--".to_string();
    };

    let total = duration.num_seconds().max(0);
    let (hours, rest) = (total / 3600, total % 3600);
    let (minutes, seconds) = (rest / 60, rest % 60);
    format!("{:02}:{:02}:{:02}", hours, minutes, seconds)
}

/// Redraw cadence and how long a successful pass stays on screen
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RefreshPolicy {
    pub celebration_window: Duration,
    pub fast_refresh: Duration,
    pub slow_refresh: Duration,
}

impl RefreshPolicy {
    /// Whether a pass made at `since` should still be celebrated at `now`
    pub fn is_celebrating(&self, since: Option<DateTime<Utc>>, now: DateTime<Utc>) -> bool {
        since.is_some_and(|since| now - since < self.celebration_window)
    }

    /// Time until the next redraw
    pub fn refresh_interval(&self, since: Option<DateTime<Utc>>, now: DateTime<Utc>) -> Duration {
        if self.is_celebrating(since, now) {
            self.fast_refresh
        } else {
            self.slow_refresh
        }
    }

    /// Drop a celebration marker once its window has passed
    pub fn expire(&self, since: &mut Option<DateTime<Utc>>, now: DateTime<Utc>) {
        if since.is_some() && !self.is_celebrating(*since, now) {
            *since = None;
        }
    }
}

impl Default for RefreshPolicy {
    fn default() -> Self {
        Self {
            celebration_window: Duration::seconds(10),
            fast_refresh: Duration::seconds(2),
            slow_refresh: Duration::seconds(5),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_hold_duration() {
        assert_eq!(format_hold_duration(None), "--:--:--");
        assert_eq!(format_hold_duration(Some(Duration::zero())), "00:00:00");
        assert_eq!(format_hold_duration(Some(Duration::seconds(59))), "00:00:59");
        assert_eq!(
            format_hold_duration(Some(Duration::seconds(3 * 3600 + 25 * 60 + 7))),
            "03:25:07"
        );
        assert_eq!(format_hold_duration(Some(Duration::hours(100))), "100:00:00");
    }

    #[test]
    fn test_celebration_window() {
        let policy = RefreshPolicy::default();
        let start = Utc::now();

        assert!(!policy.is_celebrating(None, start));
        assert!(policy.is_celebrating(Some(start), start + Duration::seconds(9)));
        assert!(!policy.is_celebrating(Some(start), start + Duration::seconds(10)));
    }

    #[test]
    fn test_refresh_interval() {
        let policy = RefreshPolicy::default();
        let start = Utc::now();

        assert_eq!(
            policy.refresh_interval(Some(start), start + Duration::seconds(1)),
            Duration::seconds(2)
        );
        assert_eq!(
            policy.refresh_interval(Some(start), start + Duration::seconds(30)),
            Duration::seconds(5)
        );
        assert_eq!(policy.refresh_interval(None, start), Duration::seconds(5));
    }

    #[test]
    fn test_expire() {
        let policy = RefreshPolicy::default();
        let start = Utc::now();
        let mut since = Some(start);

        policy.expire(&mut since, start + Duration::seconds(3));
        assert_eq!(since, Some(start));

        policy.expire(&mut since, start + Duration::seconds(11));
        assert_eq!(since, None);
    }
}
