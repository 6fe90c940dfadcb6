use chrono::{DateTime, Datelike, Duration, DurationRound, Timelike, Utc, Weekday};

/// Recurrence for the trigger rule: a fixed minute, an hour range walked in
/// fixed steps, optionally restricted to weekdays. Times are UTC.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Schedule {
    pub minute: u32,
    pub hour_start: u32,
    pub hour_end: u32,
    pub hour_step: u32,
    pub weekdays_only: bool,
}

impl Schedule {
    /// The deployment's schedule: Mon-Fri at 12:00, 16:00 and 20:00 UTC.
    pub fn working_hours() -> Self {
        Self {
            minute: 0,
            hour_start: 12,
            hour_end: 22,
            hour_step: 4,
            weekdays_only: true,
        }
    }

    /// EventBridge cron form, e.g. `cron(0 12-22/4 ? * MON-FRI *)`.
    pub fn expression(&self) -> String {
        let days = if self.weekdays_only { "MON-FRI" } else { "*" };
        format!(
            "cron({} {}-{}/{} ? * {} *)",
            self.minute, self.hour_start, self.hour_end, self.hour_step, days
        )
    }

    fn hours(&self) -> impl Iterator<Item = u32> + '_ {
        (self.hour_start..=self.hour_end).step_by(self.hour_step.max(1) as usize)
    }

    /// Whether the rule fires at the given instant.
    pub fn fires_at(&self, at: DateTime<Utc>) -> bool {
        if at.minute() != self.minute || at.second() != 0 {
            return false;
        }
        if self.weekdays_only && matches!(at.weekday(), Weekday::Sat | Weekday::Sun) {
            return false;
        }
        self.hours().any(|h| h == at.hour())
    }

    /// The next `count` firings strictly after `from`.
    pub fn next_firings(&self, from: DateTime<Utc>, count: usize) -> Vec<DateTime<Utc>> {
        let mut out = Vec::with_capacity(count);
        let mut t = from.duration_trunc(Duration::minutes(1)).unwrap_or(from);
        // The rule fires at least once in any 4-day window; a three-week scan
        // bounds the loop for any sane `count`.
        let scan_limit = 21 * 24 * 60;
        for _ in 0..scan_limit {
            t += Duration::minutes(1);
            if self.fires_at(t) {
                out.push(t);
                if out.len() == count {
                    break;
                }
            }
        }
        out
    }
}
