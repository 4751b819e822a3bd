//! Unresolved date/time expressions produced by the time rules.
//!
//! Expressions stay relative until resolution, where they are anchored to
//! the context's reference time (see `rules::time::normalize`).

use chrono::Weekday;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Grain {
    Second,
    Minute,
    Hour,
    Day,
    Week,
    Month,
    Year,
}

impl Grain {
    /// Length in seconds; months count 30 days and years 365.
    pub fn seconds(self) -> i64 {
        match self {
            Grain::Second => 1,
            Grain::Minute => 60,
            Grain::Hour => 3_600,
            Grain::Day => 86_400,
            Grain::Week => 7 * 86_400,
            Grain::Month => 30 * 86_400,
            Grain::Year => 365 * 86_400,
        }
    }

    pub fn is_clock(self) -> bool {
        matches!(self, Grain::Second | Grain::Minute | Grain::Hour)
    }

    /// ISO-8601 duration designator for `amount` units ("PT2H", "P3D").
    pub fn duration_timex(self, amount: i64) -> String {
        match self {
            Grain::Second => format!("PT{amount}S"),
            Grain::Minute => format!("PT{amount}M"),
            Grain::Hour => format!("PT{amount}H"),
            Grain::Day => format!("P{amount}D"),
            Grain::Week => format!("P{amount}W"),
            Grain::Month => format!("P{amount}M"),
            Grain::Year => format!("P{amount}Y"),
        }
    }
}

/// A clock time. `ambiguous` marks an hour 1..12 given without am/pm.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeOfDay {
    pub hour: u32,
    pub minute: u32,
    pub second: u32,
    pub ambiguous: bool,
}

impl TimeOfDay {
    pub fn new(hour: u32, minute: u32, ambiguous: bool) -> Option<Self> {
        (hour < 24 && minute < 60).then_some(TimeOfDay {
            hour,
            minute,
            second: 0,
            ambiguous: ambiguous && (1..=12).contains(&hour),
        })
    }

    /// Apply an am/pm marker to a 1..12 hour.
    pub fn with_meridiem(self, pm: bool) -> Option<Self> {
        if !(1..=12).contains(&self.hour) {
            return None;
        }
        let hour = match (self.hour, pm) {
            (12, false) => 0,
            (12, true) => 12,
            (h, false) => h,
            (h, true) => h + 12,
        };
        Some(TimeOfDay { hour, ambiguous: false, ..self })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DateExpr {
    /// Days from the reference date: today = 0, tomorrow = 1.
    Relative(i64),
    /// A weekday. `shift` is `None` for a bare name ("Friday"), otherwise the
    /// week offset: this = 0, next = 1, last = -1.
    Weekday { weekday: Weekday, shift: Option<i64> },
    /// Month and day, with an optional explicit year.
    MonthDay { month: u32, day: u32, year: Option<i32> },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TimeExpr {
    Now,
    Date(DateExpr),
    Time(TimeOfDay),
    DateTime { date: DateExpr, time: TimeOfDay },
    /// Reference time moved by `amount` grains ("in 3 days", "2 hours ago").
    Shifted { amount: i64, grain: Grain },
    /// Calendar week/month/year around the reference ("next week").
    Period { grain: Grain, offset: i64 },
    TimeRange { from: TimeOfDay, to: TimeOfDay },
    DateRange { from: DateExpr, to: DateExpr },
    /// Open range: everything after (or before) a date.
    DateBound { date: DateExpr, after: bool },
    /// Open range: everything after (or before) a clock time.
    TimeBound { time: TimeOfDay, after: bool },
    Duration { amount: i64, grain: Grain },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn meridiem_maps_twelve_specially() {
        let noonish = TimeOfDay::new(12, 0, true).and_then(|t| t.with_meridiem(true));
        assert_eq!(noonish.map(|t| t.hour), Some(12));
        let midnightish = TimeOfDay::new(12, 30, true).and_then(|t| t.with_meridiem(false));
        assert_eq!(midnightish.map(|t| (t.hour, t.minute)), Some((0, 30)));
        assert_eq!(TimeOfDay::new(15, 0, false).and_then(|t| t.with_meridiem(true)), None);
    }

    #[test]
    fn only_small_hours_are_ambiguous() {
        assert!(TimeOfDay::new(5, 0, true).is_some_and(|t| t.ambiguous));
        assert!(TimeOfDay::new(17, 0, true).is_some_and(|t| !t.ambiguous));
        assert!(TimeOfDay::new(0, 0, true).is_some_and(|t| !t.ambiguous));
        assert_eq!(TimeOfDay::new(24, 0, false), None);
    }

    #[test]
    fn grain_durations() {
        assert_eq!(Grain::Hour.duration_timex(2), "PT2H");
        assert_eq!(Grain::Month.duration_timex(3), "P3M");
        assert_eq!(Grain::Year.seconds(), 31_536_000);
    }
}
