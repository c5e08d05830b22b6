//! Time-window rules
//!
//! A proposed reservation is a pair of wall-clock times on one date. Before
//! it can be checked for conflicts it has to parse, be non-empty, be
//! correctly ordered, fall inside business hours and last long enough.
//! Rules are checked in exactly that order; the first failure is reported.

use chrono::{Duration, NaiveTime};
use thiserror::Error;

/// Wire format for reservation times (`HH:MM`)
pub const CLOCK_FORMAT: &str = "%H:%M";

/// Wire format for reservation dates (`YYYY-MM-DD`)
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Why a proposed window was rejected
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum WindowRejection {
    #[error("Invalid {field} format (expected HH:MM)")]
    MalformedTime { field: &'static str, value: String },

    #[error(
        "The reservation start time ({start}) and end time ({end}) cannot be the same; \
         duration must be at least 1 hour."
    )]
    ZeroDuration { start: String, end: String },

    #[error(
        "The reservation start time ({start}) must be earlier than the end time ({end}). \
         For example, 10:00-11:00 is valid."
    )]
    InvertedOrder { start: String, end: String },

    #[error("Reservation must be between {opening} and {closing}")]
    OutsideBusinessHours { opening: String, closing: String },

    #[error("Minimum reservation duration is {}", describe_minutes(.minimum_minutes))]
    TooShort { minimum_minutes: i64 },
}

impl WindowRejection {
    pub fn kind(&self) -> &'static str {
        match self {
            Self::MalformedTime { .. } => "malformed_time",
            Self::ZeroDuration { .. } => "zero_duration",
            Self::InvertedOrder { .. } => "inverted_order",
            Self::OutsideBusinessHours { .. } => "outside_business_hours",
            Self::TooShort { .. } => "too_short",
        }
    }
}

fn describe_minutes(minutes: &i64) -> String {
    match *minutes {
        60 => "1 hour".to_string(),
        m if m % 60 == 0 => format!("{} hours", m / 60),
        m => format!("{} minutes", m),
    }
}

/// Validated half-open interval `[start, end)` on a single date
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TimeWindow {
    pub start: NaiveTime,
    pub end: NaiveTime,
}

impl TimeWindow {
    pub fn new(start: NaiveTime, end: NaiveTime) -> Self {
        Self { start, end }
    }

    /// `[s1, e1)` and `[s2, e2)` overlap iff `s1 < e2 && e1 > s2`.
    ///
    /// Touching windows (one ends when the other starts) do not overlap.
    pub fn overlaps(&self, other: &TimeWindow) -> bool {
        self.start < other.end && self.end > other.start
    }

    pub fn duration(&self) -> Duration {
        self.end - self.start
    }

    /// Canonical `HH:MM` start
    pub fn start_label(&self) -> String {
        self.start.format(CLOCK_FORMAT).to_string()
    }

    /// Canonical `HH:MM` end
    pub fn end_label(&self) -> String {
        self.end.format(CLOCK_FORMAT).to_string()
    }
}

fn clock(hour: u32, minute: u32) -> NaiveTime {
    NaiveTime::from_hms_opt(hour, minute, 0).unwrap_or_default()
}

/// Daily window inside which every reservation must fall.
///
/// The same hours apply to every date. Built once at start-up and shared.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BusinessHours {
    pub opening: NaiveTime,
    pub closing: NaiveTime,
    pub minimum: Duration,
}

impl Default for BusinessHours {
    fn default() -> Self {
        Self {
            opening: clock(9, 0),
            closing: clock(18, 0),
            minimum: Duration::hours(1),
        }
    }
}

impl BusinessHours {
    /// Check a proposed `start`/`end` pair given as `HH:MM` strings.
    ///
    /// Pure: depends only on the inputs and on `self`.
    pub fn validate(&self, start: &str, end: &str) -> Result<TimeWindow, WindowRejection> {
        let start_time = parse_clock("start_time", start)?;
        let end_time = parse_clock("end_time", end)?;

        if start_time == end_time {
            return Err(WindowRejection::ZeroDuration {
                start: start.to_string(),
                end: end.to_string(),
            });
        }

        if start_time > end_time {
            return Err(WindowRejection::InvertedOrder {
                start: start.to_string(),
                end: end.to_string(),
            });
        }

        if start_time < self.opening || end_time > self.closing {
            return Err(WindowRejection::OutsideBusinessHours {
                opening: self.opening.format(CLOCK_FORMAT).to_string(),
                closing: self.closing.format(CLOCK_FORMAT).to_string(),
            });
        }

        let window = TimeWindow::new(start_time, end_time);
        if window.duration() < self.minimum {
            return Err(WindowRejection::TooShort {
                minimum_minutes: self.minimum.num_minutes(),
            });
        }

        Ok(window)
    }
}

/// Parse a wall-clock `HH:MM` value
pub fn parse_clock(field: &'static str, value: &str) -> Result<NaiveTime, WindowRejection> {
    NaiveTime::parse_from_str(value.trim(), CLOCK_FORMAT).map_err(|_| {
        WindowRejection::MalformedTime {
            field,
            value: value.to_string(),
        }
    })
}

// ── Tests ──────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    fn t(h: u32, m: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(h, m, 0).unwrap()
    }

    fn label(time: NaiveTime) -> String {
        time.format(CLOCK_FORMAT).to_string()
    }

    /// Every quarter hour of the day
    fn quarter_hours() -> Vec<NaiveTime> {
        (0..24)
            .flat_map(|h| [0, 15, 30, 45].into_iter().map(move |m| t(h, m)))
            .collect()
    }

    #[test]
    fn accepts_one_hour_inside_hours() {
        let window = BusinessHours::default().validate("10:00", "11:00").unwrap();
        assert_eq!(window.start, t(10, 0));
        assert_eq!(window.end, t(11, 0));
        assert_eq!(window.start_label(), "10:00");
        assert_eq!(window.end_label(), "11:00");
    }

    #[test]
    fn accepts_the_whole_business_day() {
        assert!(BusinessHours::default().validate("09:00", "18:00").is_ok());
    }

    #[test]
    fn malformed_times_are_reported_first() {
        let hours = BusinessHours::default();
        assert_eq!(
            hours.validate("10h", "10h").unwrap_err(),
            WindowRejection::MalformedTime {
                field: "start_time",
                value: "10h".into()
            }
        );
        assert!(matches!(
            hours.validate("10:00", "25:00").unwrap_err(),
            WindowRejection::MalformedTime { field: "end_time", .. }
        ));
        assert!(matches!(
            hours.validate("", "11:00").unwrap_err(),
            WindowRejection::MalformedTime { field: "start_time", .. }
        ));
    }

    #[test]
    fn zero_duration_message_names_both_times() {
        let err = BusinessHours::default().validate("10:00", "10:00").unwrap_err();
        assert!(matches!(err, WindowRejection::ZeroDuration { .. }));
        assert_eq!(err.to_string().matches("10:00").count(), 2);
    }

    #[test]
    fn zero_duration_wins_over_business_hours() {
        let err = BusinessHours::default().validate("07:00", "07:00").unwrap_err();
        assert_eq!(err.kind(), "zero_duration");
    }

    #[test]
    fn inverted_order_wins_over_business_hours() {
        let err = BusinessHours::default().validate("20:00", "08:00").unwrap_err();
        assert_eq!(err.kind(), "inverted_order");
    }

    #[test]
    fn outside_hours_wins_over_too_short() {
        let err = BusinessHours::default().validate("08:30", "09:00").unwrap_err();
        assert_eq!(err.kind(), "outside_business_hours");
        assert_eq!(err.to_string(), "Reservation must be between 09:00 and 18:00");
    }

    #[test]
    fn start_before_opening_is_rejected() {
        let err = BusinessHours::default().validate("08:00", "09:30").unwrap_err();
        assert_eq!(err.kind(), "outside_business_hours");
    }

    #[test]
    fn end_after_closing_is_rejected() {
        let err = BusinessHours::default().validate("17:00", "18:01").unwrap_err();
        assert_eq!(err.kind(), "outside_business_hours");
    }

    #[test]
    fn too_short_message() {
        let err = BusinessHours::default().validate("10:00", "10:59").unwrap_err();
        assert_eq!(err, WindowRejection::TooShort { minimum_minutes: 60 });
        assert_eq!(err.to_string(), "Minimum reservation duration is 1 hour");
    }

    #[test]
    fn every_equal_pair_is_zero_duration() {
        let hours = BusinessHours::default();
        for time in quarter_hours() {
            let s = label(time);
            assert_eq!(hours.validate(&s, &s).unwrap_err().kind(), "zero_duration");
        }
    }

    #[test]
    fn every_rule_holds_on_a_quarter_hour_grid() {
        let hours = BusinessHours::default();
        let grid = quarter_hours();
        for &start in &grid {
            for &end in &grid {
                let result = hours.validate(&label(start), &label(end));
                let expected = if start == end {
                    Some("zero_duration")
                } else if start > end {
                    Some("inverted_order")
                } else if start < hours.opening || end > hours.closing {
                    Some("outside_business_hours")
                } else if end - start < Duration::minutes(60) {
                    Some("too_short")
                } else {
                    None
                };
                assert_eq!(
                    result.as_ref().err().map(WindowRejection::kind),
                    expected,
                    "{}-{}",
                    label(start),
                    label(end)
                );
            }
        }
    }

    #[test]
    fn overlap_is_half_open() {
        let morning = TimeWindow::new(t(10, 0), t(12, 0));
        let noon = TimeWindow::new(t(12, 0), t(13, 0));
        assert!(!morning.overlaps(&noon));
        assert!(!noon.overlaps(&morning));

        let straddling = TimeWindow::new(t(11, 59), t(13, 0));
        assert!(morning.overlaps(&straddling));
    }

    #[test]
    fn overlap_matches_predicate_and_is_symmetric() {
        let grid: Vec<NaiveTime> = (9..=18)
            .flat_map(|h| [0, 30].into_iter().map(move |m| t(h, m)))
            .filter(|time| *time <= t(18, 0))
            .collect();
        let windows: Vec<TimeWindow> = grid
            .iter()
            .flat_map(|&s| grid.iter().filter(move |&&e| e > s).map(move |&e| TimeWindow::new(s, e)))
            .collect();

        for a in &windows {
            for b in &windows {
                let expected = a.start < b.end && a.end > b.start;
                assert_eq!(a.overlaps(b), expected);
                assert_eq!(a.overlaps(b), b.overlaps(a));
            }
        }
    }

    #[test]
    fn describes_minimums() {
        assert_eq!(describe_minutes(&60), "1 hour");
        assert_eq!(describe_minutes(&120), "2 hours");
        assert_eq!(describe_minutes(&90), "90 minutes");
    }
}
