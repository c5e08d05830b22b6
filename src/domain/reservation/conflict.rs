//! Overlap scan over the reservations of one date

use super::model::Reservation;
use super::window::TimeWindow;

/// Every reservation in `existing` whose window overlaps `window`.
///
/// `existing` must be the complete set for the date; the scan is linear and
/// applies the exact half-open predicate to each entry.
pub fn find_overlapping<'a>(existing: &'a [Reservation], window: &TimeWindow) -> Vec<&'a Reservation> {
    existing
        .iter()
        .filter(|reservation| reservation.window.overlaps(window))
        .collect()
}

pub fn has_conflict(existing: &[Reservation], window: &TimeWindow) -> bool {
    existing
        .iter()
        .any(|reservation| reservation.window.overlaps(window))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, NaiveTime, Utc};

    fn t(h: u32, m: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(h, m, 0).unwrap()
    }

    fn booked(id: i32, start: NaiveTime, end: NaiveTime) -> Reservation {
        Reservation {
            id,
            owner_id: 1,
            date: NaiveDate::from_ymd_opt(2025, 6, 10).unwrap(),
            window: TimeWindow::new(start, end),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn empty_day_has_no_conflict() {
        let window = TimeWindow::new(t(10, 0), t(11, 0));
        assert!(!has_conflict(&[], &window));
        assert!(find_overlapping(&[], &window).is_empty());
    }

    #[test]
    fn partial_overlap_conflicts() {
        let existing = vec![booked(1, t(10, 0), t(11, 0))];
        let window = TimeWindow::new(t(10, 30), t(11, 30));
        assert!(has_conflict(&existing, &window));
    }

    #[test]
    fn back_to_back_does_not_conflict() {
        let existing = vec![booked(1, t(10, 0), t(12, 0)), booked(2, t(14, 0), t(15, 0))];
        assert!(!has_conflict(&existing, &TimeWindow::new(t(12, 0), t(14, 0))));
        assert!(!has_conflict(&existing, &TimeWindow::new(t(9, 0), t(10, 0))));
        assert!(!has_conflict(&existing, &TimeWindow::new(t(15, 0), t(18, 0))));
    }

    #[test]
    fn containment_conflicts_both_ways() {
        let existing = vec![booked(1, t(10, 0), t(13, 0))];
        assert!(has_conflict(&existing, &TimeWindow::new(t(11, 0), t(12, 0))));

        let existing = vec![booked(1, t(11, 0), t(12, 0))];
        assert!(has_conflict(&existing, &TimeWindow::new(t(10, 0), t(13, 0))));
    }

    #[test]
    fn scans_every_entry_not_just_the_first() {
        let existing = vec![
            booked(1, t(9, 0), t(10, 0)),
            booked(2, t(12, 0), t(13, 0)),
            booked(3, t(16, 0), t(17, 0)),
        ];
        let window = TimeWindow::new(t(15, 30), t(16, 30));
        let hits = find_overlapping(&existing, &window);
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].id, 3);
    }

    #[test]
    fn reports_all_overlapping_entries() {
        let existing = vec![
            booked(1, t(9, 0), t(10, 0)),
            booked(2, t(10, 0), t(11, 0)),
            booked(3, t(11, 0), t(12, 0)),
        ];
        let window = TimeWindow::new(t(9, 30), t(11, 30));
        let ids: Vec<i32> = find_overlapping(&existing, &window).iter().map(|r| r.id).collect();
        assert_eq!(ids, vec![1, 2, 3]);
    }
}
