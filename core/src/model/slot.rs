use std::cmp::Ordering;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::model::assignment::HobbyAssignment;
use crate::model::weekday::WeekdaySymbol;
use crate::time::format_time_of_day;

/// One weekly recurrence of a hobby assignment.
///
/// `time_start` / `time_end` are hours as floats (14.5 = 14:30). The
/// instants are derived from day and times for the current week and must be
/// recomputed whenever those change.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct ScheduleSlot {
    pub id: Uuid,
    pub assignment_id: Uuid,
    pub partner_id: Uuid,
    pub hobby_id: Uuid,
    pub name: String,
    pub day: WeekdaySymbol,
    pub time_start: f64,
    pub time_end: f64,
    pub day_order: u8,
    pub start_instant: Option<DateTime<Utc>>,
    pub stop_instant: Option<DateTime<Utc>>,
}

impl ScheduleSlot {
    pub fn new(
        assignment: &HobbyAssignment,
        name: String,
        day: WeekdaySymbol,
        time_start: f64,
        time_end: f64,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            assignment_id: assignment.id,
            partner_id: assignment.partner_id,
            hobby_id: assignment.hobby_id,
            name,
            day,
            time_start,
            time_end,
            day_order: day.order_index(),
            start_instant: None,
            stop_instant: None,
        }
    }

    /// Replace day and times. The cached instants are cleared until the
    /// window is projected again.
    pub fn reschedule(&mut self, day: WeekdaySymbol, time_start: f64, time_end: f64) {
        self.day = day;
        self.day_order = day.order_index();
        self.time_start = time_start;
        self.time_end = time_end;
        self.start_instant = None;
        self.stop_instant = None;
    }

    /// Closed-open overlap on the same day. Touching endpoints do not overlap.
    pub fn overlaps(&self, other: &ScheduleSlot) -> bool {
        self.day == other.day
            && other.time_start < self.time_end
            && other.time_end > self.time_start
    }

    pub fn label(&self) -> String {
        format!(
            "{} {}-{}",
            self.day.full_name(),
            format_time_of_day(self.time_start),
            format_time_of_day(self.time_end)
        )
    }
}

/// Default ordering of slots: weekday, then start time.
pub fn sort_slots(slots: &mut [ScheduleSlot]) {
    slots.sort_by(|a, b| {
        a.day_order
            .cmp(&b.day_order)
            .then(a.time_start.partial_cmp(&b.time_start).unwrap_or(Ordering::Equal))
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    fn slot(day: WeekdaySymbol, start: f64, end: f64) -> ScheduleSlot {
        let assignment = HobbyAssignment::new(Uuid::new_v4(), Uuid::new_v4());
        ScheduleSlot::new(&assignment, "Swimming, A. L.".to_string(), day, start, end)
    }

    #[test]
    fn test_overlaps_closed_open() {
        let base = slot(WeekdaySymbol::Tue, 9.0, 10.0);
        assert!(!base.overlaps(&slot(WeekdaySymbol::Tue, 10.0, 11.0)));
        assert!(!base.overlaps(&slot(WeekdaySymbol::Tue, 8.0, 9.0)));
        assert!(base.overlaps(&slot(WeekdaySymbol::Tue, 9.5, 10.5)));
        assert!(base.overlaps(&slot(WeekdaySymbol::Tue, 8.0, 12.0)));
        assert!(!base.overlaps(&slot(WeekdaySymbol::Wed, 9.5, 10.5)));
    }

    #[test]
    fn test_reschedule_updates_order_and_clears_window() {
        let mut s = slot(WeekdaySymbol::Mon, 9.0, 10.0);
        s.start_instant = Some(Utc::now());
        s.stop_instant = Some(Utc::now());

        s.reschedule(WeekdaySymbol::Sat, 14.0, 15.5);

        assert_eq!(s.day_order, 6);
        assert_eq!(s.time_end, 15.5);
        assert!(s.start_instant.is_none());
        assert!(s.stop_instant.is_none());
    }

    #[test]
    fn test_sort_slots_by_day_then_start() {
        let mut slots = vec![
            slot(WeekdaySymbol::Wed, 8.0, 9.0),
            slot(WeekdaySymbol::Sun, 18.0, 19.0),
            slot(WeekdaySymbol::Wed, 7.0, 7.5),
        ];
        sort_slots(&mut slots);
        let keys: Vec<_> = slots.iter().map(|s| (s.day, s.time_start)).collect();
        assert_eq!(
            keys,
            vec![
                (WeekdaySymbol::Sun, 18.0),
                (WeekdaySymbol::Wed, 7.0),
                (WeekdaySymbol::Wed, 8.0),
            ]
        );
    }
}
