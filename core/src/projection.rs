//! Projection of weekly slots onto absolute instants.
//!
//! A slot only knows a weekday and two hour floats. To place it on a
//! calendar we anchor it to the current week, which starts on the most recent
//! Sunday at 00:00 in the caller's timezone, and convert the resulting local
//! wall-clock times to UTC. All functions take `now` and the timezone as
//! arguments; nothing here reads the system clock or any ambient context.

use chrono::{DateTime, Datelike, Duration, LocalResult, NaiveDate, NaiveDateTime, NaiveTime, Offset, TimeZone, Utc};
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::InvalidTimezoneError;
use crate::model::slot::ScheduleSlot;
use crate::time::split_hours;

/// Absolute start/stop of a slot's occurrence in the anchored week.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub struct SlotWindow {
    pub start: DateTime<Utc>,
    pub stop: DateTime<Utc>,
}

/// Parse an IANA timezone name.
pub fn resolve_timezone(name: &str) -> Result<Tz, InvalidTimezoneError> {
    name.trim()
        .parse::<Tz>()
        .map_err(|_| InvalidTimezoneError(name.to_string()))
}

/// Most recent Sunday 00:00 local time (today, if today is Sunday), in UTC.
pub fn project_week_start(now: DateTime<Utc>, tz: &Tz) -> DateTime<Utc> {
    let local = now.with_timezone(tz);
    let days_back = local.weekday().num_days_from_sunday() as i64;
    let sunday = local.date_naive() - Duration::days(days_back);
    localize(tz, sunday.and_time(NaiveTime::MIN))
}

/// Start and stop instants of `slot` in the week anchored at `week_start`.
///
/// Start and stop are derived independently from the same target date, so a
/// stop time that rounds up to 24:00 lands on the following day even when the
/// start does not.
pub fn project_slot_window(slot: &ScheduleSlot, week_start: DateTime<Utc>, tz: &Tz) -> SlotWindow {
    let anchor = week_start.with_timezone(tz).date_naive();
    let target_date = anchor + Duration::days(slot.day.order_index() as i64);

    let window = SlotWindow {
        start: localize(tz, hour_on_date(target_date, slot.time_start)),
        stop: localize(tz, hour_on_date(target_date, slot.time_end)),
    };
    debug!(
        slot = %slot.id,
        day = %slot.day,
        start = %window.start,
        stop = %window.stop,
        "projected slot window"
    );
    window
}

/// Project `slot` into the week containing `now`.
pub fn project_for_now(slot: &ScheduleSlot, now: DateTime<Utc>, tz: &Tz) -> SlotWindow {
    project_slot_window(slot, project_week_start(now, tz), tz)
}

fn hour_on_date(date: NaiveDate, time: f64) -> NaiveDateTime {
    let (mut hours, minutes) = split_hours(time);
    let mut date = date;
    if hours >= 24 {
        hours -= 24;
        date += Duration::days(1);
    }
    date.and_time(NaiveTime::MIN) + Duration::hours(hours) + Duration::minutes(minutes)
}

/// Local wall-clock time to UTC.
///
/// A repeated hour (DST ending) resolves to the later, standard-time reading.
/// A skipped hour (DST starting) is read with the offset in force before the
/// transition, which moves it forward past the gap.
fn localize(tz: &Tz, naive: NaiveDateTime) -> DateTime<Utc> {
    match tz.from_local_datetime(&naive) {
        LocalResult::Single(dt) => dt.with_timezone(&Utc),
        LocalResult::Ambiguous(_, later) => later.with_timezone(&Utc),
        LocalResult::None => {
            let before = tz.offset_from_utc_datetime(&(naive - Duration::days(1))).fix();
            let utc = naive - Duration::seconds(before.local_minus_utc() as i64);
            Utc.from_utc_datetime(&utc)
        }
    }
}
