use chrono::{DateTime, Utc};
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::model::slot::ScheduleSlot;
use crate::model::weekday::WeekdaySymbol;
use crate::time::format_time_of_day;

const LOCAL_FORMAT: &str = "%Y-%m-%d %H:%M";

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct SlotDto {
    pub id: Uuid,
    pub assignment_id: Uuid,
    pub partner_id: Uuid,
    pub hobby_id: Uuid,
    pub name: String,
    pub day: WeekdaySymbol,
    pub day_label: String,
    pub day_order: u8,
    pub time_start: String, // "HH:MM"
    pub time_end: String,
    pub start_instant: Option<DateTime<Utc>>,
    pub stop_instant: Option<DateTime<Utc>>,
    // Instants rendered in the display timezone
    pub start_local: Option<String>,
    pub stop_local: Option<String>,
}

impl SlotDto {
    pub fn from_entity(slot: ScheduleSlot, tz: &Tz) -> Self {
        let render = |instant: Option<DateTime<Utc>>| {
            instant.map(|i| i.with_timezone(tz).format(LOCAL_FORMAT).to_string())
        };
        Self {
            id: slot.id,
            assignment_id: slot.assignment_id,
            partner_id: slot.partner_id,
            hobby_id: slot.hobby_id,
            day_label: slot.day.full_name().to_string(),
            day_order: slot.day_order,
            time_start: format_time_of_day(slot.time_start),
            time_end: format_time_of_day(slot.time_end),
            start_local: render(slot.start_instant),
            stop_local: render(slot.stop_instant),
            start_instant: slot.start_instant,
            stop_instant: slot.stop_instant,
            name: slot.name,
            day: slot.day,
        }
    }
}
