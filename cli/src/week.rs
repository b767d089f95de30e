use chrono::{DateTime, Utc};
use chrono_tz::Tz;
use hobbyweek_core::DayAgenda;
use tabled::settings::object::Rows;
use tabled::settings::{Color, Modify, Style};
use tabled::{Table, Tabled};

use crate::ids::short_id;

const UTC_FORMAT: &str = "%Y-%m-%d %H:%M";

#[derive(Tabled)]
struct WeekRow {
    #[tabled(rename = "Day")]
    day: String,
    #[tabled(rename = "Time")]
    time: String,
    #[tabled(rename = "Person")]
    person: String,
    #[tabled(rename = "Hobby")]
    hobby: String,
    #[tabled(rename = "Category")]
    category: String,
    #[tabled(rename = "Start")]
    start_local: String,
    #[tabled(rename = "Stop")]
    stop_local: String,
    #[tabled(rename = "Start (UTC)")]
    start_utc: String,
    #[tabled(rename = "Stop (UTC)")]
    stop_utc: String,
    #[tabled(rename = "ID")]
    id: String,
}

fn or_dash(value: Option<String>) -> String {
    value.unwrap_or_else(|| "-".to_string())
}

fn utc_cell(instant: Option<DateTime<Utc>>) -> String {
    or_dash(instant.map(|i| i.format(UTC_FORMAT).to_string()))
}

fn week_rows(agenda: &[DayAgenda]) -> Vec<WeekRow> {
    let mut rows = Vec::new();
    for day in agenda {
        for (i, entry) in day.entries.iter().enumerate() {
            let slot = &entry.slot;
            rows.push(WeekRow {
                // only the first row of a day carries its label
                day: if i == 0 { slot.day_label.clone() } else { String::new() },
                time: format!("{}-{}", slot.time_start, slot.time_end),
                person: entry.partner_name.clone(),
                hobby: entry.hobby_name.clone(),
                category: entry.category.clone(),
                start_local: or_dash(slot.start_local.clone()),
                stop_local: or_dash(slot.stop_local.clone()),
                start_utc: utc_cell(slot.start_instant),
                stop_utc: utc_cell(slot.stop_instant),
                id: short_id(&slot.id),
            });
        }
    }
    rows
}

pub fn show_week(agenda: &[DayAgenda], tz: Tz) {
    if agenda.is_empty() {
        println!("No slots scheduled.");
        return;
    }

    println!("\x1b[1;36mWeek schedule\x1b[0m ({})", tz.name());

    let mut table = Table::new(week_rows(agenda));
    table
        .with(Style::modern())
        .with(Modify::new(Rows::first()).with(Color::FG_CYAN));
    println!("{}", table);
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use hobbyweek_core::model::assignment::HobbyAssignment;
    use hobbyweek_core::usecase::weekly_agenda::AgendaEntry;
    use hobbyweek_core::{ScheduleSlot, SlotDto, WeekdaySymbol};
    use uuid::Uuid;

    fn entry(day: WeekdaySymbol, start: f64, end: f64, projected: bool) -> AgendaEntry {
        let assignment = HobbyAssignment::new(Uuid::new_v4(), Uuid::new_v4());
        let mut slot = ScheduleSlot::new(&assignment, "Chess, A. L.".to_string(), day, start, end);
        if projected {
            slot.start_instant = Utc.with_ymd_and_hms(2026, 10, 12, 12, 30, 0).single();
            slot.stop_instant = Utc.with_ymd_and_hms(2026, 10, 12, 20, 15, 0).single();
        }
        AgendaEntry {
            slot: SlotDto::from_entity(slot, &Tz::America__Sao_Paulo),
            partner_name: "Ada Lovelace".to_string(),
            hobby_name: "Chess".to_string(),
            category: "No category".to_string(),
        }
    }

    #[test]
    fn test_rows_show_local_and_utc_instants() {
        let agenda = vec![DayAgenda {
            day: WeekdaySymbol::Mon,
            entries: vec![
                entry(WeekdaySymbol::Mon, 9.5, 17.25, true),
                entry(WeekdaySymbol::Mon, 18.0, 19.0, false),
            ],
        }];

        let rows = week_rows(&agenda);

        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].day, "Monday");
        assert_eq!(rows[0].time, "09:30-17:15");
        assert_eq!(rows[0].start_local, "2026-10-12 09:30");
        assert_eq!(rows[0].stop_local, "2026-10-12 17:15");
        assert_eq!(rows[0].start_utc, "2026-10-12 12:30");
        assert_eq!(rows[0].stop_utc, "2026-10-12 20:15");

        assert_eq!(rows[1].day, "");
        assert_eq!(rows[1].start_local, "-");
        assert_eq!(rows[1].stop_utc, "-");
    }
}
