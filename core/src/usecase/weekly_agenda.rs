use std::collections::HashMap;

use anyhow::Result;
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::model::hobby::{category_display, Hobby, HobbyCategory};
use crate::model::slot::sort_slots;
use crate::model::weekday::WeekdaySymbol;
use crate::repository::{CatalogRepository, ScheduleRepository};
use crate::service::dto::SlotDto;

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct AgendaEntry {
    pub slot: SlotDto,
    pub partner_name: String,
    pub hobby_name: String,
    pub category: String,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct DayAgenda {
    pub day: WeekdaySymbol,
    pub entries: Vec<AgendaEntry>,
}

/// Slots grouped by weekday, Sunday first. Days without slots are left out.
pub struct WeeklyAgendaUseCase<'a, R: CatalogRepository + ScheduleRepository> {
    repo: &'a R,
    timezone: Tz,
}

impl<'a, R: CatalogRepository + ScheduleRepository> WeeklyAgendaUseCase<'a, R> {
    pub fn new(repo: &'a R, timezone: Tz) -> Self {
        Self { repo, timezone }
    }

    pub fn build(&self, partner_id: Option<&Uuid>) -> Result<Vec<DayAgenda>> {
        let mut slots = match partner_id {
            Some(id) => self.repo.list_slots_for_partner(id, None, None)?,
            None => self.repo.list_slots()?,
        };
        sort_slots(&mut slots);

        let partners: HashMap<Uuid, String> = self
            .repo
            .list_partners()?
            .into_iter()
            .map(|p| (p.id, p.name))
            .collect();
        let hobbies: HashMap<Uuid, Hobby> = self
            .repo
            .list_hobbies()?
            .into_iter()
            .map(|h| (h.id, h))
            .collect();
        let categories: HashMap<Uuid, HobbyCategory> = self
            .repo
            .list_categories()?
            .into_iter()
            .map(|c| (c.id, c))
            .collect();

        let mut days: Vec<DayAgenda> = Vec::new();
        for slot in slots {
            let hobby = hobbies.get(&slot.hobby_id);
            let category = hobby
                .and_then(|h| h.category_id)
                .and_then(|id| categories.get(&id));
            let entry = AgendaEntry {
                partner_name: partners.get(&slot.partner_id).cloned().unwrap_or_default(),
                hobby_name: hobby.map(|h| h.name.clone()).unwrap_or_default(),
                category: category_display(category).to_string(),
                slot: SlotDto::from_entity(slot, &self.timezone),
            };

            // slots are sorted, so a new day always starts a new group
            match days.last_mut() {
                Some(group) if group.day == entry.slot.day => group.entries.push(entry),
                _ => days.push(DayAgenda {
                    day: entry.slot.day,
                    entries: vec![entry],
                }),
            }
        }
        Ok(days)
    }
}
