use anyhow::Result;
use serde::{Deserialize, Serialize};
use tracing::info;
use uuid::Uuid;

use crate::error::RecordNotFound;
use crate::model::assignment::HobbyAssignment;
use crate::model::hobby::{Hobby, HobbyCategory};
use crate::model::partner::Partner;
use crate::model::slot::ScheduleSlot;
use crate::model::weekday::WeekdaySymbol;
use crate::repository::traits::{CatalogRepository, ScheduleRepository};

/// Everything the organizer stores, persisted as a single document.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
pub struct StoreDocument {
    #[serde(default)]
    pub partners: Vec<Partner>,
    #[serde(default)]
    pub categories: Vec<HobbyCategory>,
    #[serde(default)]
    pub hobbies: Vec<Hobby>,
    #[serde(default)]
    pub assignments: Vec<HobbyAssignment>,
    #[serde(default)]
    pub slots: Vec<ScheduleSlot>,
}

/// Storage that can load and save a whole [`StoreDocument`].
///
/// Both repository traits are implemented on top of it, so a backend only has
/// to provide the two operations below.
pub trait DocumentBackend {
    fn load(&self) -> Result<StoreDocument>;
    fn save(&self, doc: &StoreDocument) -> Result<()>;

    fn modify<T>(&self, f: impl FnOnce(&mut StoreDocument) -> Result<T>) -> Result<T> {
        let mut doc = self.load()?;
        let out = f(&mut doc)?;
        self.save(&doc)?;
        Ok(out)
    }
}

fn find<'a, T>(items: &'a [T], id: &Uuid, kind: &'static str, key: impl Fn(&T) -> Uuid) -> Result<&'a T> {
    items
        .iter()
        .find(|item| key(item) == *id)
        .ok_or_else(|| RecordNotFound { kind, id: *id }.into())
}

fn replace<T>(items: &mut [T], item: &T, id: Uuid, kind: &'static str, key: impl Fn(&T) -> Uuid) -> Result<()>
where
    T: Clone,
{
    match items.iter_mut().find(|existing| key(existing) == id) {
        Some(entry) => {
            *entry = item.clone();
            Ok(())
        }
        None => Err(RecordNotFound { kind, id }.into()),
    }
}

impl StoreDocument {
    fn remove_assignments_where(&mut self, pred: impl Fn(&HobbyAssignment) -> bool) {
        let removed: Vec<Uuid> = self
            .assignments
            .iter()
            .filter(|a| pred(a))
            .map(|a| a.id)
            .collect();
        if removed.is_empty() {
            return;
        }
        self.assignments.retain(|a| !removed.contains(&a.id));
        let before = self.slots.len();
        self.slots.retain(|s| !removed.contains(&s.assignment_id));
        info!(
            assignments = removed.len(),
            slots = before - self.slots.len(),
            "cascade removed assignments"
        );
    }
}

impl<B: DocumentBackend> CatalogRepository for B {
    fn create_partner(&self, partner: Partner) -> Result<Partner> {
        self.modify(|doc| {
            doc.partners.push(partner.clone());
            Ok(partner)
        })
    }

    fn get_partner(&self, id: &Uuid) -> Result<Partner> {
        let doc = self.load()?;
        find(&doc.partners, id, "Partner", |p| p.id).cloned()
    }

    fn list_partners(&self) -> Result<Vec<Partner>> {
        Ok(self.load()?.partners)
    }

    fn delete_partner(&self, id: &Uuid) -> Result<()> {
        self.modify(|doc| {
            let initial_len = doc.partners.len();
            doc.partners.retain(|p| p.id != *id);
            if doc.partners.len() == initial_len {
                return Err(RecordNotFound { kind: "Partner", id: *id }.into());
            }
            doc.remove_assignments_where(|a| a.partner_id == *id);
            Ok(())
        })
    }

    fn create_category(&self, category: HobbyCategory) -> Result<HobbyCategory> {
        self.modify(|doc| {
            doc.categories.push(category.clone());
            Ok(category)
        })
    }

    fn get_category(&self, id: &Uuid) -> Result<HobbyCategory> {
        let doc = self.load()?;
        find(&doc.categories, id, "Category", |c| c.id).cloned()
    }

    fn list_categories(&self) -> Result<Vec<HobbyCategory>> {
        Ok(self.load()?.categories)
    }

    fn delete_category(&self, id: &Uuid) -> Result<()> {
        self.modify(|doc| {
            let initial_len = doc.categories.len();
            doc.categories.retain(|c| c.id != *id);
            if doc.categories.len() == initial_len {
                return Err(RecordNotFound { kind: "Category", id: *id }.into());
            }
            for hobby in doc.hobbies.iter_mut().filter(|h| h.category_id == Some(*id)) {
                hobby.category_id = None;
            }
            Ok(())
        })
    }

    fn create_hobby(&self, hobby: Hobby) -> Result<Hobby> {
        self.modify(|doc| {
            doc.hobbies.push(hobby.clone());
            Ok(hobby)
        })
    }

    fn get_hobby(&self, id: &Uuid) -> Result<Hobby> {
        let doc = self.load()?;
        find(&doc.hobbies, id, "Hobby", |h| h.id).cloned()
    }

    fn list_hobbies(&self) -> Result<Vec<Hobby>> {
        Ok(self.load()?.hobbies)
    }

    fn delete_hobby(&self, id: &Uuid) -> Result<()> {
        self.modify(|doc| {
            let initial_len = doc.hobbies.len();
            doc.hobbies.retain(|h| h.id != *id);
            if doc.hobbies.len() == initial_len {
                return Err(RecordNotFound { kind: "Hobby", id: *id }.into());
            }
            doc.remove_assignments_where(|a| a.hobby_id == *id);
            Ok(())
        })
    }
}

impl<B: DocumentBackend> ScheduleRepository for B {
    fn create_assignment(&self, assignment: HobbyAssignment) -> Result<HobbyAssignment> {
        self.modify(|doc| {
            doc.assignments.push(assignment.clone());
            Ok(assignment)
        })
    }

    fn get_assignment(&self, id: &Uuid) -> Result<HobbyAssignment> {
        let doc = self.load()?;
        find(&doc.assignments, id, "Assignment", |a| a.id).cloned()
    }

    fn list_assignments(&self) -> Result<Vec<HobbyAssignment>> {
        Ok(self.load()?.assignments)
    }

    fn update_assignment(&self, assignment: &HobbyAssignment, slots: &[ScheduleSlot]) -> Result<()> {
        self.modify(|doc| {
            replace(&mut doc.assignments, assignment, assignment.id, "Assignment", |a| a.id)?;
            for slot in slots {
                replace(&mut doc.slots, slot, slot.id, "Slot", |s| s.id)?;
            }
            Ok(())
        })
    }

    fn delete_assignment(&self, id: &Uuid) -> Result<()> {
        self.modify(|doc| {
            if !doc.assignments.iter().any(|a| a.id == *id) {
                return Err(RecordNotFound { kind: "Assignment", id: *id }.into());
            }
            doc.remove_assignments_where(|a| a.id == *id);
            Ok(())
        })
    }

    fn find_assignment(
        &self,
        partner_id: &Uuid,
        hobby_id: &Uuid,
        excluding: Option<&Uuid>,
    ) -> Result<Option<HobbyAssignment>> {
        let doc = self.load()?;
        Ok(doc.assignments.into_iter().find(|a| {
            a.partner_id == *partner_id && a.hobby_id == *hobby_id && Some(&a.id) != excluding
        }))
    }

    fn create_slot(&self, slot: ScheduleSlot) -> Result<ScheduleSlot> {
        self.modify(|doc| {
            if !doc.assignments.iter().any(|a| a.id == slot.assignment_id) {
                return Err(RecordNotFound { kind: "Assignment", id: slot.assignment_id }.into());
            }
            doc.slots.push(slot.clone());
            Ok(slot)
        })
    }

    fn get_slot(&self, id: &Uuid) -> Result<ScheduleSlot> {
        let doc = self.load()?;
        find(&doc.slots, id, "Slot", |s| s.id).cloned()
    }

    fn list_slots(&self) -> Result<Vec<ScheduleSlot>> {
        Ok(self.load()?.slots)
    }

    fn update_slots(&self, slots: &[ScheduleSlot]) -> Result<()> {
        self.modify(|doc| {
            for slot in slots {
                replace(&mut doc.slots, slot, slot.id, "Slot", |s| s.id)?;
            }
            Ok(())
        })
    }

    fn delete_slot(&self, id: &Uuid) -> Result<()> {
        self.modify(|doc| {
            let initial_len = doc.slots.len();
            doc.slots.retain(|s| s.id != *id);
            if doc.slots.len() == initial_len {
                return Err(RecordNotFound { kind: "Slot", id: *id }.into());
            }
            Ok(())
        })
    }

    fn list_slots_for_assignment(&self, assignment_id: &Uuid) -> Result<Vec<ScheduleSlot>> {
        let doc = self.load()?;
        Ok(doc
            .slots
            .into_iter()
            .filter(|s| s.assignment_id == *assignment_id)
            .collect())
    }

    fn list_slots_for_partner(
        &self,
        partner_id: &Uuid,
        day: Option<WeekdaySymbol>,
        excluding: Option<&Uuid>,
    ) -> Result<Vec<ScheduleSlot>> {
        let doc = self.load()?;
        Ok(doc
            .slots
            .into_iter()
            .filter(|s| s.partner_id == *partner_id)
            .filter(|s| day.map_or(true, |d| s.day == d))
            .filter(|s| Some(&s.id) != excluding)
            .collect())
    }
}
