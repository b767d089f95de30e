use anyhow::Result;
use uuid::Uuid;

use crate::model::assignment::HobbyAssignment;
use crate::model::hobby::{Hobby, HobbyCategory};
use crate::model::partner::Partner;
use crate::model::slot::ScheduleSlot;
use crate::model::weekday::WeekdaySymbol;

pub trait CatalogRepository {
    fn create_partner(&self, partner: Partner) -> Result<Partner>;
    fn get_partner(&self, id: &Uuid) -> Result<Partner>;
    fn list_partners(&self) -> Result<Vec<Partner>>;
    /// Removes the partner with its assignments and their slots.
    fn delete_partner(&self, id: &Uuid) -> Result<()>;

    fn create_category(&self, category: HobbyCategory) -> Result<HobbyCategory>;
    fn get_category(&self, id: &Uuid) -> Result<HobbyCategory>;
    fn list_categories(&self) -> Result<Vec<HobbyCategory>>;
    /// Removes the category and unsets it on hobbies that used it.
    fn delete_category(&self, id: &Uuid) -> Result<()>;

    fn create_hobby(&self, hobby: Hobby) -> Result<Hobby>;
    fn get_hobby(&self, id: &Uuid) -> Result<Hobby>;
    fn list_hobbies(&self) -> Result<Vec<Hobby>>;
    /// Removes the hobby with its assignments and their slots.
    fn delete_hobby(&self, id: &Uuid) -> Result<()>;
}

pub trait ScheduleRepository {
    fn create_assignment(&self, assignment: HobbyAssignment) -> Result<HobbyAssignment>;
    fn get_assignment(&self, id: &Uuid) -> Result<HobbyAssignment>;
    fn list_assignments(&self) -> Result<Vec<HobbyAssignment>>;
    /// Replaces the assignment and the given slots in one write.
    fn update_assignment(&self, assignment: &HobbyAssignment, slots: &[ScheduleSlot]) -> Result<()>;
    /// Removes the assignment and every slot it owns.
    fn delete_assignment(&self, id: &Uuid) -> Result<()>;
    /// Assignment for (partner, hobby), ignoring `excluding`.
    fn find_assignment(
        &self,
        partner_id: &Uuid,
        hobby_id: &Uuid,
        excluding: Option<&Uuid>,
    ) -> Result<Option<HobbyAssignment>>;

    fn create_slot(&self, slot: ScheduleSlot) -> Result<ScheduleSlot>;
    fn get_slot(&self, id: &Uuid) -> Result<ScheduleSlot>;
    fn list_slots(&self) -> Result<Vec<ScheduleSlot>>;
    fn update_slots(&self, slots: &[ScheduleSlot]) -> Result<()>;
    fn delete_slot(&self, id: &Uuid) -> Result<()>;
    fn list_slots_for_assignment(&self, assignment_id: &Uuid) -> Result<Vec<ScheduleSlot>>;
    /// Slots of a person, optionally restricted to one day, ignoring `excluding`.
    fn list_slots_for_partner(
        &self,
        partner_id: &Uuid,
        day: Option<WeekdaySymbol>,
        excluding: Option<&Uuid>,
    ) -> Result<Vec<ScheduleSlot>>;
}
