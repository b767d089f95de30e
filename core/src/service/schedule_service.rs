use std::sync::{Arc, Mutex, MutexGuard};

use anyhow::anyhow;
use chrono_tz::Tz;
use mockable::Clock;
use tracing::{debug, warn};
use uuid::Uuid;

use crate::error::ScheduleError;
use crate::model::assignment::{schedule_summary, HobbyAssignment};
use crate::model::hobby::{Hobby, HobbyCategory};
use crate::model::partner::Partner;
use crate::model::slot::{sort_slots, ScheduleSlot};
use crate::model::weekday::WeekdaySymbol;
use crate::projection::{project_for_now, resolve_timezone};
use crate::repository::{CatalogRepository, ScheduleRepository};
use crate::service::dto::SlotDto;
use crate::validation::{
    validate_no_overlap, validate_ordering, validate_time_of_day, validate_unique_assignment,
};

pub type ServiceResult<T> = Result<T, ScheduleError>;

/// Partial edit of a slot. Unset fields keep their stored value.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct SlotChanges {
    pub day: Option<WeekdaySymbol>,
    pub time_start: Option<f64>,
    pub time_end: Option<f64>,
}

/// Record management around the validator and the projector.
///
/// Every write runs read, validate, project and store while holding the
/// service's write lock, so a check never sees a snapshot that another write
/// through the same service is about to change.
pub struct ScheduleService<R> {
    repo: R,
    clock: Arc<dyn Clock>,
    timezone: Tz,
    write_lock: Mutex<()>,
}

impl<R: CatalogRepository + ScheduleRepository> ScheduleService<R> {
    pub fn new(repo: R, clock: Arc<dyn Clock>, timezone: Tz) -> Self {
        Self {
            repo,
            clock,
            timezone,
            write_lock: Mutex::new(()),
        }
    }

    /// Like [`ScheduleService::new`], resolving `timezone` by name and
    /// falling back to UTC when it is unknown.
    pub fn with_timezone_name(repo: R, clock: Arc<dyn Clock>, timezone: &str) -> Self {
        let tz = match resolve_timezone(timezone) {
            Ok(tz) => tz,
            Err(e) => {
                warn!(error = %e, "falling back to UTC");
                Tz::UTC
            }
        };
        Self::new(repo, clock, tz)
    }

    pub fn timezone(&self) -> Tz {
        self.timezone
    }

    pub fn repository(&self) -> &R {
        &self.repo
    }

    fn lock(&self) -> ServiceResult<MutexGuard<'_, ()>> {
        self.write_lock
            .lock()
            .map_err(|_| ScheduleError::Store(anyhow!("Schedule write lock poisoned")))
    }

    // Catalog

    pub fn add_partner(&self, name: &str) -> ServiceResult<Partner> {
        let name = required(name, "partner name")?;
        let mut partner = Partner::new(name);
        partner.in_organizer = true;
        let _guard = self.lock()?;
        Ok(self.repo.create_partner(partner)?)
    }

    /// People registered through the organizer.
    pub fn list_partners(&self) -> ServiceResult<Vec<Partner>> {
        let mut partners: Vec<Partner> = self
            .repo
            .list_partners()?
            .into_iter()
            .filter(|p| p.in_organizer)
            .collect();
        partners.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(partners)
    }

    pub fn remove_partner(&self, id: &Uuid) -> ServiceResult<()> {
        let _guard = self.lock()?;
        Ok(self.repo.delete_partner(id)?)
    }

    pub fn add_category(&self, name: &str) -> ServiceResult<HobbyCategory> {
        let name = required(name, "category name")?;
        let _guard = self.lock()?;
        Ok(self.repo.create_category(HobbyCategory::new(name))?)
    }

    pub fn list_categories(&self) -> ServiceResult<Vec<HobbyCategory>> {
        Ok(self.repo.list_categories()?)
    }

    pub fn remove_category(&self, id: &Uuid) -> ServiceResult<()> {
        let _guard = self.lock()?;
        Ok(self.repo.delete_category(id)?)
    }

    pub fn add_hobby(
        &self,
        name: &str,
        category_id: Option<Uuid>,
        description: Option<String>,
    ) -> ServiceResult<Hobby> {
        let name = required(name, "hobby name")?;
        let _guard = self.lock()?;
        if let Some(category_id) = category_id {
            self.repo.get_category(&category_id)?;
        }
        let mut hobby = Hobby::new(name);
        hobby.category_id = category_id;
        hobby.description = description;
        Ok(self.repo.create_hobby(hobby)?)
    }

    pub fn list_hobbies(&self) -> ServiceResult<Vec<Hobby>> {
        Ok(self.repo.list_hobbies()?)
    }

    pub fn remove_hobby(&self, id: &Uuid) -> ServiceResult<()> {
        let _guard = self.lock()?;
        Ok(self.repo.delete_hobby(id)?)
    }

    // Assignments

    pub fn assign_hobby(&self, partner_id: &Uuid, hobby_id: &Uuid) -> ServiceResult<HobbyAssignment> {
        let _guard = self.lock()?;
        self.repo.get_partner(partner_id)?;
        self.repo.get_hobby(hobby_id)?;

        let candidate = HobbyAssignment::new(*partner_id, *hobby_id);
        let existing: Vec<_> = self.repo.find_assignment(partner_id, hobby_id, None)?.into_iter().collect();
        if let Err(e) = validate_unique_assignment(&candidate, &existing) {
            warn!(partner = %partner_id, hobby = %hobby_id, "rejected duplicate assignment");
            return Err(e.into());
        }

        debug!(assignment = %candidate.id, "assignment created");
        Ok(self.repo.create_assignment(candidate)?)
    }

    /// Points an assignment at another person and/or hobby. Its slots follow,
    /// and are re-checked against the new person's schedule.
    pub fn update_assignment(
        &self,
        id: &Uuid,
        partner_id: &Uuid,
        hobby_id: &Uuid,
    ) -> ServiceResult<HobbyAssignment> {
        let _guard = self.lock()?;
        let stored = self.repo.get_assignment(id)?;
        let partner = self.repo.get_partner(partner_id)?;
        let hobby = self.repo.get_hobby(hobby_id)?;

        let candidate = HobbyAssignment {
            id: stored.id,
            partner_id: *partner_id,
            hobby_id: *hobby_id,
        };
        let existing: Vec<_> = self
            .repo
            .find_assignment(partner_id, hobby_id, Some(id))?
            .into_iter()
            .collect();
        validate_unique_assignment(&candidate, &existing)?;

        let mut slots = self.repo.list_slots_for_assignment(id)?;
        let others: Vec<ScheduleSlot> = self
            .repo
            .list_slots_for_partner(partner_id, None, None)?
            .into_iter()
            .filter(|s| s.assignment_id != stored.id)
            .collect();
        for slot in slots.iter_mut() {
            slot.partner_id = *partner_id;
            slot.hobby_id = *hobby_id;
            slot.name = slot_name(&hobby, &partner);
            validate_no_overlap(slot, &others)?;
        }

        self.repo.update_assignment(&candidate, &slots)?;
        debug!(assignment = %id, slots = slots.len(), "assignment updated");
        Ok(candidate)
    }

    pub fn remove_assignment(&self, id: &Uuid) -> ServiceResult<()> {
        let _guard = self.lock()?;
        Ok(self.repo.delete_assignment(id)?)
    }

    pub fn list_assignments(&self, partner_id: &Uuid) -> ServiceResult<Vec<HobbyAssignment>> {
        Ok(self
            .repo
            .list_assignments()?
            .into_iter()
            .filter(|a| a.partner_id == *partner_id)
            .collect())
    }

    /// "Monday 09:30-17:15, ..." or "No schedule specified".
    pub fn assignment_summary(&self, id: &Uuid) -> ServiceResult<String> {
        let mut slots = self.repo.list_slots_for_assignment(id)?;
        sort_slots(&mut slots);
        Ok(schedule_summary(&slots))
    }

    /// Hobby names of a person, or "No registered hobbies".
    pub fn hobbies_summary(&self, partner_id: &Uuid) -> ServiceResult<String> {
        let names = self
            .list_assignments(partner_id)?
            .iter()
            .map(|a| self.repo.get_hobby(&a.hobby_id).map(|h| h.name))
            .collect::<anyhow::Result<Vec<_>>>()?;
        if names.is_empty() {
            return Ok("No registered hobbies".to_string());
        }
        Ok(names.join(", "))
    }

    // Slots

    pub fn add_slot(
        &self,
        assignment_id: &Uuid,
        day: WeekdaySymbol,
        time_start: f64,
        time_end: f64,
    ) -> ServiceResult<ScheduleSlot> {
        let _guard = self.lock()?;
        let assignment = self.repo.get_assignment(assignment_id)?;
        let partner = self.repo.get_partner(&assignment.partner_id)?;
        let hobby = self.repo.get_hobby(&assignment.hobby_id)?;

        let mut slot = ScheduleSlot::new(&assignment, slot_name(&hobby, &partner), day, time_start, time_end);
        self.check_and_project(&mut slot)?;

        debug!(slot = %slot.id, label = %slot.label(), "slot created");
        Ok(self.repo.create_slot(slot)?)
    }

    pub fn update_slot(&self, id: &Uuid, changes: SlotChanges) -> ServiceResult<ScheduleSlot> {
        let _guard = self.lock()?;
        let mut slot = self.repo.get_slot(id)?;
        slot.reschedule(
            changes.day.unwrap_or(slot.day),
            changes.time_start.unwrap_or(slot.time_start),
            changes.time_end.unwrap_or(slot.time_end),
        );
        self.check_and_project(&mut slot)?;

        self.repo.update_slots(std::slice::from_ref(&slot))?;
        debug!(slot = %slot.id, label = %slot.label(), "slot updated");
        Ok(slot)
    }

    pub fn remove_slot(&self, id: &Uuid) -> ServiceResult<()> {
        let _guard = self.lock()?;
        Ok(self.repo.delete_slot(id)?)
    }

    /// Re-projects every slot into the week containing the clock's "now".
    /// Returns the number of slots whose instants changed.
    pub fn refresh_windows(&self) -> ServiceResult<usize> {
        let _guard = self.lock()?;
        let now = self.clock.utc();
        let mut changed = Vec::new();
        for mut slot in self.repo.list_slots()? {
            let window = project_for_now(&slot, now, &self.timezone);
            if slot.start_instant != Some(window.start) || slot.stop_instant != Some(window.stop) {
                slot.start_instant = Some(window.start);
                slot.stop_instant = Some(window.stop);
                changed.push(slot);
            }
        }
        if !changed.is_empty() {
            self.repo.update_slots(&changed)?;
        }
        debug!(changed = changed.len(), "slot windows refreshed");
        Ok(changed.len())
    }

    /// A person's slots in weekday/start order.
    pub fn partner_schedule(&self, partner_id: &Uuid) -> ServiceResult<Vec<SlotDto>> {
        let mut slots = self.repo.list_slots_for_partner(partner_id, None, None)?;
        sort_slots(&mut slots);
        Ok(slots
            .into_iter()
            .map(|s| SlotDto::from_entity(s, &self.timezone))
            .collect())
    }

    fn check_and_project(&self, slot: &mut ScheduleSlot) -> ServiceResult<()> {
        validate_time_of_day(slot.time_start)?;
        validate_time_of_day(slot.time_end)?;
        validate_ordering(slot)?;

        let same_day = self
            .repo
            .list_slots_for_partner(&slot.partner_id, Some(slot.day), Some(&slot.id))?;
        if let Err(e) = validate_no_overlap(slot, &same_day) {
            warn!(slot = %slot.id, conflicts = ?e.conflicts, "rejected overlapping slot");
            return Err(e.into());
        }

        let window = project_for_now(slot, self.clock.utc(), &self.timezone);
        slot.start_instant = Some(window.start);
        slot.stop_instant = Some(window.stop);
        Ok(())
    }
}

fn required(value: &str, field: &'static str) -> ServiceResult<String> {
    let value = value.trim();
    if value.is_empty() {
        return Err(ScheduleError::EmptyName(field));
    }
    Ok(value.to_string())
}

/// "Chess, A. L."
fn slot_name(hobby: &Hobby, partner: &Partner) -> String {
    format!("{}, {}", hobby.name, partner.short_name)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{OrderingError, OverlapError};
    use crate::repository::MemoryRepository;
    use chrono::{DateTime, Duration, Local, TimeZone, Utc};

    struct FixedClock {
        utc_now: DateTime<Utc>,
    }

    impl Clock for FixedClock {
        fn local(&self) -> DateTime<Local> {
            self.utc_now.with_timezone(&Local)
        }

        fn utc(&self) -> DateTime<Utc> {
            self.utc_now
        }
    }

    fn utc(y: i32, m: u32, d: u32, h: u32, min: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, m, d, h, min, 0).single().unwrap()
    }

    fn service_at(now: DateTime<Utc>, tz: Tz) -> ScheduleService<MemoryRepository> {
        ScheduleService::new(MemoryRepository::new(), Arc::new(FixedClock { utc_now: now }), tz)
    }

    fn service() -> ScheduleService<MemoryRepository> {
        service_at(utc(2026, 10, 14, 12, 0), Tz::UTC)
    }

    fn assignment(service: &ScheduleService<MemoryRepository>, person: &str, hobby: &str) -> HobbyAssignment {
        let partner = service.add_partner(person).unwrap();
        let hobby = service.add_hobby(hobby, None, None).unwrap();
        service.assign_hobby(&partner.id, &hobby.id).unwrap()
    }

    #[test]
    fn test_tuesday_scenario() {
        let service = service();
        let chess = assignment(&service, "Ada Lovelace", "Chess");

        let first = service.add_slot(&chess.id, WeekdaySymbol::Tue, 9.0, 10.0).unwrap();
        assert_eq!(first.name, "Chess, A. L.");

        assert!(service.add_slot(&chess.id, WeekdaySymbol::Tue, 10.0, 11.0).is_ok());

        match service.add_slot(&chess.id, WeekdaySymbol::Tue, 9.5, 10.5) {
            Err(ScheduleError::Overlap(OverlapError { conflicts })) => {
                assert_eq!(conflicts, vec!["Chess, A. L.".to_string(); 2]);
            }
            other => panic!("expected overlap, got {:?}", other),
        }

        assert!(service.add_slot(&chess.id, WeekdaySymbol::Wed, 9.5, 10.5).is_ok());
        assert_eq!(service.repository().list_slots().unwrap().len(), 3);
    }

    #[test]
    fn test_overlap_names_only_conflicting_slot() {
        let service = service();
        let chess = assignment(&service, "Ada Lovelace", "Chess");
        service.add_slot(&chess.id, WeekdaySymbol::Tue, 9.0, 10.0).unwrap();

        let err = service.add_slot(&chess.id, WeekdaySymbol::Tue, 9.5, 9.75).unwrap_err();
        match err {
            ScheduleError::Overlap(e) => assert_eq!(e.conflicts, vec!["Chess, A. L.".to_string()]),
            other => panic!("expected overlap, got {:?}", other),
        }
    }

    #[test]
    fn test_overlap_spans_hobbies_of_same_person() {
        let service = service();
        let partner = service.add_partner("Ada Lovelace").unwrap();
        let chess = service.add_hobby("Chess", None, None).unwrap();
        let yoga = service.add_hobby("Yoga", None, None).unwrap();
        let chess_assignment = service.assign_hobby(&partner.id, &chess.id).unwrap();
        let yoga_assignment = service.assign_hobby(&partner.id, &yoga.id).unwrap();

        service.add_slot(&chess_assignment.id, WeekdaySymbol::Mon, 18.0, 19.0).unwrap();
        assert!(matches!(
            service.add_slot(&yoga_assignment.id, WeekdaySymbol::Mon, 18.5, 19.5),
            Err(ScheduleError::Overlap(_))
        ));

        // another person is unaffected
        let other = assignment(&service, "Grace Hopper", "Rowing");
        assert!(service.add_slot(&other.id, WeekdaySymbol::Mon, 18.5, 19.5).is_ok());
    }

    #[test]
    fn test_inverted_and_out_of_range_times_rejected() {
        let service = service();
        let chess = assignment(&service, "Ada Lovelace", "Chess");

        assert!(matches!(
            service.add_slot(&chess.id, WeekdaySymbol::Fri, 11.0, 10.0),
            Err(ScheduleError::Ordering(OrderingError::EndBeforeStart { .. }))
        ));
        assert!(matches!(
            service.add_slot(&chess.id, WeekdaySymbol::Fri, 23.0, 25.0),
            Err(ScheduleError::Ordering(OrderingError::OutOfRange { .. }))
        ));
        assert!(service.add_slot(&chess.id, WeekdaySymbol::Fri, 10.0, 10.0).is_ok());
        assert!(service.repository().list_slots().unwrap().len() == 1);
    }

    #[test]
    fn test_failed_update_leaves_slot_untouched() {
        let service = service();
        let chess = assignment(&service, "Ada Lovelace", "Chess");
        let morning = service.add_slot(&chess.id, WeekdaySymbol::Thu, 9.0, 10.0).unwrap();
        let noon = service.add_slot(&chess.id, WeekdaySymbol::Thu, 12.0, 13.0).unwrap();

        let changes = SlotChanges {
            time_start: Some(9.5),
            ..Default::default()
        };
        assert!(service.update_slot(&noon.id, changes).is_err());
        assert_eq!(service.repository().get_slot(&noon.id).unwrap(), noon);

        // moving within its own interval does not collide with itself
        let changes = SlotChanges {
            time_start: Some(9.25),
            time_end: Some(10.0),
            ..Default::default()
        };
        let moved = service.update_slot(&morning.id, changes).unwrap();
        assert_eq!(moved.time_start, 9.25);
    }

    #[test]
    fn test_update_slot_recomputes_window() {
        let service = service();
        let chess = assignment(&service, "Ada Lovelace", "Chess");
        let slot = service.add_slot(&chess.id, WeekdaySymbol::Mon, 9.0, 10.0).unwrap();
        assert_eq!(slot.start_instant, Some(utc(2026, 10, 12, 9, 0)));

        let changes = SlotChanges {
            day: Some(WeekdaySymbol::Sat),
            ..Default::default()
        };
        let moved = service.update_slot(&slot.id, changes).unwrap();
        assert_eq!(moved.day_order, 6);
        assert_eq!(moved.start_instant, Some(utc(2026, 10, 17, 9, 0)));
        assert_eq!(moved.stop_instant, Some(utc(2026, 10, 17, 10, 0)));
    }

    #[test]
    fn test_window_in_sao_paulo() {
        let service = service_at(utc(2026, 10, 14, 12, 0), Tz::America__Sao_Paulo);
        let chess = assignment(&service, "Ada Lovelace", "Chess");
        let slot = service.add_slot(&chess.id, WeekdaySymbol::Mon, 9.5, 17.25).unwrap();

        let (start, stop) = (slot.start_instant.unwrap(), slot.stop_instant.unwrap());
        assert_eq!(start, utc(2026, 10, 12, 12, 30));
        assert_eq!(stop - start, Duration::minutes(7 * 60 + 45));
    }

    #[test]
    fn test_unknown_timezone_falls_back_to_utc() {
        let clock = Arc::new(FixedClock { utc_now: utc(2026, 10, 14, 12, 0) });
        let service = ScheduleService::with_timezone_name(MemoryRepository::new(), clock, "Not/AZone");
        assert_eq!(service.timezone(), Tz::UTC);
    }

    #[test]
    fn test_duplicate_assignment_rejected() {
        let service = service();
        let partner = service.add_partner("Ada Lovelace").unwrap();
        let hobby = service.add_hobby("Chess", None, None).unwrap();
        let stored = service.assign_hobby(&partner.id, &hobby.id).unwrap();

        match service.assign_hobby(&partner.id, &hobby.id) {
            Err(ScheduleError::Duplicate(e)) => assert_eq!(e.existing_id, stored.id),
            other => panic!("expected duplicate, got {:?}", other),
        }

        // saving the stored assignment unchanged is not a duplicate
        assert!(service.update_assignment(&stored.id, &partner.id, &hobby.id).is_ok());
    }

    #[test]
    fn test_update_assignment_moves_slots_to_new_person() {
        let service = service();
        let chess = assignment(&service, "Ada Lovelace", "Chess");
        let slot = service.add_slot(&chess.id, WeekdaySymbol::Tue, 9.0, 10.0).unwrap();

        let grace = assignment(&service, "Grace Hopper", "Rowing");
        service.add_slot(&grace.id, WeekdaySymbol::Tue, 9.5, 10.5).unwrap();

        // Grace is busy on Tuesday morning
        assert!(matches!(
            service.update_assignment(&chess.id, &grace.partner_id, &chess.hobby_id),
            Err(ScheduleError::Overlap(_))
        ));
        assert_eq!(service.repository().get_slot(&slot.id).unwrap().partner_id, chess.partner_id);

        let linus = service.add_partner("Linus Torvalds").unwrap();
        service.update_assignment(&chess.id, &linus.id, &chess.hobby_id).unwrap();
        let moved = service.repository().get_slot(&slot.id).unwrap();
        assert_eq!(moved.partner_id, linus.id);
        assert_eq!(moved.name, "Chess, L. T.");
    }

    #[test]
    fn test_remove_assignment_cascades() {
        let service = service();
        let chess = assignment(&service, "Ada Lovelace", "Chess");
        service.add_slot(&chess.id, WeekdaySymbol::Tue, 9.0, 10.0).unwrap();

        service.remove_assignment(&chess.id).unwrap();

        assert!(service.partner_schedule(&chess.partner_id).unwrap().is_empty());
        assert_eq!(service.hobbies_summary(&chess.partner_id).unwrap(), "No registered hobbies");
    }

    #[test]
    fn test_summaries_and_schedule_order() {
        let service = service();
        let chess = assignment(&service, "Ada Lovelace", "Chess");
        assert_eq!(service.assignment_summary(&chess.id).unwrap(), "No schedule specified");

        service.add_slot(&chess.id, WeekdaySymbol::Tue, 10.0, 11.0).unwrap();
        service.add_slot(&chess.id, WeekdaySymbol::Mon, 9.5, 17.25).unwrap();

        assert_eq!(
            service.assignment_summary(&chess.id).unwrap(),
            "Monday 09:30-17:15, Tuesday 10:00-11:00"
        );
        assert_eq!(service.hobbies_summary(&chess.partner_id).unwrap(), "Chess");

        let days: Vec<_> = service
            .partner_schedule(&chess.partner_id)
            .unwrap()
            .into_iter()
            .map(|dto| dto.day)
            .collect();
        assert_eq!(days, vec![WeekdaySymbol::Mon, WeekdaySymbol::Tue]);
    }

    #[test]
    fn test_refresh_windows_moves_to_new_week() {
        let repo = MemoryRepository::new();
        let first_week = ScheduleService::new(repo, Arc::new(FixedClock { utc_now: utc(2026, 10, 14, 12, 0) }), Tz::UTC);
        let chess = assignment(&first_week, "Ada Lovelace", "Chess");
        let slot = first_week.add_slot(&chess.id, WeekdaySymbol::Mon, 9.0, 10.0).unwrap();
        assert_eq!(first_week.refresh_windows().unwrap(), 0);

        let ScheduleService { repo, .. } = first_week;
        let next_week = ScheduleService::new(repo, Arc::new(FixedClock { utc_now: utc(2026, 10, 20, 12, 0) }), Tz::UTC);
        assert_eq!(next_week.refresh_windows().unwrap(), 1);
        assert_eq!(
            next_week.repository().get_slot(&slot.id).unwrap().start_instant,
            Some(utc(2026, 10, 19, 9, 0))
        );
    }

    #[test]
    fn test_unknown_records_are_not_found() {
        let service = service();
        let missing = Uuid::new_v4();

        assert!(matches!(
            service.add_slot(&missing, WeekdaySymbol::Mon, 9.0, 10.0),
            Err(ScheduleError::NotFound { kind: "Assignment", id }) if id == missing
        ));
        assert!(matches!(
            service.update_slot(&missing, SlotChanges::default()),
            Err(ScheduleError::NotFound { kind: "Slot", .. })
        ));

        let partner = service.add_partner("Ada Lovelace").unwrap();
        assert!(matches!(
            service.assign_hobby(&partner.id, &missing),
            Err(ScheduleError::NotFound { kind: "Hobby", .. })
        ));
        assert!(matches!(
            service.update_assignment(&missing, &partner.id, &missing),
            Err(ScheduleError::NotFound { kind: "Assignment", .. })
        ));
        assert!(matches!(
            service.remove_slot(&missing),
            Err(ScheduleError::NotFound { kind: "Slot", .. })
        ));
    }

    #[test]
    fn test_remove_partner_cascades_to_slots() {
        let service = service();
        let chess = assignment(&service, "Ada Lovelace", "Chess");
        service.add_slot(&chess.id, WeekdaySymbol::Tue, 9.0, 10.0).unwrap();
        let other = assignment(&service, "Grace Hopper", "Rowing");
        let kept = service.add_slot(&other.id, WeekdaySymbol::Tue, 9.0, 10.0).unwrap();

        service.remove_partner(&chess.partner_id).unwrap();

        let repo = service.repository();
        assert!(repo.list_assignments().unwrap().iter().all(|a| a.id != chess.id));
        let slots = repo.list_slots().unwrap();
        assert_eq!(slots.len(), 1);
        assert_eq!(slots[0].id, kept.id);
        assert!(service.list_partners().unwrap().iter().all(|p| p.id != chess.partner_id));
    }

    #[test]
    fn test_remove_hobby_cascades_to_every_person() {
        let service = service();
        let ada = service.add_partner("Ada Lovelace").unwrap();
        let grace = service.add_partner("Grace Hopper").unwrap();
        let chess = service.add_hobby("Chess", None, None).unwrap();
        for partner in [&ada, &grace] {
            let a = service.assign_hobby(&partner.id, &chess.id).unwrap();
            service.add_slot(&a.id, WeekdaySymbol::Sun, 15.0, 17.0).unwrap();
        }

        service.remove_hobby(&chess.id).unwrap();

        assert!(service.repository().list_assignments().unwrap().is_empty());
        assert!(service.repository().list_slots().unwrap().is_empty());
        assert_eq!(service.hobbies_summary(&grace.id).unwrap(), "No registered hobbies");
        // slot times are free again
        let rowing = service.add_hobby("Rowing", None, None).unwrap();
        let a = service.assign_hobby(&ada.id, &rowing.id).unwrap();
        assert!(service.add_slot(&a.id, WeekdaySymbol::Sun, 15.0, 17.0).is_ok());
    }

    #[test]
    fn test_remove_category_keeps_hobbies() {
        let service = service();
        let sports = service.add_category("Sports").unwrap();
        let rowing = service.add_hobby("Rowing", Some(sports.id), None).unwrap();

        service.remove_category(&sports.id).unwrap();

        assert!(service.list_categories().unwrap().is_empty());
        let hobbies = service.list_hobbies().unwrap();
        assert_eq!(hobbies.len(), 1);
        assert_eq!(hobbies[0].id, rowing.id);
        assert_eq!(hobbies[0].category_id, None);
        assert!(matches!(
            service.add_hobby("Kayak", Some(sports.id), None),
            Err(ScheduleError::NotFound { kind: "Category", .. })
        ));
    }

    #[test]
    fn test_empty_names_rejected() {
        let service = service();
        assert!(matches!(service.add_partner("   "), Err(ScheduleError::EmptyName(_))));
        assert!(matches!(service.add_hobby("", None, None), Err(ScheduleError::EmptyName(_))));
    }

    #[test]
    fn test_listing_hides_partners_outside_organizer() {
        let service = service();
        service.add_partner("Ada Lovelace").unwrap();
        service
            .repository()
            .create_partner(Partner::new("External Contact".to_string()))
            .unwrap();
        let names: Vec<_> = service.list_partners().unwrap().into_iter().map(|p| p.name).collect();
        assert_eq!(names, vec!["Ada Lovelace".to_string()]);
    }
}
