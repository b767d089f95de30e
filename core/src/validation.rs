//! Consistency checks for a person's weekly slots and hobby assignments.
//!
//! Every check is a pure function over the candidate record and the records
//! the caller fetched from the store. The caller runs them all before
//! writing and aborts the write on the first failure.

use crate::error::{DuplicateError, OrderingError, OverlapError};
use crate::model::assignment::HobbyAssignment;
use crate::model::slot::ScheduleSlot;

/// Hour floats must be finite and within `[0, 24)`.
pub fn validate_time_of_day(time: f64) -> Result<(), OrderingError> {
    if time.is_finite() && (0.0..24.0).contains(&time) {
        Ok(())
    } else {
        Err(OrderingError::OutOfRange { value: time })
    }
}

/// Rejects slots that end before they start. Zero-length slots pass.
pub fn validate_ordering(slot: &ScheduleSlot) -> Result<(), OrderingError> {
    if slot.time_end < slot.time_start {
        return Err(OrderingError::EndBeforeStart {
            start: slot.time_start,
            end: slot.time_end,
        });
    }
    Ok(())
}

/// Rejects a slot that overlaps any other slot of the same person on the same
/// day. `existing` holds that person's other slots; the candidate itself is
/// skipped if present so edits do not collide with their stored version.
pub fn validate_no_overlap(
    slot: &ScheduleSlot,
    existing: &[ScheduleSlot],
) -> Result<(), OverlapError> {
    let conflicts: Vec<String> = existing
        .iter()
        .filter(|other| other.id != slot.id)
        .filter(|other| slot.overlaps(other))
        .map(|other| other.name.clone())
        .collect();

    if conflicts.is_empty() {
        Ok(())
    } else {
        Err(OverlapError { conflicts })
    }
}

/// A person may hold each hobby once.
pub fn validate_unique_assignment(
    candidate: &HobbyAssignment,
    existing: &[HobbyAssignment],
) -> Result<(), DuplicateError> {
    match existing.iter().find(|a| {
        a.id != candidate.id
            && a.partner_id == candidate.partner_id
            && a.hobby_id == candidate.hobby_id
    }) {
        Some(found) => Err(DuplicateError {
            partner_id: candidate.partner_id,
            hobby_id: candidate.hobby_id,
            existing_id: found.id,
        }),
        None => Ok(()),
    }
}
