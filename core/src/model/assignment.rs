use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::model::slot::ScheduleSlot;

/// Link between a person and a hobby. Owns the weekly slots.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct HobbyAssignment {
    pub id: Uuid,
    pub partner_id: Uuid,
    pub hobby_id: Uuid,
}

impl HobbyAssignment {
    pub fn new(partner_id: Uuid, hobby_id: Uuid) -> Self {
        Self {
            id: Uuid::new_v4(),
            partner_id,
            hobby_id,
        }
    }
}

/// "Monday 09:30-17:15, Tuesday 10:00-11:00"
///
/// Slots are listed in the order given; callers pass them already sorted.
pub fn schedule_summary(slots: &[ScheduleSlot]) -> String {
    if slots.is_empty() {
        return "No schedule specified".to_string();
    }
    slots
        .iter()
        .map(|s| s.label())
        .collect::<Vec<_>>()
        .join(", ")
}
