use thiserror::Error;
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum OrderingError {
    #[error("end time {end} must be greater than or equal to start time {start}")]
    EndBeforeStart { start: f64, end: f64 },
    #[error("time {value} is outside the 00:00-24:00 range")]
    OutOfRange { value: f64 },
}

/// Carries the display name of every slot the candidate collides with.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("this activity overlaps with an existing one: {}", .conflicts.join(", "))]
pub struct OverlapError {
    pub conflicts: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("this hobby is already registered for this person")]
pub struct DuplicateError {
    pub partner_id: Uuid,
    pub hobby_id: Uuid,
    pub existing_id: Uuid,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown timezone '{0}'")]
pub struct InvalidTimezoneError(pub String);

/// Raised by stores when a keyed lookup finds nothing.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{kind} with ID {id} not found")]
pub struct RecordNotFound {
    pub kind: &'static str,
    pub id: Uuid,
}

#[derive(Debug, Error)]
pub enum ScheduleError {
    #[error(transparent)]
    Ordering(#[from] OrderingError),
    #[error(transparent)]
    Overlap(#[from] OverlapError),
    #[error(transparent)]
    Duplicate(#[from] DuplicateError),
    #[error(transparent)]
    InvalidTimezone(#[from] InvalidTimezoneError),
    #[error("{0} must not be empty")]
    EmptyName(&'static str),
    #[error("{kind} with ID {id} not found")]
    NotFound { kind: &'static str, id: Uuid },
    #[error(transparent)]
    Store(anyhow::Error),
}

// Store errors stay opaque unless they are a missing record.
impl From<anyhow::Error> for ScheduleError {
    fn from(err: anyhow::Error) -> Self {
        match err.downcast::<RecordNotFound>() {
            Ok(missing) => ScheduleError::NotFound {
                kind: missing.kind,
                id: missing.id,
            },
            Err(err) => ScheduleError::Store(err),
        }
    }
}
