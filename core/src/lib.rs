pub mod config;
pub mod error;
pub mod model;
pub mod projection;
pub mod repository;
pub mod service;
pub mod time;
pub mod usecase;
pub mod validation;

pub use config::Settings;
pub use error::{DuplicateError, InvalidTimezoneError, OrderingError, OverlapError, ScheduleError};
pub use model::assignment::HobbyAssignment;
pub use model::hobby::{Hobby, HobbyCategory};
pub use model::partner::Partner;
pub use model::slot::ScheduleSlot;
pub use model::weekday::WeekdaySymbol;
pub use projection::{project_slot_window, project_week_start, resolve_timezone, SlotWindow};
pub use repository::{CatalogRepository, FileRepository, MemoryRepository, ScheduleRepository};
pub use service::dto::SlotDto;
pub use service::schedule_service::{ScheduleService, SlotChanges};
pub use time::{format_time_of_day, parse_time_of_day};
pub use usecase::weekly_agenda::{DayAgenda, WeeklyAgendaUseCase};
pub use validation::{validate_no_overlap, validate_ordering, validate_unique_assignment};
