pub mod assignment;
pub mod hobby;
pub mod partner;
pub mod slot;
pub mod weekday;
