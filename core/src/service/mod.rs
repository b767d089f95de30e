pub mod dto;
pub mod schedule_service;
