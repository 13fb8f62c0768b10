pub mod medicine_service;
pub mod schedule_service;
