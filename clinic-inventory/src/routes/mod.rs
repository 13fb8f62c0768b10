pub mod health;
pub mod medicines;
pub mod schedules;
