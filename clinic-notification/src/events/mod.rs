pub mod changes;
pub mod subscriber;
pub mod texts;
