use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// RabbitMQ event envelope wrapping all domain events.
///
/// Routing key format: `clinic.{domain}.{entity}.{action}`
/// Example: `clinic.inventory.medicine.created`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Event<T: Serialize> {
    pub id: Uuid,
    pub source: String,
    pub event_type: String,
    pub timestamp: DateTime<Utc>,
    pub user_id: Option<Uuid>,
    pub data: T,
}

impl<T: Serialize> Event<T> {
    pub fn new(source: impl Into<String>, event_type: impl Into<String>, data: T) -> Self {
        Self {
            id: Uuid::now_v7(),
            source: source.into(),
            event_type: event_type.into(),
            timestamp: Utc::now(),
            user_id: None,
            data,
        }
    }

    pub fn with_user(mut self, user_id: Uuid) -> Self {
        self.user_id = Some(user_id);
        self
    }
}

/// RabbitMQ routing keys
pub mod routing_keys {
    // Auth events
    pub const AUTH_USER_REGISTERED: &str = "clinic.auth.user.registered";

    // Inventory events
    pub const MEDICINE_CREATED: &str = "clinic.inventory.medicine.created";
    pub const MEDICINE_STATUS_CHANGED: &str = "clinic.inventory.medicine.status_changed";
    pub const MEDICINE_DELETED: &str = "clinic.inventory.medicine.deleted";
    pub const SCHEDULE_CREATED: &str = "clinic.inventory.schedule.created";
    pub const SCHEDULE_STATUS_CHANGED: &str = "clinic.inventory.schedule.status_changed";
    pub const SCHEDULE_DELETED: &str = "clinic.inventory.schedule.deleted";
}

/// Common event data payloads
pub mod payloads {
    use serde::{Deserialize, Serialize};
    use uuid::Uuid;

    #[derive(Debug, Clone, Serialize, Deserialize)]
    pub struct UserRegistered {
        pub user_id: Uuid,
        pub name: String,
        pub email: String,
    }

    #[derive(Debug, Clone, Serialize, Deserialize)]
    pub struct MedicineCreated {
        pub medicine_id: Uuid,
        pub name: String,
    }

    #[derive(Debug, Clone, Serialize, Deserialize)]
    pub struct MedicineStatusChanged {
        pub medicine_id: Uuid,
        pub name: String,
        pub status: String,
    }

    #[derive(Debug, Clone, Serialize, Deserialize)]
    pub struct MedicineDeleted {
        pub medicine_id: Uuid,
        pub name: String,
    }

    #[derive(Debug, Clone, Serialize, Deserialize)]
    pub struct ScheduleCreated {
        pub schedule_id: Uuid,
        pub title: String,
    }

    #[derive(Debug, Clone, Serialize, Deserialize)]
    pub struct ScheduleStatusChanged {
        pub schedule_id: Uuid,
        pub title: String,
        pub status: String,
    }

    #[derive(Debug, Clone, Serialize, Deserialize)]
    pub struct ScheduleDeleted {
        pub schedule_id: Uuid,
        pub title: String,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn envelope_serializes_payload() {
        let event = Event::new(
            "clinic-inventory",
            routing_keys::MEDICINE_CREATED,
            payloads::MedicineCreated {
                medicine_id: Uuid::new_v4(),
                name: "Aspirin".into(),
            },
        );
        let json = serde_json::to_value(&event).unwrap();
        assert_eq!(json["source"], "clinic-inventory");
        assert_eq!(json["event_type"], "clinic.inventory.medicine.created");
        assert_eq!(json["data"]["name"], "Aspirin");
    }

    #[test]
    fn envelope_round_trips() {
        let event = Event::new(
            "clinic-auth",
            routing_keys::AUTH_USER_REGISTERED,
            payloads::UserRegistered {
                user_id: Uuid::new_v4(),
                name: "Jane".into(),
                email: "jane@example.com".into(),
            },
        )
        .with_user(Uuid::new_v4());

        let bytes = serde_json::to_vec(&event).unwrap();
        let parsed: Event<payloads::UserRegistered> = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(parsed.id, event.id);
        assert_eq!(parsed.user_id, event.user_id);
        assert_eq!(parsed.data.email, "jane@example.com");
    }
}
