use chrono::{DateTime, Utc};
use diesel::prelude::*;
use serde::Serialize;
use uuid::Uuid;

use crate::schema::notifications;

/// A notification row. `owner_id = None` is a broadcast visible to every
/// authenticated user; otherwise only the owner sees it. A broadcast is a
/// single shared row, so its read flag is shared across users too.
#[derive(Debug, Clone, Queryable, Identifiable, Serialize)]
#[diesel(table_name = notifications)]
pub struct Notification {
    pub id: Uuid,
    pub title: String,
    pub message: String,
    pub owner_id: Option<Uuid>,
    pub is_read: bool,
    pub created_at: DateTime<Utc>,
}

impl Notification {
    /// The visibility rule: broadcast, or owned by this user.
    pub fn visible_to(&self, user_id: Uuid) -> bool {
        match self.owner_id {
            None => true,
            Some(owner) => owner == user_id,
        }
    }
}

#[derive(Debug, Insertable)]
#[diesel(table_name = notifications)]
pub struct NewNotification {
    pub title: String,
    pub message: String,
    pub owner_id: Option<Uuid>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn notification(owner_id: Option<Uuid>) -> Notification {
        Notification {
            id: Uuid::new_v4(),
            title: "t".into(),
            message: "m".into(),
            owner_id,
            is_read: false,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn broadcast_visible_to_everyone() {
        let n = notification(None);
        assert!(n.visible_to(Uuid::new_v4()));
        assert!(n.visible_to(Uuid::new_v4()));
    }

    #[test]
    fn owned_visible_only_to_owner() {
        let owner = Uuid::new_v4();
        let n = notification(Some(owner));
        assert!(n.visible_to(owner));
        assert!(!n.visible_to(Uuid::new_v4()));
    }
}
