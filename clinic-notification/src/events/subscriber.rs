use std::sync::Arc;

use futures_lite::StreamExt;
use lapin::options::BasicAckOptions;
use uuid::Uuid;

use clinic_shared::types::event::{payloads, routing_keys, Event};

use crate::events::changes::ChangeKind;
use crate::events::texts;
use crate::services::notification_service;
use crate::AppState;

/// Listen for inventory events and turn them into broadcast notifications.
pub async fn listen_inventory_events(state: Arc<AppState>) -> anyhow::Result<()> {
    let mut consumer = state
        .rabbitmq
        .subscribe(
            "clinic-notification.inventory",
            &[
                routing_keys::MEDICINE_CREATED,
                routing_keys::MEDICINE_STATUS_CHANGED,
                routing_keys::MEDICINE_DELETED,
                routing_keys::SCHEDULE_CREATED,
                routing_keys::SCHEDULE_STATUS_CHANGED,
                routing_keys::SCHEDULE_DELETED,
            ],
        )
        .await?;

    tracing::info!("listening for inventory events");

    while let Some(delivery) = consumer.next().await {
        match delivery {
            Ok(delivery) => {
                let routing_key = delivery.routing_key.to_string();
                handle_inventory_event(&state, &routing_key, &delivery.data);
                let _ = delivery.ack(BasicAckOptions::default()).await;
            }
            Err(e) => {
                tracing::error!(error = %e, "inventory consumer error");
            }
        }
    }

    Ok(())
}

fn handle_inventory_event(state: &AppState, routing_key: &str, data: &[u8]) {
    let text = match routing_key {
        routing_keys::MEDICINE_CREATED => {
            parse::<payloads::MedicineCreated>(routing_key, data)
                .map(|p| texts::medicine_added(&p.name))
        }
        routing_keys::MEDICINE_STATUS_CHANGED => {
            parse::<payloads::MedicineStatusChanged>(routing_key, data)
                .map(|p| texts::medicine_status_changed(&p.name, &p.status))
        }
        routing_keys::MEDICINE_DELETED => {
            parse::<payloads::MedicineDeleted>(routing_key, data)
                .map(|p| texts::medicine_removed(&p.name))
        }
        routing_keys::SCHEDULE_CREATED => {
            parse::<payloads::ScheduleCreated>(routing_key, data)
                .map(|p| texts::schedule_added(&p.title))
        }
        routing_keys::SCHEDULE_STATUS_CHANGED => {
            parse::<payloads::ScheduleStatusChanged>(routing_key, data)
                .map(|p| texts::schedule_status_changed(&p.title, &p.status))
        }
        routing_keys::SCHEDULE_DELETED => {
            parse::<payloads::ScheduleDeleted>(routing_key, data)
                .map(|p| texts::schedule_removed(&p.title))
        }
        other => {
            tracing::warn!(routing_key = %other, "unexpected inventory routing key");
            None
        }
    };

    if let Some((title, message)) = text {
        broadcast_notification(state, routing_key, &title, &message);
    }
}

/// Listen for user registrations and send each new user an owned welcome
/// notification.
pub async fn listen_user_registered(state: Arc<AppState>) -> anyhow::Result<()> {
    let mut consumer = state
        .rabbitmq
        .subscribe(
            "clinic-notification.user-registered",
            &[routing_keys::AUTH_USER_REGISTERED],
        )
        .await?;

    tracing::info!("listening for user.registered events");

    while let Some(delivery) = consumer.next().await {
        match delivery {
            Ok(delivery) => {
                if let Some(payload) =
                    parse::<payloads::UserRegistered>(routing_keys::AUTH_USER_REGISTERED, &delivery.data)
                {
                    let (title, message) = texts::welcome(&payload.name);
                    owned_notification(&state, payload.user_id, &title, &message);
                }
                let _ = delivery.ack(BasicAckOptions::default()).await;
            }
            Err(e) => {
                tracing::error!(error = %e, "user.registered consumer error");
            }
        }
    }

    Ok(())
}

fn parse<T: serde::de::DeserializeOwned + serde::Serialize>(
    routing_key: &str,
    data: &[u8],
) -> Option<T> {
    match serde_json::from_slice::<Event<T>>(data) {
        Ok(event) => Some(event.data),
        Err(e) => {
            tracing::error!(error = %e, routing_key = %routing_key, "failed to deserialize event");
            None
        }
    }
}

fn broadcast_notification(state: &AppState, routing_key: &str, title: &str, message: &str) {
    match notification_service::create_notification(&state.db, title, message, None) {
        Ok(notification) => {
            tracing::info!(
                notification_id = %notification.id,
                routing_key = %routing_key,
                "broadcast notification created"
            );
            state.changes.emit(ChangeKind::Insert);
        }
        Err(e) => {
            tracing::error!(error = %e, routing_key = %routing_key, "failed to create broadcast notification");
        }
    }
}

fn owned_notification(state: &AppState, owner: Uuid, title: &str, message: &str) {
    match notification_service::create_notification(&state.db, title, message, Some(owner)) {
        Ok(notification) => {
            tracing::info!(
                notification_id = %notification.id,
                owner_id = %owner,
                "owned notification created"
            );
            state.changes.emit(ChangeKind::Insert);
        }
        Err(e) => {
            tracing::error!(error = %e, owner_id = %owner, "failed to create owned notification");
        }
    }
}
