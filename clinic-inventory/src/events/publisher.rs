use clinic_shared::clients::rabbitmq::RabbitMQClient;
use clinic_shared::types::event::{payloads, routing_keys, Event};

use crate::models::{Medicine, Schedule};

const SOURCE: &str = "clinic-inventory";

pub async fn publish_medicine_created(rabbitmq: &RabbitMQClient, medicine: &Medicine) {
    let event = Event::new(
        SOURCE,
        routing_keys::MEDICINE_CREATED,
        payloads::MedicineCreated {
            medicine_id: medicine.id,
            name: medicine.name.clone(),
        },
    );

    if let Err(e) = rabbitmq.publish(routing_keys::MEDICINE_CREATED, &event).await {
        tracing::error!(error = %e, "failed to publish medicine.created event");
    }
}

pub async fn publish_medicine_status_changed(rabbitmq: &RabbitMQClient, medicine: &Medicine) {
    let event = Event::new(
        SOURCE,
        routing_keys::MEDICINE_STATUS_CHANGED,
        payloads::MedicineStatusChanged {
            medicine_id: medicine.id,
            name: medicine.name.clone(),
            status: medicine.status.clone(),
        },
    );

    if let Err(e) = rabbitmq.publish(routing_keys::MEDICINE_STATUS_CHANGED, &event).await {
        tracing::error!(error = %e, "failed to publish medicine.status_changed event");
    }
}

pub async fn publish_medicine_deleted(rabbitmq: &RabbitMQClient, medicine: &Medicine) {
    let event = Event::new(
        SOURCE,
        routing_keys::MEDICINE_DELETED,
        payloads::MedicineDeleted {
            medicine_id: medicine.id,
            name: medicine.name.clone(),
        },
    );

    if let Err(e) = rabbitmq.publish(routing_keys::MEDICINE_DELETED, &event).await {
        tracing::error!(error = %e, "failed to publish medicine.deleted event");
    }
}

pub async fn publish_schedule_created(rabbitmq: &RabbitMQClient, schedule: &Schedule) {
    let event = Event::new(
        SOURCE,
        routing_keys::SCHEDULE_CREATED,
        payloads::ScheduleCreated {
            schedule_id: schedule.id,
            title: schedule.title.clone(),
        },
    );

    if let Err(e) = rabbitmq.publish(routing_keys::SCHEDULE_CREATED, &event).await {
        tracing::error!(error = %e, "failed to publish schedule.created event");
    }
}

pub async fn publish_schedule_status_changed(rabbitmq: &RabbitMQClient, schedule: &Schedule) {
    let event = Event::new(
        SOURCE,
        routing_keys::SCHEDULE_STATUS_CHANGED,
        payloads::ScheduleStatusChanged {
            schedule_id: schedule.id,
            title: schedule.title.clone(),
            status: schedule.status.clone(),
        },
    );

    if let Err(e) = rabbitmq.publish(routing_keys::SCHEDULE_STATUS_CHANGED, &event).await {
        tracing::error!(error = %e, "failed to publish schedule.status_changed event");
    }
}

pub async fn publish_schedule_deleted(rabbitmq: &RabbitMQClient, schedule: &Schedule) {
    let event = Event::new(
        SOURCE,
        routing_keys::SCHEDULE_DELETED,
        payloads::ScheduleDeleted {
            schedule_id: schedule.id,
            title: schedule.title.clone(),
        },
    );

    if let Err(e) = rabbitmq.publish(routing_keys::SCHEDULE_DELETED, &event).await {
        tracing::error!(error = %e, "failed to publish schedule.deleted event");
    }
}
