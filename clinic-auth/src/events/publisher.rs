use uuid::Uuid;

use clinic_shared::clients::rabbitmq::RabbitMQClient;
use clinic_shared::types::event::{payloads, routing_keys, Event};

pub async fn publish_user_registered(
    rabbitmq: &RabbitMQClient,
    user_id: Uuid,
    name: &str,
    email: &str,
) {
    let event = Event::new(
        "clinic-auth",
        routing_keys::AUTH_USER_REGISTERED,
        payloads::UserRegistered {
            user_id,
            name: name.to_string(),
            email: email.to_string(),
        },
    )
    .with_user(user_id);

    if let Err(e) = rabbitmq.publish(routing_keys::AUTH_USER_REGISTERED, &event).await {
        tracing::error!(error = %e, "failed to publish user.registered event");
    }
}
