//! Message broker adapters.
//!
//! Welcome events go to an AMQP broker through `lapin`.

mod amqp_welcome_publisher;

pub use amqp_welcome_publisher::{AmqpWelcomePublisher, WELCOME_CONTENT_TYPE, WelcomeQueueConfig};
