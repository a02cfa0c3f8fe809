//! Webhook reachability adapters.

mod http_probe;

pub use http_probe::{HttpWebhookProbe, WEBHOOK_PROBE_USER_AGENT};
