pub mod engine;
pub mod rules;
pub mod sink;

pub use engine::{apply_rules, evaluate_notifications, NotificationEvent};
pub use rules::NotificationKind;
pub use sink::{dispatch, sinks_from_config, NotificationSink, StdoutSink, WebhookSink};
