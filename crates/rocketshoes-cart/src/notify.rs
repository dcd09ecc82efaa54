//! User-facing failure notifications.

use tracing::warn;

/// Receives the message shown to the user when a cart operation fails.
pub trait NotificationSink: Send + Sync {
    fn report_error(&self, message: &str);
}

/// Any `Fn(&str)` closure can act as a sink.
impl<F> NotificationSink for F
where
    F: Fn(&str) + Send + Sync,
{
    fn report_error(&self, message: &str) {
        self(message)
    }
}

/// Sink that writes messages to the log.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingNotifier;

impl NotificationSink for TracingNotifier {
    fn report_error(&self, message: &str) {
        warn!(target: "rocketshoes::notify", "{}", message);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    #[test]
    fn test_closure_sink() {
        let seen = Mutex::new(Vec::new());
        let sink = |message: &str| seen.lock().unwrap().push(message.to_string());

        sink.report_error("Erro na adição do produto");
        TracingNotifier.report_error("ignored");

        assert_eq!(*seen.lock().unwrap(), vec!["Erro na adição do produto"]);
    }
}
