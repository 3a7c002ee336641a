use tracing::info;

use super::{Mailer, Notification, NotificationError};

/// Writes outgoing mail to the log instead of sending it. Used in development
/// and whenever no SMTP relay is configured.
#[derive(Debug, Clone, Default)]
pub struct ConsoleMailer;

impl ConsoleMailer {
    pub const fn new() -> Self {
        Self
    }
}

impl Mailer for ConsoleMailer {
    async fn send(&self, from: &str, notification: &Notification) -> Result<(), NotificationError> {
        info!(
            kind = notification.kind.as_str(),
            from = %from,
            to = %notification.to,
            subject = %notification.subject,
            body = %notification.body,
            "outgoing mail (console backend)"
        );
        Ok(())
    }
}
