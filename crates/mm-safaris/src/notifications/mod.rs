//! Outbound e-mail notifications for accepted inquiries.
//!
//! The inquiry service hands a [`Notification`] to a [`Notifier`] and moves
//! on. [`MailDispatcher`] queues it for a background worker that delivers it
//! through a [`Mailer`]; delivery failures are logged and dropped.

mod console;
mod dispatcher;
mod smtp;
pub mod templates;

use std::future::Future;

use serde::Serialize;

use crate::config::MailConfig;

pub use console::ConsoleMailer;
pub use dispatcher::MailDispatcher;
pub use smtp::SmtpMailer;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum NotificationKind {
    /// Receipt sent to the visitor who submitted a booking inquiry.
    BookingReceipt,
    /// Operator alert carrying the full booking details.
    BookingAlert,
    /// Operator alert for a contact-form message.
    ContactAlert,
}

impl NotificationKind {
    pub const fn as_str(self) -> &'static str {
        match self {
            NotificationKind::BookingReceipt => "booking_receipt",
            NotificationKind::BookingAlert => "booking_alert",
            NotificationKind::ContactAlert => "contact_alert",
        }
    }
}

/// A rendered plain-text e-mail addressed to a single recipient.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Notification {
    pub kind: NotificationKind,
    pub to: String,
    pub subject: String,
    pub body: String,
}

/// Hand-off point for notifications. Implementations must not block on delivery.
pub trait Notifier: Send + Sync {
    fn notify(&self, notification: Notification) -> Result<(), NotificationError>;
}

/// Delivers a single message. Used by the dispatcher worker.
pub trait Mailer: Send + Sync + 'static {
    fn send(
        &self,
        from: &str,
        notification: &Notification,
    ) -> impl Future<Output = Result<(), NotificationError>> + Send;
}

#[derive(Debug, thiserror::Error)]
pub enum NotificationError {
    #[error("notification queue is closed")]
    QueueClosed,
    #[error("notification queue is full ({capacity} pending)")]
    QueueFull { capacity: usize },
    #[error("invalid address '{address}': {reason}")]
    InvalidAddress { address: String, reason: String },
    #[error("could not build message: {0}")]
    Message(String),
    #[error("mail transport failed: {0}")]
    Transport(String),
}

/// The mail backend selected by configuration: SMTP when a relay is
/// configured, the console otherwise.
#[derive(Debug)]
pub enum MailBackend {
    Console(ConsoleMailer),
    Smtp(SmtpMailer),
}

impl MailBackend {
    pub fn from_config(config: &MailConfig) -> Result<Self, NotificationError> {
        match &config.smtp {
            Some(smtp) => Ok(Self::Smtp(SmtpMailer::new(smtp)?)),
            None => Ok(Self::Console(ConsoleMailer::new())),
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            MailBackend::Console(_) => "console",
            MailBackend::Smtp(_) => "smtp",
        }
    }
}

impl Mailer for MailBackend {
    async fn send(&self, from: &str, notification: &Notification) -> Result<(), NotificationError> {
        match self {
            MailBackend::Console(mailer) => mailer.send(from, notification).await,
            MailBackend::Smtp(mailer) => mailer.send(from, notification).await,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn console_backend_without_smtp_relay() {
        let backend = MailBackend::from_config(&MailConfig::default()).expect("console");
        assert_eq!(backend.name(), "console");
        assert!(matches!(backend, MailBackend::Console(_)));
    }
}
