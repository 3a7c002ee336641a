use std::fmt;

use lettre::message::header::ContentType;
use lettre::message::Mailbox;
use lettre::transport::smtp::authentication::Credentials;
use lettre::{AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};

use super::{Mailer, Notification, NotificationError};
use crate::config::SmtpConfig;

const IMPLICIT_TLS_PORT: u16 = 465;

/// Sends mail through an SMTP relay.
pub struct SmtpMailer {
    host: String,
    port: u16,
    transport: AsyncSmtpTransport<Tokio1Executor>,
}

impl fmt::Debug for SmtpMailer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SmtpMailer")
            .field("host", &self.host)
            .field("port", &self.port)
            .finish_non_exhaustive()
    }
}

impl SmtpMailer {
    /// Port 465 uses implicit TLS; any other port upgrades with STARTTLS.
    pub fn new(config: &SmtpConfig) -> Result<Self, NotificationError> {
        let builder = if config.port == IMPLICIT_TLS_PORT {
            AsyncSmtpTransport::<Tokio1Executor>::relay(&config.host)
        } else {
            AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&config.host)
        }
        .map_err(|err| NotificationError::Transport(format!("SMTP relay error: {err}")))?
        .port(config.port);

        let builder = match (&config.username, &config.password) {
            (Some(username), Some(password)) => {
                builder.credentials(Credentials::new(username.clone(), password.clone()))
            }
            _ => builder,
        };

        Ok(Self {
            host: config.host.clone(),
            port: config.port,
            transport: builder.build(),
        })
    }
}

fn mailbox(address: &str) -> Result<Mailbox, NotificationError> {
    address
        .parse::<Mailbox>()
        .map_err(|err| NotificationError::InvalidAddress {
            address: address.to_string(),
            reason: err.to_string(),
        })
}

impl Mailer for SmtpMailer {
    async fn send(&self, from: &str, notification: &Notification) -> Result<(), NotificationError> {
        let message = Message::builder()
            .from(mailbox(from)?)
            .to(mailbox(&notification.to)?)
            .subject(notification.subject.clone())
            .header(ContentType::TEXT_PLAIN)
            .body(notification.body.clone())
            .map_err(|err| NotificationError::Message(err.to_string()))?;

        self.transport
            .send(message)
            .await
            .map_err(|err| NotificationError::Transport(err.to_string()))?;
        Ok(())
    }
}
