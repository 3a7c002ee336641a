use tokio::sync::mpsc::{self, error::TrySendError};
use tokio::task::JoinHandle;
use tracing::{debug, warn};

use super::{Mailer, Notification, NotificationError, Notifier};

/// Queues notifications for a background worker that owns the [`Mailer`].
///
/// `notify` returns as soon as the message is queued. The queue is bounded:
/// while the worker is stuck on a slow relay, further notifications are
/// refused with [`NotificationError::QueueFull`] instead of piling up. The
/// worker stops once every dispatcher clone has been dropped and the queue is
/// drained.
#[derive(Debug, Clone)]
pub struct MailDispatcher {
    queue: mpsc::Sender<Notification>,
    capacity: usize,
}

impl MailDispatcher {
    pub const DEFAULT_CAPACITY: usize = 256;

    /// Start the delivery worker on the current tokio runtime.
    pub fn spawn<M>(mailer: M, from: impl Into<String>) -> (Self, JoinHandle<()>)
    where
        M: Mailer,
    {
        Self::spawn_with_capacity(mailer, from, Self::DEFAULT_CAPACITY)
    }

    /// Like [`MailDispatcher::spawn`] with room for `capacity` pending messages.
    /// A zero capacity is raised to one.
    pub fn spawn_with_capacity<M>(
        mailer: M,
        from: impl Into<String>,
        capacity: usize,
    ) -> (Self, JoinHandle<()>)
    where
        M: Mailer,
    {
        let capacity = capacity.max(1);
        let (queue, inbox) = mpsc::channel(capacity);
        let worker = tokio::spawn(deliver(mailer, from.into(), inbox));
        (Self { queue, capacity }, worker)
    }
}

impl Notifier for MailDispatcher {
    fn notify(&self, notification: Notification) -> Result<(), NotificationError> {
        self.queue.try_send(notification).map_err(|err| match err {
            TrySendError::Full(_) => NotificationError::QueueFull {
                capacity: self.capacity,
            },
            TrySendError::Closed(_) => NotificationError::QueueClosed,
        })
    }
}

async fn deliver<M>(mailer: M, from: String, mut inbox: mpsc::Receiver<Notification>)
where
    M: Mailer,
{
    while let Some(notification) = inbox.recv().await {
        match mailer.send(&from, &notification).await {
            Ok(()) => debug!(
                kind = notification.kind.as_str(),
                to = %notification.to,
                "notification delivered"
            ),
            Err(err) => warn!(
                kind = notification.kind.as_str(),
                to = %notification.to,
                error = %err,
                "notification delivery failed; dropping"
            ),
        }
    }
    debug!("notification queue closed");
}
