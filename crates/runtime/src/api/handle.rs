//! Cloneable façade for issuing intents to the runtime.
//!
//! [`RuntimeHandle`] hides channel plumbing and offers async helpers for
//! dispatching intents, reading the current snapshot and streaming events
//! from specific topics.
use tokio::sync::{broadcast, mpsc, oneshot, watch};

use client_gateway_core::{HistoryPage, HistoryQuery, UserId};

use super::errors::{Result, RuntimeError};
use crate::events::{Event, EventBus, Topic};
use crate::state::{Intent, PageSize, SyncState};
use crate::workers::Command;

/// Client-facing handle to interact with the runtime
#[derive(Clone)]
pub struct RuntimeHandle {
    command_tx: mpsc::Sender<Command>,
    event_bus: EventBus,
    snapshot_rx: watch::Receiver<SyncState>,
}

impl RuntimeHandle {
    pub(crate) fn new(
        command_tx: mpsc::Sender<Command>,
        event_bus: EventBus,
        snapshot_rx: watch::Receiver<SyncState>,
    ) -> Self {
        Self {
            command_tx,
            event_bus,
            snapshot_rx,
        }
    }

    /// Enqueue an intent and wait until every effect it planned has run.
    ///
    /// Validation and request failures are returned here and also published
    /// once on [`Topic::Notification`].
    pub async fn dispatch(&self, intent: Intent) -> Result<()> {
        let (reply_tx, reply_rx) = oneshot::channel();

        self.command_tx
            .send(Command::Dispatch {
                intent,
                reply: Some(reply_tx),
            })
            .await
            .map_err(|_| RuntimeError::CommandChannelClosed)?;

        reply_rx.await.map_err(RuntimeError::ReplyChannelClosed)?
    }

    /// Enqueue an intent without waiting for it to run.
    ///
    /// Frontends use this so input stays responsive while requests are in
    /// flight; the outcome arrives through the snapshot and notifications.
    pub fn submit(&self, intent: Intent) -> Result<()> {
        self.command_tx
            .try_send(Command::Dispatch {
                intent,
                reply: None,
            })
            .map_err(|error| match error {
                mpsc::error::TrySendError::Closed(_) => RuntimeError::CommandChannelClosed,
                mpsc::error::TrySendError::Full(_) => {
                    tracing::warn!("Sync command queue full, dropping intent");
                    RuntimeError::CommandQueueFull
                }
            })
    }

    pub async fn initialize(&self) -> Result<()> {
        self.dispatch(Intent::Initialize).await
    }

    pub async fn change_page(&self, page: u32) -> Result<()> {
        self.dispatch(Intent::ChangePage(page)).await
    }

    pub async fn change_limit(&self, limit: PageSize) -> Result<()> {
        self.dispatch(Intent::ChangeLimit(limit)).await
    }

    pub async fn select(&self, user_id: Option<UserId>) -> Result<()> {
        self.dispatch(Intent::Select(user_id)).await
    }

    pub async fn add_user(&self, name: impl Into<String>) -> Result<()> {
        self.dispatch(Intent::Add(name.into())).await
    }

    pub async fn claim(&self) -> Result<()> {
        self.dispatch(Intent::Claim).await
    }

    /// Read one page of a single user's claims. Does not touch the snapshot.
    pub async fn user_history(&self, user_id: UserId, query: HistoryQuery) -> Result<HistoryPage> {
        let (reply_tx, reply_rx) = oneshot::channel();

        self.command_tx
            .send(Command::UserHistory {
                user_id,
                query,
                reply: reply_tx,
            })
            .await
            .map_err(|_| RuntimeError::CommandChannelClosed)?;

        reply_rx.await.map_err(RuntimeError::ReplyChannelClosed)?
    }

    /// Clone of the latest published snapshot.
    pub fn snapshot(&self) -> SyncState {
        self.snapshot_rx.borrow().clone()
    }

    /// Receiver notified every time the snapshot changes, including busy
    /// flags raised while an operation is in flight.
    pub fn watch(&self) -> watch::Receiver<SyncState> {
        self.snapshot_rx.clone()
    }

    /// Subscribe to events from a specific topic
    ///
    /// # Topics
    ///
    /// - `Topic::Sync` - snapshot refreshes with the changed scope, and
    ///   confirmations of created users
    /// - `Topic::Notification` - user-facing notices
    ///
    /// # Example
    ///
    /// ```rust,ignore
    /// use runtime::{Event, Topic};
    ///
    /// let mut notices = handle.subscribe(Topic::Notification);
    /// while let Ok(Event::Notification(notice)) = notices.recv().await {
    ///     println!("{}: {}", notice.level, notice.text);
    /// }
    /// ```
    pub fn subscribe(&self, topic: Topic) -> broadcast::Receiver<Event> {
        self.event_bus.subscribe(topic)
    }
}
