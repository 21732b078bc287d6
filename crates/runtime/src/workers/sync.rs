//! Sync worker that owns the authoritative [`SyncState`].
//!
//! Receives commands from [`crate::RuntimeHandle`], asks the pure rules in
//! [`crate::state`] what to do, runs the effects against the gateway and
//! publishes every change. Commands are handled one at a time, so the state a
//! command observes is exactly what the previous command left behind.

use std::sync::Arc;

use tokio::sync::{mpsc, oneshot, watch};
use tracing::{debug, info, warn};

use client_gateway_core::{Gateway, HistoryPage, HistoryQuery, RequestError, User, UserId};

use crate::api::{Result, RuntimeError};
use crate::events::{Event, EventBus, Notification, SyncEvent};
use crate::state::{
    self, Busy, Effect, Intent, LimitChangePolicy, Outcome, Plan, RefreshScope, SyncState,
};

/// Commands that can be sent to the sync worker
pub enum Command {
    /// Plan and run an intent. `reply` is `None` for fire-and-forget submits.
    Dispatch {
        intent: Intent,
        reply: Option<oneshot::Sender<Result<()>>>,
    },
    /// Read one user's history without touching the state.
    UserHistory {
        user_id: UserId,
        query: HistoryQuery,
        reply: oneshot::Sender<Result<HistoryPage>>,
    },
}

/// Background task that processes intents sequentially.
pub struct SyncWorker {
    state: SyncState,
    gateway: Arc<dyn Gateway>,
    command_rx: mpsc::Receiver<Command>,
    snapshot_tx: watch::Sender<SyncState>,
    event_bus: EventBus,
    policy: LimitChangePolicy,
}

impl SyncWorker {
    pub fn new(
        state: SyncState,
        gateway: Arc<dyn Gateway>,
        command_rx: mpsc::Receiver<Command>,
        snapshot_tx: watch::Sender<SyncState>,
        event_bus: EventBus,
        policy: LimitChangePolicy,
    ) -> Self {
        info!(
            "SyncWorker initialized with gateway {} at {}, page size {}, policy {:?}",
            gateway.name(),
            gateway.endpoint(),
            state.pagination.limit().rows(),
            policy
        );

        Self {
            state,
            gateway,
            command_rx,
            snapshot_tx,
            event_bus,
            policy,
        }
    }

    /// Main worker loop. Ends once every handle has been dropped.
    pub async fn run(mut self) {
        loop {
            tokio::select! {
                Some(cmd) = self.command_rx.recv() => {
                    self.handle_command(cmd).await;
                }
                else => break,
            }
        }
        debug!("SyncWorker command channel closed, stopping");
    }

    async fn handle_command(&mut self, cmd: Command) {
        match cmd {
            Command::Dispatch { intent, reply } => {
                let result = self.handle_intent(intent).await;
                if let Some(reply) = reply
                    && reply.send(result).is_err()
                {
                    debug!("Dispatch reply channel closed (caller dropped)");
                }
            }
            Command::UserHistory {
                user_id,
                query,
                reply,
            } => {
                let result = self
                    .gateway
                    .user_history(&user_id, query)
                    .await
                    .map_err(|error| {
                        warn!(user_id = %user_id, error = %error, "User history read failed");
                        RuntimeError::from(error)
                    });
                if reply.send(result).is_err() {
                    debug!("UserHistory reply channel closed (caller dropped)");
                }
            }
        }
    }

    /// Plan, run and report one intent.
    ///
    /// Exactly one notification is published per rejected or failed intent.
    /// Busy flags raised for the plan are lowered on every path.
    async fn handle_intent(&mut self, intent: Intent) -> Result<()> {
        let plan = match state::plan(&self.state, &intent, self.policy) {
            Ok(plan) => plan,
            Err(error) => {
                debug!(intent = intent.label(), error = %error, "Intent rejected");
                self.notify(Notification::info(error.to_string()));
                return Err(error.into());
            }
        };

        if plan.is_noop() {
            debug!(intent = intent.label(), "Nothing to do");
            return Ok(());
        }

        debug!(
            intent = intent.label(),
            effects = plan.effects.len(),
            remote = plan.has_remote_effects(),
            "Running plan"
        );

        self.raise(plan.busy);
        let result = self.run_effects(&plan).await;
        self.lower(plan.busy);

        result.map_err(|error| {
            warn!(
                intent = intent.label(),
                kind = ?error.kind(),
                error = %error,
                "Intent failed"
            );
            let error = RuntimeError::from(error);
            self.notify(Notification::error(error.user_message(plan.failure_message)));
            error
        })
    }

    /// Run effects in order, stopping at the first failure.
    async fn run_effects(&mut self, plan: &Plan) -> std::result::Result<(), RequestError> {
        let gateway = Arc::clone(&self.gateway);
        let mut created: Option<User> = None;

        for effect in &plan.effects {
            debug!(effect = ?effect, "Running effect");

            match effect {
                Effect::SetPagination(pagination) => {
                    self.commit(Outcome::Pagination(*pagination));
                }
                Effect::SetSelection(selection) => {
                    self.commit(Outcome::Selection(selection.clone()));
                }
                Effect::CreateUser { name } => {
                    let user = gateway.create_user(name).await?;
                    info!(user_id = %user.id, name = %user.name, "User created");
                    self.event_bus
                        .publish(Event::Sync(SyncEvent::UserCreated {
                            user_id: user.id.clone(),
                            name: user.name.clone(),
                        }));
                    self.notify(Notification::success(format!("Added \"{}\"", user.name)));
                    created = Some(user);
                }
                Effect::Claim {
                    user_id,
                    display_name,
                } => {
                    let outcome = gateway.claim(user_id).await?;
                    info!(
                        user_id = %outcome.user_id,
                        points = outcome.points,
                        total_points = outcome.total_points,
                        "Points claimed"
                    );
                    self.notify(Notification::success(format!(
                        "+{} points awarded to {}!",
                        outcome.points, display_name
                    )));
                }
                Effect::RefreshDirectory => {
                    let (users, leaderboard) =
                        tokio::try_join!(gateway.list_users(), gateway.leaderboard())?;
                    self.commit(Outcome::Directory { users, leaderboard });
                }
                Effect::RefreshHistory(query) => {
                    self.raise(Busy::HISTORY_LOADING);
                    let result = gateway.history(*query).await;
                    self.lower(Busy::HISTORY_LOADING);
                    self.commit(Outcome::History(result?));
                }
                Effect::SelectCreatedUser => {
                    if let Some(user) = created.take() {
                        self.commit(Outcome::Selection(Some(user.id)));
                    }
                }
            }
        }

        Ok(())
    }

    fn raise(&mut self, flags: Busy) {
        if flags.is_empty() || self.state.busy.contains(flags) {
            return;
        }
        self.state.busy.insert(flags);
        self.publish(RefreshScope::BUSY);
    }

    fn lower(&mut self, flags: Busy) {
        if !self.state.busy.intersects(flags) {
            return;
        }
        self.state.busy.remove(flags);
        self.publish(RefreshScope::BUSY);
    }

    fn commit(&mut self, outcome: Outcome) {
        let scope = state::apply(&mut self.state, outcome);
        if !scope.is_empty() {
            self.publish(scope);
        }
    }

    /// Push the snapshot first so subscribers reacting to the event already
    /// see the new state.
    fn publish(&self, scope: RefreshScope) {
        self.snapshot_tx.send_replace(self.state.clone());
        self.event_bus
            .publish(Event::Sync(SyncEvent::Refreshed { scope }));
    }

    fn notify(&self, notification: Notification) {
        self.event_bus.publish(Event::Notification(notification));
    }
}
