//! Store coordinator for wiring the TUI to the async task store.
//!
//! This module bridges the synchronous TUI event loop (crossterm
//! poll-based) with the async [`TaskController`] / [`RemoteStore`]
//! stack. It spawns a background tokio task and communicates with the
//! main thread via [`StoreCommand`] / [`StoreEvent`] channels.
//!
//! # Architecture
//!
//! ```text
//! TUI (main thread)  ←── StoreEvent ───  tokio background task
//!                     ─── StoreCommand →
//! ```
//!
//! The main thread sends [`StoreCommand`]s (e.g., create a task) and
//! drains [`StoreEvent`]s (e.g., collection replaced, notice shown) on
//! each tick of the poll-based event loop. The background task owns the
//! controller, so all mutations and reloads are serialized through one
//! owner and the collection can never be observed mid-update.

use std::time::{Duration, Instant};

use tokio::sync::mpsc;

use taskdeck_proto::task::{Task, TaskId, TaskPatch};

use crate::store::RemoteStore;
use crate::tasks::{Notice, SortKey, TaskController};

/// Commands sent from the TUI main loop to the store background task.
#[derive(Debug)]
pub enum StoreCommand {
    /// Refetch the full collection from the store.
    Load,
    /// Create a task from the input draft content.
    Create {
        /// Raw title text (validated by the controller).
        title: String,
        /// Description text, may be empty.
        description: String,
    },
    /// Apply a partial change to one task.
    Update {
        /// Target task.
        id: TaskId,
        /// Fields to change.
        patch: TaskPatch,
    },
    /// Delete one task.
    Remove {
        /// Target task.
        id: TaskId,
    },
    /// Change the active sort key.
    SetSortKey(SortKey),
    /// Explicitly close the current notice.
    DismissNotice,
    /// Gracefully shut down the store task.
    Shutdown,
}

/// Which mutation a [`StoreEvent::Mutated`] reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mutation {
    /// A task was created; the input draft can be cleared.
    Created,
    /// A task was updated; an open edit dialog can be closed.
    Updated,
    /// A task was deleted.
    Removed,
}

/// Events sent from the store background task to the TUI main loop.
#[derive(Debug)]
pub enum StoreEvent {
    /// The visible sequence was re-derived (reload, mutation, or sort
    /// key change). Always the full ordered collection.
    Collection(Vec<Task>),
    /// A fetch started or finished.
    Loading(bool),
    /// A notice became visible (push replaces any current one).
    Notice(Notice),
    /// The notice slot was cleared (explicit dismiss or timeout).
    NoticeCleared,
    /// A mutation succeeded remotely.
    Mutated(Mutation),
}

/// Configuration for the store bridge.
#[derive(Debug, Clone)]
pub struct BridgeConfig {
    /// Channel capacity for command/event mpsc channels.
    pub channel_capacity: usize,
    /// How long a notice stays visible before auto-dismissal.
    pub notice_timeout: Duration,
}

/// How often the background task checks the notice deadline.
const TICK_PERIOD: Duration = Duration::from_millis(250);

/// Spawn the store background task and return channel handles.
///
/// The task owns a [`TaskController`] over `store`, performs the
/// initial fetch immediately, then serves commands until the sender is
/// dropped or [`StoreCommand::Shutdown`] arrives. A 250ms interval
/// drives notice expiry even when no commands are flowing.
pub fn spawn_store<S>(
    store: S,
    config: &BridgeConfig,
) -> (mpsc::Sender<StoreCommand>, mpsc::Receiver<StoreEvent>)
where
    S: RemoteStore + Send + 'static,
{
    let (cmd_tx, cmd_rx) = mpsc::channel::<StoreCommand>(config.channel_capacity);
    let (evt_tx, evt_rx) = mpsc::channel::<StoreEvent>(config.channel_capacity);

    let controller = TaskController::new(store, config.notice_timeout);
    tokio::spawn(async move {
        store_loop(controller, cmd_rx, evt_tx).await;
    });

    (cmd_tx, evt_rx)
}

/// Background task: serve commands against the controller.
async fn store_loop<S: RemoteStore>(
    mut controller: TaskController<S>,
    mut cmd_rx: mpsc::Receiver<StoreCommand>,
    evt_tx: mpsc::Sender<StoreEvent>,
) {
    // Initial fetch so the UI starts populated.
    let _ = evt_tx.send(StoreEvent::Loading(true)).await;
    controller.load().await;
    let _ = evt_tx.send(StoreEvent::Loading(false)).await;
    publish(&controller, &evt_tx).await;

    let mut tick = tokio::time::interval(TICK_PERIOD);
    loop {
        tokio::select! {
            cmd = cmd_rx.recv() => {
                let Some(cmd) = cmd else { break };
                if matches!(cmd, StoreCommand::Shutdown) {
                    tracing::info!("store task shutting down");
                    break;
                }
                handle_command(&mut controller, cmd, &evt_tx).await;
            }
            _ = tick.tick() => {
                if controller.tick(Instant::now())
                    && evt_tx.send(StoreEvent::NoticeCleared).await.is_err()
                {
                    // TUI dropped; exit.
                    break;
                }
            }
        }
    }
}

/// Dispatch one command and publish the resulting state.
async fn handle_command<S: RemoteStore>(
    controller: &mut TaskController<S>,
    cmd: StoreCommand,
    evt_tx: &mpsc::Sender<StoreEvent>,
) {
    match cmd {
        StoreCommand::Load => {
            let _ = evt_tx.send(StoreEvent::Loading(true)).await;
            controller.load().await;
            let _ = evt_tx.send(StoreEvent::Loading(false)).await;
            publish(controller, evt_tx).await;
        }
        StoreCommand::Create { title, description } => {
            if controller.create(&title, &description).await {
                let _ = evt_tx.send(StoreEvent::Mutated(Mutation::Created)).await;
            }
            publish(controller, evt_tx).await;
        }
        StoreCommand::Update { id, patch } => {
            if controller.update(&id, &patch).await {
                let _ = evt_tx.send(StoreEvent::Mutated(Mutation::Updated)).await;
            }
            publish(controller, evt_tx).await;
        }
        StoreCommand::Remove { id } => {
            if controller.remove(&id).await {
                let _ = evt_tx.send(StoreEvent::Mutated(Mutation::Removed)).await;
            }
            publish(controller, evt_tx).await;
        }
        StoreCommand::SetSortKey(key) => {
            controller.set_sort_key(key);
            let _ = evt_tx
                .send(StoreEvent::Collection(controller.visible_tasks()))
                .await;
        }
        StoreCommand::DismissNotice => {
            controller.dismiss_notice();
            let _ = evt_tx.send(StoreEvent::NoticeCleared).await;
        }
        StoreCommand::Shutdown => {}
    }
}

/// Publish the visible collection and the current notice state.
async fn publish<S: RemoteStore>(
    controller: &TaskController<S>,
    evt_tx: &mpsc::Sender<StoreEvent>,
) {
    let _ = evt_tx
        .send(StoreEvent::Collection(controller.visible_tasks()))
        .await;
    if let Some(notice) = controller.notice() {
        let _ = evt_tx.send(StoreEvent::Notice(notice.clone())).await;
    }
}
