//! # Async Command Capability
//!
//! ## Overview
//!
//! An [`AsyncCommand`] is a unit of work that may signal its completion at an
//! arbitrary later time and supports cooperative cancellation. Each command
//! receives a fresh [`CompletionHandle`] for its own step; consuming the
//! handle is the only way the sequence advances past that command.
//!
//! A synchronous-style command simply signals the handle before `execute`
//! returns. An asynchronous command stashes the handle (or moves it into a
//! spawned task) and signals when its background work finishes.
//!
//! Cancellation is a request, not preemption: [`AsyncCommand::abort`] asks
//! the command to wind down, and the command decides whether and when it
//! still reports completion.

use crate::command::payload::CommandPayload;
use async_trait::async_trait;
use serde_json::Value;
use std::fmt;
use std::sync::Arc;
use tokio::sync::oneshot;
use tracing::debug;

/// A command that signals its own completion and supports cooperative
/// cancellation.
#[async_trait]
pub trait AsyncCommand: Send + Sync {
    /// Start the command's action against the shared payload.
    ///
    /// The command must eventually consume `completion` — inline for
    /// synchronous work, or later from whatever task carries its
    /// asynchronous work. Returning from this method does not mean the
    /// command is done.
    async fn execute(self: Arc<Self>, payload: Arc<CommandPayload>, completion: CompletionHandle);

    /// Cooperative cancellation request. The command decides whether and
    /// when it still signals completion.
    fn abort(&self);

    /// Runtime type label used for progress reporting.
    fn command_type(&self) -> &str;
}

/// Completion report delivered by a command when its work has finished.
pub struct StepCompletion {
    /// The command instance that finished.
    pub command: Arc<dyn AsyncCommand>,
    /// Result value reported by the command, if any.
    pub result: Option<Value>,
    /// The command's own request to halt the remainder of the sequence,
    /// distinct from an external abort.
    pub stop: bool,
}

impl fmt::Debug for StepCompletion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StepCompletion")
            .field("command_type", &self.command.command_type())
            .field("result", &self.result)
            .field("stop", &self.stop)
            .finish()
    }
}

/// One-shot handle a command consumes to report that its work has finished.
///
/// Dropping the handle without signalling closes the channel; the sequence
/// surfaces that to its caller as a lost completion instead of stalling.
pub struct CompletionHandle {
    command: Arc<dyn AsyncCommand>,
    sender: oneshot::Sender<StepCompletion>,
}

impl CompletionHandle {
    pub fn new(command: Arc<dyn AsyncCommand>, sender: oneshot::Sender<StepCompletion>) -> Self {
        Self { command, sender }
    }

    /// Signal normal completion with no result value.
    pub fn executed(self) {
        self.deliver(None, false);
    }

    /// Signal normal completion carrying a result value.
    pub fn executed_with(self, result: Value) {
        self.deliver(Some(result), false);
    }

    /// Signal completion and request that no further command in the
    /// sequence runs.
    pub fn executed_and_stop(self) {
        self.deliver(None, true);
    }

    fn deliver(self, result: Option<Value>, stop: bool) {
        let Self { command, sender } = self;
        debug!(
            command_type = command.command_type(),
            stop, "command reported completion"
        );
        // The receiver is gone when the sequence was already torn down.
        let _ = sender.send(StepCompletion {
            command,
            result,
            stop,
        });
    }
}

impl fmt::Debug for CompletionHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CompletionHandle")
            .field("command_type", &self.command.command_type())
            .finish()
    }
}
