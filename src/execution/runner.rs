//! # Single-Command Execution Boundary
//!
//! ## Overview
//!
//! A [`CommandRunner`] instantiates and starts exactly one command against
//! the shared payload. The executor hands it a fresh completion sender per
//! step — the explicit continuation the command must eventually consume —
//! and a lifecycle hook the runner must invoke synchronously between
//! construction and the command's action, so the executor tracks the
//! in-flight instance before any work begins.
//!
//! [`DirectCommandRunner`] is the provided implementation. Alternative
//! runners can wrap construction in an injection container or add
//! instrumentation, as long as they preserve the hook ordering contract.

use crate::command::{
    AsyncCommand, CommandDescriptor, CommandPayload, CompletionHandle, StepCompletion,
};
use async_trait::async_trait;
use std::sync::Arc;
use tokio::sync::oneshot;
use tracing::debug;

/// Lifecycle hook a [`CommandRunner`] invokes around command construction.
pub trait ExecutionHooks: Send + Sync {
    /// Invoked exactly once per command, synchronously after construction
    /// and before the command's action runs.
    fn before_execute(&self, command: &Arc<dyn AsyncCommand>, descriptor: &CommandDescriptor);
}

/// Instantiates and starts a single command.
#[async_trait]
pub trait CommandRunner: Send + Sync {
    /// Construct the descriptor's command, report it through
    /// `hooks.before_execute`, then start its action with the given payload
    /// and completion sender.
    ///
    /// Returning from this method does not imply the command's work is done:
    /// an asynchronous command stashes its [`CompletionHandle`] and signals
    /// later.
    async fn execute_command(
        &self,
        descriptor: &CommandDescriptor,
        payload: Arc<CommandPayload>,
        completion: oneshot::Sender<StepCompletion>,
        hooks: &dyn ExecutionHooks,
    );
}

/// Direct command runner: constructs commands straight from the
/// descriptor's factory, with no container indirection.
#[derive(Debug, Default)]
pub struct DirectCommandRunner;

impl DirectCommandRunner {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl CommandRunner for DirectCommandRunner {
    async fn execute_command(
        &self,
        descriptor: &CommandDescriptor,
        payload: Arc<CommandPayload>,
        completion: oneshot::Sender<StepCompletion>,
        hooks: &dyn ExecutionHooks,
    ) {
        let command = descriptor.instantiate();
        hooks.before_execute(&command, descriptor);

        debug!(
            command_type = descriptor.command_type(),
            "starting command action"
        );
        let handle = CompletionHandle::new(Arc::clone(&command), completion);
        command.execute(payload, handle).await;
    }
}
