//! # Async Command Executor
//!
//! ## Architecture
//!
//! The executor drains an ordered queue of command descriptors one at a
//! time. Each command is constructed and started through a [`CommandRunner`];
//! the freshly constructed instance is detained in the retention registry and
//! recorded as the in-flight command; the drain then suspends on a per-step
//! completion channel until the command reports. Only then is the instance
//! released, progress reported, and the next descriptor started. Exactly one
//! command is ever in flight per executor, and there is no timeout: a command
//! that never reports stalls the sequence until an external abort.
//!
//! Abort is cooperative. [`AsyncCommandExecutor::abort`] flips a flag and
//! optionally forwards a cancellation request to the in-flight command;
//! halting happens at the drain's next checkpoint, which discards the
//! remaining queue and fires the aborted callback instead of the executed
//! one. A command can also halt the sequence itself by signalling its
//! completion handle with a stop request.
//!
//! ## Usage
//!
//! ```rust
//! use std::sync::Arc;
//!
//! use async_trait::async_trait;
//! use sequencer_core::{
//!     AsyncCommand, AsyncCommandExecutor, CommandDescriptor, CommandPayload,
//!     CompletionHandle, DirectCommandRunner, InMemoryRetention, SequenceOutcome,
//! };
//!
//! struct Greet;
//!
//! #[async_trait]
//! impl AsyncCommand for Greet {
//!     async fn execute(
//!         self: Arc<Self>,
//!         payload: Arc<CommandPayload>,
//!         completion: CompletionHandle,
//!     ) {
//!         payload.insert("greeting", serde_json::json!("hello"));
//!         completion.executed();
//!     }
//!
//!     fn abort(&self) {}
//!
//!     fn command_type(&self) -> &str {
//!         "Greet"
//!     }
//! }
//!
//! # async fn example() -> sequencer_core::Result<()> {
//! let executor = AsyncCommandExecutor::new(
//!     Arc::new(DirectCommandRunner::new()),
//!     Arc::new(InMemoryRetention::new()),
//! );
//!
//! let payload = Arc::new(CommandPayload::new());
//! let descriptors = vec![CommandDescriptor::new("Greet", || Arc::new(Greet))];
//!
//! let outcome = executor
//!     .execute_async_commands(descriptors, Arc::clone(&payload))
//!     .await?;
//! assert_eq!(outcome, SequenceOutcome::Completed { commands_executed: 1 });
//! # Ok(())
//! # }
//! # fn main() -> sequencer_core::Result<()> {
//! #     tokio::runtime::Builder::new_current_thread()
//! #         .build()
//! #         .expect("runtime")
//! #         .block_on(example())
//! # }
//! ```

use crate::command::{AsyncCommand, CommandDescriptor, CommandPayload};
use crate::error::{Result, SequencerError};
use crate::execution::runner::{CommandRunner, ExecutionHooks};
use crate::registry::RetentionRegistry;
use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::VecDeque;
use std::fmt;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tokio::sync::oneshot;
use tracing::{debug, info, warn};
use uuid::Uuid;

/// Terminal notification with no arguments.
pub type SequenceCallback = Arc<dyn Fn() + Send + Sync>;

/// Per-step progress notification: `(command_type, current, total)`.
pub type CommandExecutedCallback = Arc<dyn Fn(&str, usize, usize) + Send + Sync>;

/// Pass-through handler for command results: `(result, command, descriptor)`.
pub type ResultHandler =
    Arc<dyn Fn(Option<&Value>, &Arc<dyn AsyncCommand>, &CommandDescriptor) + Send + Sync>;

/// Executor configuration.
#[derive(Debug, Clone)]
pub struct SequencerConfig {
    /// Clear the aborted flag when a new sequence starts. With this off, an
    /// aborted executor refuses to sequence again for its whole lifetime.
    pub reset_abort_on_start: bool,
}

impl Default for SequencerConfig {
    fn default() -> Self {
        Self {
            reset_abort_on_start: true,
        }
    }
}

/// How a sequence run terminated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum SequenceOutcome {
    /// Every descriptor ran to completion.
    Completed { commands_executed: usize },
    /// The sequence halted before exhausting its queue.
    Aborted { commands_executed: usize },
}

#[derive(Default)]
struct Callbacks {
    commands_aborted: Option<SequenceCallback>,
    commands_executed: Option<SequenceCallback>,
    command_executed: Option<CommandExecutedCallback>,
}

struct ExecutorInner {
    runner: Arc<dyn CommandRunner>,
    retention: Arc<dyn RetentionRegistry>,
    config: SequencerConfig,
    result_handler: Option<ResultHandler>,
    aborted: AtomicBool,
    running: AtomicBool,
    current: Mutex<Option<Arc<dyn AsyncCommand>>>,
    callbacks: Mutex<Callbacks>,
}

impl ExecutionHooks for ExecutorInner {
    fn before_execute(&self, command: &Arc<dyn AsyncCommand>, descriptor: &CommandDescriptor) {
        debug!(
            command_type = descriptor.command_type(),
            "tracking in-flight command"
        );
        *self.current.lock() = Some(Arc::clone(command));
        self.retention.detain(Arc::clone(command));
    }
}

/// Sequences asynchronous commands one at a time.
///
/// Cheap to clone; clones share the same executor state, so a clone moved
/// into another task can abort a drain that is suspended elsewhere.
#[derive(Clone)]
pub struct AsyncCommandExecutor {
    inner: Arc<ExecutorInner>,
}

impl AsyncCommandExecutor {
    /// Create an executor with default configuration and no result handler.
    pub fn new(runner: Arc<dyn CommandRunner>, retention: Arc<dyn RetentionRegistry>) -> Self {
        Self::build(runner, retention, SequencerConfig::default(), None)
    }

    pub fn with_config(
        runner: Arc<dyn CommandRunner>,
        retention: Arc<dyn RetentionRegistry>,
        config: SequencerConfig,
    ) -> Self {
        Self::build(runner, retention, config, None)
    }

    /// Create an executor that relays every command's reported result to
    /// `handler`. The relay is a pure pass-through; it observes results
    /// without influencing sequencing.
    pub fn with_result_handler(
        runner: Arc<dyn CommandRunner>,
        retention: Arc<dyn RetentionRegistry>,
        handler: ResultHandler,
    ) -> Self {
        Self::build(runner, retention, SequencerConfig::default(), Some(handler))
    }

    fn build(
        runner: Arc<dyn CommandRunner>,
        retention: Arc<dyn RetentionRegistry>,
        config: SequencerConfig,
        result_handler: Option<ResultHandler>,
    ) -> Self {
        Self {
            inner: Arc::new(ExecutorInner {
                runner,
                retention,
                config,
                result_handler,
                aborted: AtomicBool::new(false),
                running: AtomicBool::new(false),
                current: Mutex::new(None),
                callbacks: Mutex::new(Callbacks::default()),
            }),
        }
    }

    /// Whether an abort has been requested on this executor.
    pub fn is_aborted(&self) -> bool {
        self.inner.aborted.load(Ordering::SeqCst)
    }

    /// Request that the sequence stop.
    ///
    /// Always sets the aborted flag; when `abort_current_command` is set and
    /// a command is in flight, additionally forwards a cancellation request
    /// to that command. This never unwinds anything itself — halting happens
    /// at the drain's next checkpoint. After this returns, no new command
    /// will start for the current run, but the in-flight command may still
    /// report completion and have that report processed.
    pub fn abort(&self, abort_current_command: bool) {
        self.inner.aborted.store(true, Ordering::SeqCst);

        if abort_current_command {
            let current = self.inner.current.lock().clone();
            if let Some(command) = current {
                info!(
                    command_type = command.command_type(),
                    "cancelling in-flight command"
                );
                command.abort();
            }
        }
    }

    /// Register the callback fired once when a run halts early, replacing
    /// any previous registration. `None` clears it.
    pub fn set_commands_aborted_callback(&self, callback: Option<SequenceCallback>) {
        self.inner.callbacks.lock().commands_aborted = callback;
    }

    /// Register the callback fired once when a run exhausts its queue,
    /// replacing any previous registration. `None` clears it.
    pub fn set_commands_executed_callback(&self, callback: Option<SequenceCallback>) {
        self.inner.callbacks.lock().commands_executed = callback;
    }

    /// Register the per-step progress callback `(command_type, current,
    /// total)`, replacing any previous registration. `None` clears it.
    pub fn set_command_executed_callback(&self, callback: Option<CommandExecutedCallback>) {
        self.inner.callbacks.lock().command_executed = callback;
    }

    /// Execute `descriptors` in order against the shared `payload`.
    ///
    /// Drains the queue one command at a time, suspending on each command's
    /// completion channel. Returns once the queue is exhausted, the run was
    /// aborted, or a command was lost. An empty collection completes
    /// immediately with zero steps.
    ///
    /// Not reentrant: a second call while a run is still draining returns
    /// [`SequencerError::SequenceInProgress`] and leaves the active run
    /// untouched.
    pub async fn execute_async_commands(
        &self,
        descriptors: impl IntoIterator<Item = CommandDescriptor>,
        payload: Arc<CommandPayload>,
    ) -> Result<SequenceOutcome> {
        let inner = &self.inner;

        if inner
            .running
            .compare_exchange(false, true, Ordering::SeqCst, Ordering::SeqCst)
            .is_err()
        {
            return Err(SequencerError::SequenceInProgress);
        }
        let _running = RunningGuard {
            flag: &inner.running,
        };

        if inner.config.reset_abort_on_start {
            inner.aborted.store(false, Ordering::SeqCst);
        }

        let mut queue: VecDeque<CommandDescriptor> = descriptors.into_iter().collect();
        let total = queue.len();
        let run_id = Uuid::new_v4();
        info!(%run_id, total_commands = total, "starting command sequence");

        let mut executed = 0usize;

        while !inner.aborted.load(Ordering::SeqCst) {
            let Some(descriptor) = queue.pop_front() else {
                break;
            };

            debug!(
                %run_id,
                command_type = descriptor.command_type(),
                position = total - queue.len(),
                total_commands = total,
                "dispatching command"
            );

            let (sender, receiver) = oneshot::channel();
            inner
                .runner
                .execute_command(&descriptor, Arc::clone(&payload), sender, inner.as_ref())
                .await;

            match receiver.await {
                Ok(completion) => {
                    inner.current.lock().take();
                    inner.retention.release(&completion.command);

                    if let Some(handler) = &inner.result_handler {
                        handler(completion.result.as_ref(), &completion.command, &descriptor);
                    }

                    executed = total - queue.len();
                    let progress = inner.callbacks.lock().command_executed.clone();
                    if let Some(callback) = progress {
                        callback(completion.command.command_type(), executed, total);
                    }

                    if completion.stop {
                        debug!(
                            %run_id,
                            command_type = completion.command.command_type(),
                            "command requested sequence stop"
                        );
                        self.abort(false);
                    }
                }
                Err(_) => {
                    if let Some(command) = inner.current.lock().take() {
                        inner.retention.release(&command);
                    }

                    if !inner.aborted.load(Ordering::SeqCst) {
                        warn!(
                            %run_id,
                            command_type = descriptor.command_type(),
                            "command dropped its completion handle without reporting"
                        );
                        return Err(SequencerError::CompletionLost {
                            command_type: descriptor.command_type().to_string(),
                        });
                    }
                }
            }
        }

        if inner.aborted.load(Ordering::SeqCst) {
            let discarded = queue.len();
            queue.clear();
            info!(
                %run_id,
                commands_executed = executed,
                discarded,
                "command sequence aborted"
            );
            let callback = inner.callbacks.lock().commands_aborted.clone();
            if let Some(callback) = callback {
                callback();
            }
            Ok(SequenceOutcome::Aborted {
                commands_executed: executed,
            })
        } else {
            info!(%run_id, commands_executed = executed, "command sequence executed");
            let callback = inner.callbacks.lock().commands_executed.clone();
            if let Some(callback) = callback {
                callback();
            }
            Ok(SequenceOutcome::Completed {
                commands_executed: executed,
            })
        }
    }
}

impl fmt::Debug for AsyncCommandExecutor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AsyncCommandExecutor")
            .field("aborted", &self.is_aborted())
            .field("running", &self.inner.running.load(Ordering::SeqCst))
            .finish()
    }
}

struct RunningGuard<'a> {
    flag: &'a AtomicBool,
}

impl Drop for RunningGuard<'_> {
    fn drop(&mut self) {
        self.flag.store(false, Ordering::SeqCst);
    }
}
