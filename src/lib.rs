#![allow(clippy::missing_errors_doc)] // Allow public functions without # Errors sections
#![allow(clippy::must_use_candidate)] // Allow methods without must_use when context is clear

//! # Sequencer Core
//!
//! Asynchronous command sequencing core for dependency-injection application
//! frameworks.
//!
//! ## Overview
//!
//! Given an ordered collection of command descriptors and a shared payload,
//! the executor runs each command one at a time, suspends until the command
//! signals its own completion, and only then proceeds to the next. Sequences
//! can be aborted mid-flight (optionally forwarding a cancellation request to
//! the in-flight command), report per-command progress, and detain every
//! in-flight instance in a retention registry so asynchronous work never
//! outlives its command.
//!
//! ## Key Guarantees
//!
//! - **Strict FIFO sequencing**: a later descriptor never starts before the
//!   current command's completion (or the run's abort) has been processed
//! - **Single command in flight**: per executor, at most one command is ever
//!   awaiting completion
//! - **Balanced retention**: every instantiated command is detained once and
//!   released exactly once, whether the run completes, aborts, or loses a
//!   command
//! - **Cooperative cancellation**: abort requests flip state and ask the
//!   in-flight command to wind down; halting happens at the next checkpoint
//!
//! ## Module Organization
//!
//! - [`command`] - Command capability, completion signalling, descriptors, payload
//! - [`execution`] - Single-command execution boundary and the sequencing executor
//! - [`registry`] - Object retention for in-flight commands
//! - [`error`] - Structured error handling
//!
//! ## Quick Start
//!
//! ```rust
//! use std::sync::Arc;
//!
//! use async_trait::async_trait;
//! use sequencer_core::{
//!     AsyncCommand, AsyncCommandExecutor, CommandDescriptor, CommandPayload,
//!     CompletionHandle, DirectCommandRunner, InMemoryRetention,
//! };
//!
//! struct LoadProfile;
//!
//! #[async_trait]
//! impl AsyncCommand for LoadProfile {
//!     async fn execute(
//!         self: Arc<Self>,
//!         payload: Arc<CommandPayload>,
//!         completion: CompletionHandle,
//!     ) {
//!         // Long-running work would move `completion` into its own task and
//!         // signal when done; this command finishes inline.
//!         payload.insert("profile", serde_json::json!({"name": "ada"}));
//!         completion.executed();
//!     }
//!
//!     fn abort(&self) {}
//!
//!     fn command_type(&self) -> &str {
//!         "LoadProfile"
//!     }
//! }
//!
//! # async fn example() -> sequencer_core::Result<()> {
//! let executor = AsyncCommandExecutor::new(
//!     Arc::new(DirectCommandRunner::new()),
//!     Arc::new(InMemoryRetention::new()),
//! );
//!
//! executor.set_command_executed_callback(Some(Arc::new(|command_type, current, total| {
//!     println!("{command_type}: {current}/{total}");
//! })));
//!
//! let payload = Arc::new(CommandPayload::new());
//! let outcome = executor
//!     .execute_async_commands(
//!         vec![CommandDescriptor::new("LoadProfile", || Arc::new(LoadProfile))],
//!         Arc::clone(&payload),
//!     )
//!     .await?;
//!
//! println!("sequence finished: {outcome:?}");
//! # Ok(())
//! # }
//! # fn main() -> sequencer_core::Result<()> {
//! #     tokio::runtime::Builder::new_current_thread()
//! #         .build()
//! #         .expect("runtime")
//! #         .block_on(example())
//! # }
//! ```

pub mod command;
pub mod error;
pub mod execution;
pub mod registry;

pub use command::{
    AsyncCommand, CommandDescriptor, CommandFactory, CommandPayload, CompletionHandle,
    StepCompletion,
};
pub use error::{Result, SequencerError};
pub use execution::{
    AsyncCommandExecutor, CommandExecutedCallback, CommandRunner, DirectCommandRunner,
    ExecutionHooks, ResultHandler, SequenceCallback, SequenceOutcome, SequencerConfig,
};
pub use registry::{InMemoryRetention, RetentionRegistry};
