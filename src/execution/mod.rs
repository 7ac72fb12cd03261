//! # Execution
//!
//! The sequencing core: the single-command execution boundary and the
//! asynchronous command executor that drains descriptor queues against it.

pub mod runner;
pub mod sequencer;

pub use runner::{CommandRunner, DirectCommandRunner, ExecutionHooks};
pub use sequencer::{
    AsyncCommandExecutor, CommandExecutedCallback, ResultHandler, SequenceCallback,
    SequenceOutcome, SequencerConfig,
};
