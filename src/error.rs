//! # Sequencer Error Types
//!
//! Structured error handling for the command sequencing core using thiserror.
//!
//! The error surface is deliberately small: faults inside a command's action
//! are the command's own concern and surface through its completion channel
//! rather than being absorbed here, and cooperative abort is a controlled
//! termination with its own terminal callback, not an error.

use thiserror::Error;

/// Errors raised by the command sequencing core.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SequencerError {
    /// A sequence was started while a previous one was still draining.
    #[error("a command sequence is already draining on this executor")]
    SequenceInProgress,

    /// A command dropped its completion handle without reporting, so the
    /// sequence can never resume on its own.
    #[error("command '{command_type}' dropped its completion handle without reporting")]
    CompletionLost { command_type: String },
}

pub type Result<T> = std::result::Result<T, SequencerError>;
