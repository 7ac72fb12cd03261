//! # Command Types
//!
//! Command-side building blocks for the sequencing core: the asynchronous
//! command capability, completion signalling, descriptors produced by the
//! configuration layer, and the payload shared by every command of a run.

pub mod async_command;
pub mod descriptor;
pub mod payload;

pub use async_command::{AsyncCommand, CompletionHandle, StepCompletion};
pub use descriptor::{CommandDescriptor, CommandFactory};
pub use payload::CommandPayload;
