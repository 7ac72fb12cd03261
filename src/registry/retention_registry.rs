//! # Retention Registry
//!
//! The application context's object-retention boundary. The executor detains
//! each command instance before its action runs and releases it once when the
//! command reports completion (or its completion handle is lost), so an
//! instance doing asynchronous work is never reclaimed mid-flight.

use crate::command::AsyncCommand;
use parking_lot::Mutex;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::{debug, warn};

/// Tracks objects for an indefinite lifetime.
///
/// Idempotency and double-release behavior are the registry's own contract;
/// the executor guarantees balanced detain/release pairs per instance under
/// non-faulted operation.
pub trait RetentionRegistry: Send + Sync {
    /// Keep `command` reachable until released.
    fn detain(&self, command: Arc<dyn AsyncCommand>);

    /// Allow `command` to be reclaimed.
    fn release(&self, command: &Arc<dyn AsyncCommand>);
}

/// In-memory retention registry keyed by object identity.
#[derive(Default)]
pub struct InMemoryRetention {
    held: Mutex<HashMap<usize, Arc<dyn AsyncCommand>>>,
}

impl InMemoryRetention {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of instances currently detained.
    pub fn retained_count(&self) -> usize {
        self.held.lock().len()
    }

    fn key(command: &Arc<dyn AsyncCommand>) -> usize {
        Arc::as_ptr(command).cast::<()>() as usize
    }
}

impl RetentionRegistry for InMemoryRetention {
    fn detain(&self, command: Arc<dyn AsyncCommand>) {
        debug!(
            command_type = command.command_type(),
            "detaining command instance"
        );
        self.held.lock().insert(Self::key(&command), command);
    }

    fn release(&self, command: &Arc<dyn AsyncCommand>) {
        if self.held.lock().remove(&Self::key(command)).is_some() {
            debug!(
                command_type = command.command_type(),
                "released command instance"
            );
        } else {
            warn!(
                command_type = command.command_type(),
                "release of an instance that was not detained"
            );
        }
    }
}
