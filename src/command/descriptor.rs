//! Command descriptors produced by the configuration layer.

use crate::command::async_command::AsyncCommand;
use std::fmt;
use std::sync::Arc;

/// Factory producing a fresh command instance for one execution.
pub type CommandFactory = Arc<dyn Fn() -> Arc<dyn AsyncCommand> + Send + Sync>;

/// Immutable specification of one command in a sequence: the runtime type
/// label used for progress reporting, and the factory that instantiates the
/// command.
///
/// Descriptors are produced by an external configuration layer and never
/// change once built. The executor dequeues them one at a time and consumes
/// each exactly once per run.
#[derive(Clone)]
pub struct CommandDescriptor {
    command_type: String,
    factory: CommandFactory,
}

impl CommandDescriptor {
    pub fn new(
        command_type: impl Into<String>,
        factory: impl Fn() -> Arc<dyn AsyncCommand> + Send + Sync + 'static,
    ) -> Self {
        Self {
            command_type: command_type.into(),
            factory: Arc::new(factory),
        }
    }

    /// Runtime type label of the command this descriptor produces.
    pub fn command_type(&self) -> &str {
        &self.command_type
    }

    /// Construct the command instance for one execution.
    pub fn instantiate(&self) -> Arc<dyn AsyncCommand> {
        (self.factory)()
    }
}

impl fmt::Debug for CommandDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CommandDescriptor")
            .field("command_type", &self.command_type)
            .field("factory", &"<CommandFactory>")
            .finish()
    }
}
