//! Core built-in traits and types.

use async_trait::async_trait;

use crate::error::BuiltinError;

use super::context::ExecContext;

/// What the read-eval loop should do after a command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    /// Print the next prompt.
    Continue,
    /// Leave the loop and exit with this status.
    Exit(i32),
}

/// A command executed inside the shell process itself.
///
/// Built-ins run on the main flow, never in a child. `argv[0]` is the
/// built-in's own name. Errors are printed by the caller and are never
/// fatal.
#[async_trait]
pub trait Builtin: Send + Sync {
    /// The name the command line dispatches on.
    fn name(&self) -> &str;

    /// Execute with the tokenized argument vector.
    async fn execute(&self, argv: &[String], ctx: &ExecContext) -> Result<Flow, BuiltinError>;
}
