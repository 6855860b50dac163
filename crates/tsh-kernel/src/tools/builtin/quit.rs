//! quit — Leave the shell.

use async_trait::async_trait;

use crate::error::BuiltinError;
use crate::tools::{Builtin, ExecContext, Flow};

/// Quit builtin. Refuses while any job is stopped, since those would be
/// orphaned in a state nobody can resume.
pub struct Quit;

#[async_trait]
impl Builtin for Quit {
    fn name(&self) -> &str {
        "quit"
    }

    async fn execute(&self, _argv: &[String], ctx: &ExecContext) -> Result<Flow, BuiltinError> {
        if ctx.jobs.has_stopped() {
            return Err(BuiltinError::StoppedJobs);
        }
        Ok(Flow::Exit(0))
    }
}
