//! jobs — List the job table.

use async_trait::async_trait;

use crate::error::BuiltinError;
use crate::say;
use crate::tools::{Builtin, ExecContext, Flow};

/// Jobs builtin: one `[jid] (pid) State command` line per job, in slot
/// order. Prints nothing when the table is empty.
pub struct Jobs;

#[async_trait]
impl Builtin for Jobs {
    fn name(&self) -> &str {
        "jobs"
    }

    async fn execute(&self, _argv: &[String], ctx: &ExecContext) -> Result<Flow, BuiltinError> {
        for job in ctx.jobs.list() {
            say!(ctx.console(), "{}", job);
        }
        Ok(Flow::Continue)
    }
}
