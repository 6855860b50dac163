//! fg — Bring a job to the foreground and wait for it.

use async_trait::async_trait;
use nix::sys::signal::Signal;

use tsh_types::JobState;

use crate::error::BuiltinError;
use crate::signals::signal_group;
use crate::tools::{Builtin, ExecContext, Flow};

use super::job_ref::JobRef;

/// Fg builtin: `fg <pid|%jid>`.
///
/// Stopped jobs are continued; running background jobs are just promoted.
/// Either way the shell then waits until the job stops or terminates.
pub struct Fg;

#[async_trait]
impl Builtin for Fg {
    fn name(&self) -> &str {
        "fg"
    }

    async fn execute(&self, argv: &[String], ctx: &ExecContext) -> Result<Flow, BuiltinError> {
        let target = JobRef::parse("fg", argv.get(1).map(String::as_str))?;

        let (pgid, was_stopped) = {
            let mut table = ctx.jobs.lock();
            let job = target.resolve(&mut table)?;
            let was_stopped = job.state == JobState::Stopped;
            job.state = JobState::Foreground;
            (job.pid, was_stopped)
        };

        if was_stopped {
            signal_group(pgid, Signal::SIGCONT);
        }
        ctx.jobs.wait_for_foreground(pgid).await;
        Ok(Flow::Continue)
    }
}
