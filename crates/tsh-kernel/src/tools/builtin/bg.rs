//! bg — Resume a stopped job in the background.

use async_trait::async_trait;
use nix::sys::signal::Signal;

use tsh_types::JobState;

use crate::error::BuiltinError;
use crate::say;
use crate::signals::signal_group;
use crate::tools::{Builtin, ExecContext, Flow};

use super::job_ref::JobRef;

/// Bg builtin: `bg <pid|%jid>`.
pub struct Bg;

#[async_trait]
impl Builtin for Bg {
    fn name(&self) -> &str {
        "bg"
    }

    async fn execute(&self, argv: &[String], ctx: &ExecContext) -> Result<Flow, BuiltinError> {
        let target = JobRef::parse("bg", argv.get(1).map(String::as_str))?;

        let (pgid, was_stopped) = {
            let mut table = ctx.jobs.lock();
            let job = target.resolve(&mut table)?;
            let was_stopped = job.state == JobState::Stopped;
            if was_stopped {
                job.state = JobState::Background;
            }
            say!(ctx.console(), "[{}] ({}) {}", job.id, job.pid, job.command);
            (job.pid, was_stopped)
        };

        // A job that is already running only gets the acknowledgment.
        if was_stopped {
            signal_group(pgid, Signal::SIGCONT);
        }
        Ok(Flow::Continue)
    }
}
