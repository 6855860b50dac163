//! Execution context for built-ins.

use std::sync::Arc;

use crate::console::Console;
use crate::scheduler::JobManager;

/// Shell state handed to a built-in.
pub struct ExecContext {
    /// Job table shared with the signal tasks.
    pub jobs: Arc<JobManager>,
}

impl ExecContext {
    pub fn new(jobs: Arc<JobManager>) -> Self {
        Self { jobs }
    }

    /// Where built-in output and errors go.
    pub fn console(&self) -> &Console {
        self.jobs.console()
    }
}
