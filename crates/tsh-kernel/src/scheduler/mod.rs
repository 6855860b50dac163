//! Scheduler module for tsh — the job table and its shared handle.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                      JobManager                             │
//! │  table: Mutex<JobTable>      changed: watch::Sender<u64>    │
//! │  - lock() → ReapGuard        (critical section, RAII)       │
//! │  - wait_for_foreground(pid)  (sleeps on `changed`)          │
//! │  - list() → Vec<JobInfo>                                    │
//! └─────────────────────────────────────────────────────────────┘
//!            ▲                               ▲
//!            │ add / bg / fg                 │ stop / remove
//!     Command dispatcher              Signal tasks (SIGCHLD)
//! ```

mod job;
mod table;

pub use job::{JobManager, ReapGuard};
pub use table::{Job, JobTable, TableError, MAX_JOBS};
