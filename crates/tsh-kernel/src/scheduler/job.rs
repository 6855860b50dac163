//! Shared handle to the job table.
//!
//! `JobManager` is the single owner of the [`JobTable`]. The read-eval loop
//! and the signal tasks each hold an `Arc<JobManager>`; nothing reaches the
//! table through ambient global state.
//!
//! # Exclusion discipline
//!
//! ```text
//!   dispatcher                          child-lifecycle task
//!   ──────────                          ────────────────────
//!   let mut jobs = manager.lock();      SIGCHLD
//!   spawn(child)                          manager.lock()  ── blocks ──┐
//!   jobs.add(child, ...)                                              │
//!   drop(jobs)  ─── generation += 1 ───────────────────────────────── ┘
//!                                         waitpid(-1, WNOHANG|WUNTRACED)
//! ```
//!
//! The lifecycle task only calls `waitpid` while holding the table lock, so
//! holding a [`ReapGuard`] is equivalent to blocking SIGCHLD: no child can be
//! collected until its job is registered. Dropping a guard that handed out
//! mutable access publishes a new generation, which is what
//! [`JobManager::wait_for_foreground`] sleeps on. Read-only guards do not,
//! so a waiter inspecting the table never wakes itself.

use std::ops::{Deref, DerefMut};
use std::sync::{Mutex, MutexGuard};

use nix::unistd::Pid;
use tokio::sync::watch;

use tsh_types::{JobInfo, JobState};

use super::table::JobTable;
use crate::console::Console;

/// Owner of the job table plus the change notification channel.
pub struct JobManager {
    table: Mutex<JobTable>,
    /// Bumped when a guard that mutated the table is released.
    changed: watch::Sender<u64>,
    console: Console,
}

impl JobManager {
    pub fn new(console: Console) -> Self {
        let (changed, _) = watch::channel(0);
        Self {
            table: Mutex::new(JobTable::new()),
            changed,
            console,
        }
    }

    /// Enter a critical section over the table.
    ///
    /// While the guard lives no child can be reaped and no other writer can
    /// observe a half-applied change. Keep the section short and never hold
    /// it across an `.await`.
    pub fn lock(&self) -> ReapGuard<'_> {
        ReapGuard {
            table: self.table.lock().unwrap_or_else(|e| e.into_inner()),
            changed: &self.changed,
            dirty: false,
        }
    }

    /// Console shared by every writer of user-visible notices.
    pub fn console(&self) -> &Console {
        &self.console
    }

    pub fn foreground_pid(&self) -> Option<Pid> {
        self.lock().foreground_pid()
    }

    pub fn has_stopped(&self) -> bool {
        self.lock().has_stopped()
    }

    /// Snapshot of the table for listing.
    pub fn list(&self) -> Vec<JobInfo> {
        self.lock().list().collect()
    }

    /// Current change generation. Increases whenever a guard that was
    /// mutably dereferenced is released.
    pub fn generation(&self) -> u64 {
        *self.changed.borrow()
    }

    /// Block until the job with `pid` is gone or no longer in the foreground.
    ///
    /// This is the only suspension point of the read-eval loop. The
    /// subscription is taken before the table is inspected, so a transition
    /// applied between the inspection and the await still wakes us.
    #[tracing::instrument(level = "debug", skip(self), fields(pid = pid.as_raw()))]
    pub async fn wait_for_foreground(&self, pid: Pid) {
        let mut changes = self.changed.subscribe();
        loop {
            let still_foreground = self
                .lock()
                .find_by_pid(pid)
                .is_some_and(|job| job.state == JobState::Foreground);
            if !still_foreground {
                tracing::debug!("foreground job yielded");
                return;
            }
            if changes.changed().await.is_err() {
                // Sender lives as long as `self`; unreachable in practice.
                return;
            }
        }
    }
}

/// Scoped exclusive access to the job table.
///
/// Dereferences to [`JobTable`]. Dropping it releases the lock and, if the
/// table was mutably borrowed, publishes a change notification.
pub struct ReapGuard<'a> {
    table: MutexGuard<'a, JobTable>,
    changed: &'a watch::Sender<u64>,
    dirty: bool,
}

impl Deref for ReapGuard<'_> {
    type Target = JobTable;

    fn deref(&self) -> &JobTable {
        &self.table
    }
}

impl DerefMut for ReapGuard<'_> {
    fn deref_mut(&mut self) -> &mut JobTable {
        self.dirty = true;
        &mut self.table
    }
}

impl Drop for ReapGuard<'_> {
    fn drop(&mut self) {
        if self.dirty {
            self.changed.send_modify(|generation| *generation = generation.wrapping_add(1));
        }
    }
}
