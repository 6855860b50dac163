//! Fixed-capacity job table.
//!
//! An arena of `MAX_JOBS` slots scanned linearly. Lookups are O(N) and N
//! stays in the tens.
//!
//! The table has no locking of its own. `JobManager` owns it behind a mutex
//! and is the only way the rest of the kernel reaches it.

use nix::unistd::Pid;
use thiserror::Error;

use tsh_types::{JobId, JobInfo, JobState};

/// Maximum number of jobs tracked at once.
pub const MAX_JOBS: usize = 16;

/// Errors from table mutation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum TableError {
    #[error("Tried to create too many jobs")]
    Full,

    /// Another job already holds the foreground.
    #[error("Job [{0}] is already in the foreground")]
    ForegroundBusy(JobId),
}

/// One tracked job.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Job {
    /// Leader process id; also the process group id.
    pub pid: Pid,
    pub id: JobId,
    pub state: JobState,
    /// Command line as typed, without the trailing newline.
    pub command: String,
}

impl Job {
    pub fn info(&self) -> JobInfo {
        JobInfo {
            id: self.id,
            pid: self.pid.as_raw(),
            state: self.state,
            command: self.command.clone(),
        }
    }
}

/// The job table: `MAX_JOBS` slots, each free (`None`) or occupied.
#[derive(Debug)]
pub struct JobTable {
    slots: [Option<Job>; MAX_JOBS],
    next_id: u32,
}

impl JobTable {
    pub fn new() -> Self {
        Self {
            slots: std::array::from_fn(|_| None),
            next_id: 1,
        }
    }

    /// Register a new job in the first free slot.
    ///
    /// A foreground job is rejected while another job is in the foreground,
    /// leaving the table untouched.
    pub fn add(&mut self, pid: Pid, state: JobState, command: &str) -> Result<JobId, TableError> {
        debug_assert!(pid.as_raw() > 0, "job pid must be positive");
        if state == JobState::Foreground
            && let Some(current) = self.iter().find(|job| job.state == JobState::Foreground)
        {
            return Err(TableError::ForegroundBusy(current.id));
        }

        let Some(index) = self.slots.iter().position(Option::is_none) else {
            return Err(TableError::Full);
        };

        let id = self.allocate_id();
        self.slots[index] = Some(Job {
            pid,
            id,
            state,
            command: command.to_string(),
        });
        Ok(id)
    }

    /// Next id from the counter, wrapping to 1 past capacity. If the wrapped
    /// counter collides with a live job, fall back to `1 + max`.
    fn allocate_id(&mut self) -> JobId {
        let candidate = JobId(self.next_id);
        let id = if self.find_by_jid(candidate).is_some() {
            JobId(self.max_id() + 1)
        } else {
            candidate
        };

        self.next_id = id.0 + 1;
        if self.next_id as usize > MAX_JOBS {
            self.next_id = 1;
        }
        id
    }

    fn max_id(&self) -> u32 {
        self.iter().map(|job| job.id.0).max().unwrap_or(0)
    }

    /// Clear the slot holding `pid`. Returns the removed job.
    pub fn remove(&mut self, pid: Pid) -> Option<Job> {
        let slot = self
            .slots
            .iter_mut()
            .find(|slot| slot.as_ref().is_some_and(|job| job.pid == pid))?;
        let job = slot.take();
        self.next_id = self.max_id() + 1;
        job
    }

    pub fn find_by_pid(&self, pid: Pid) -> Option<&Job> {
        self.iter().find(|job| job.pid == pid)
    }

    pub fn find_by_pid_mut(&mut self, pid: Pid) -> Option<&mut Job> {
        self.iter_mut().find(|job| job.pid == pid)
    }

    pub fn find_by_jid(&self, id: JobId) -> Option<&Job> {
        self.iter().find(|job| job.id == id)
    }

    pub fn find_by_jid_mut(&mut self, id: JobId) -> Option<&mut Job> {
        self.iter_mut().find(|job| job.id == id)
    }

    /// Pid of the foreground job, if any.
    pub fn foreground_pid(&self) -> Option<Pid> {
        self.iter()
            .find(|job| job.state == JobState::Foreground)
            .map(|job| job.pid)
    }

    /// True if any job is stopped.
    pub fn has_stopped(&self) -> bool {
        self.iter().any(|job| job.state == JobState::Stopped)
    }

    /// Occupied slots in table order. Call again to restart.
    pub fn iter(&self) -> impl Iterator<Item = &Job> {
        self.slots.iter().flatten()
    }

    fn iter_mut(&mut self) -> impl Iterator<Item = &mut Job> {
        self.slots.iter_mut().flatten()
    }

    /// Listing snapshots in table order.
    pub fn list(&self) -> impl Iterator<Item = JobInfo> + '_ {
        self.iter().map(Job::info)
    }

    pub fn len(&self) -> usize {
        self.iter().count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Default for JobTable {
    fn default() -> Self {
        Self::new()
    }
}
