//! Job identification and state types.

use std::fmt;

/// Shell-local identifier for a job, shown as `[N]` and addressed as `%N`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct JobId(pub u32);

impl fmt::Display for JobId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// State of an occupied job slot.
///
/// A free slot has no state at all; the job table models it as an empty
/// slot rather than an `Undefined` variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum JobState {
    /// Running and owning the shell's attention. At most one job is here.
    Foreground,
    /// Running without the shell waiting on it.
    Background,
    /// Stopped by a signal (e.g. ctrl-z / SIGTSTP).
    Stopped,
}

impl JobState {
    /// Human-readable label used by the `jobs` listing.
    pub fn label(self) -> &'static str {
        match self {
            JobState::Foreground => "Foreground",
            JobState::Background => "Running",
            JobState::Stopped => "Stopped",
        }
    }
}

impl fmt::Display for JobState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Snapshot of one job for listing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JobInfo {
    /// Job ID.
    pub id: JobId,
    /// OS process id of the job leader (also its process group id).
    pub pid: i32,
    /// Current state.
    pub state: JobState,
    /// The command line as the user typed it.
    pub command: String,
}

impl fmt::Display for JobInfo {
    /// Formats as `[jid] (pid) <state> command_line`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] ({}) {} {}", self.id, self.pid, self.state, self.command)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn state_labels_match_listing_vocabulary() {
        assert_eq!(JobState::Background.to_string(), "Running");
        assert_eq!(JobState::Foreground.to_string(), "Foreground");
        assert_eq!(JobState::Stopped.to_string(), "Stopped");
    }

    #[test]
    fn info_renders_listing_line() {
        let info = JobInfo {
            id: JobId(2),
            pid: 4242,
            state: JobState::Stopped,
            command: "sleep 10".to_string(),
        };
        assert_eq!(info.to_string(), "[2] (4242) Stopped sleep 10");
    }
}
