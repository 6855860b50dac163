//! Signal tasks: the child reaper and the keyboard forwarders.
//!
//! Each signal is drained from a `tokio::signal::unix` stream by its own
//! task. The OS-level handler installed by tokio only records delivery, so
//! the work below runs in ordinary task context and may take the job table
//! lock, format output, and log.
//!
//! | signal  | task                     | effect                                   |
//! |---------|--------------------------|------------------------------------------|
//! | SIGCHLD | [`reap_children`]        | stop/remove jobs, print notices          |
//! | SIGINT  | `forward_to_foreground`  | `killpg(fg, SIGINT)`                     |
//! | SIGTSTP | `forward_to_foreground`  | `killpg(fg, SIGTSTP)`                    |
//! | SIGQUIT | `quit_on_sigquit`        | print notice, exit(1)                    |
//!
//! The forwarders never touch job state. A stop or termination they cause
//! comes back later as SIGCHLD and is applied by the reaper.

use std::sync::Arc;

use nix::errno::Errno;
use nix::sys::signal::{self, Signal};
use nix::sys::wait::{waitpid, WaitPidFlag, WaitStatus};
use nix::unistd::Pid;
use tokio::signal::unix::{signal as listen, SignalKind};
use tokio::task::JoinHandle;

use tsh_types::JobState;

use crate::error::KernelError;
use crate::scheduler::JobManager;
use crate::say;

/// Running signal tasks. Dropping this aborts them.
pub struct SignalHandlers {
    tasks: Vec<JoinHandle<()>>,
}

impl SignalHandlers {
    /// Register the four signal streams and spawn their tasks.
    ///
    /// Must be called from within a Tokio runtime. Registration failure is
    /// returned rather than logged: without these handlers the shell cannot
    /// keep its job table correct.
    pub fn install(jobs: Arc<JobManager>) -> Result<Self, KernelError> {
        let sigchld = register("SIGCHLD", SignalKind::child())?;
        let sigint = register("SIGINT", SignalKind::interrupt())?;
        let sigtstp = register("SIGTSTP", SignalKind::from_raw(Signal::SIGTSTP as i32))?;
        let sigquit = register("SIGQUIT", SignalKind::quit())?;

        let tasks = vec![
            tokio::spawn(child_lifecycle(jobs.clone(), sigchld)),
            tokio::spawn(forward_to_foreground(jobs.clone(), sigint, Signal::SIGINT)),
            tokio::spawn(forward_to_foreground(jobs.clone(), sigtstp, Signal::SIGTSTP)),
            tokio::spawn(quit_on_sigquit(jobs, sigquit)),
        ];
        tracing::debug!("signal handlers installed");

        Ok(Self { tasks })
    }
}

impl Drop for SignalHandlers {
    fn drop(&mut self) {
        for task in &self.tasks {
            task.abort();
        }
    }
}

fn register(name: &'static str, kind: SignalKind) -> Result<tokio::signal::unix::Signal, KernelError> {
    listen(kind).map_err(|source| KernelError::SignalSetup { signal: name, source })
}

async fn child_lifecycle(jobs: Arc<JobManager>, mut sigchld: tokio::signal::unix::Signal) {
    while sigchld.recv().await.is_some() {
        reap_children(&jobs);
    }
}

/// Collect every child that has terminated or stopped, without blocking on
/// children that are still running.
///
/// Runs entirely inside one table critical section, so it cannot observe a
/// child that the dispatcher has spawned but not yet registered. Children
/// with no job (spawned while the table was full) are reaped silently.
pub fn reap_children(jobs: &JobManager) {
    let console = jobs.console();
    let mut table = jobs.lock();

    loop {
        let status = match waitpid(
            Pid::from_raw(-1),
            Some(WaitPidFlag::WNOHANG | WaitPidFlag::WUNTRACED),
        ) {
            Ok(WaitStatus::StillAlive) | Err(Errno::ECHILD) => break,
            Ok(status) => status,
            Err(Errno::EINTR) => continue,
            Err(e) => {
                tracing::warn!("waitpid failed: {}", e);
                break;
            }
        };

        match status {
            WaitStatus::Exited(pid, code) => match table.remove(pid) {
                Some(job) => tracing::debug!(jid = %job.id, pid = pid.as_raw(), code, "job exited"),
                None => tracing::debug!(pid = pid.as_raw(), code, "untracked child exited"),
            },
            WaitStatus::Signaled(pid, sig, _) => match table.remove(pid) {
                Some(job) => {
                    say!(console, "Job [{}] ({}) terminated by signal {}", job.id, pid, sig as i32)
                }
                None => tracing::debug!(pid = pid.as_raw(), signal = %sig, "untracked child killed"),
            },
            WaitStatus::Stopped(pid, sig) => match table.find_by_pid_mut(pid) {
                Some(job) => {
                    job.state = JobState::Stopped;
                    say!(console, "Job [{}] ({}) stopped by signal {}", job.id, pid, sig as i32);
                }
                None => tracing::debug!(pid = pid.as_raw(), signal = %sig, "untracked child stopped"),
            },
            other => tracing::trace!(?other, "ignoring wait status"),
        }
    }
}

async fn forward_to_foreground(
    jobs: Arc<JobManager>,
    mut stream: tokio::signal::unix::Signal,
    sig: Signal,
) {
    while stream.recv().await.is_some() {
        match jobs.foreground_pid() {
            Some(pid) => signal_group(pid, sig),
            None => tracing::trace!(signal = %sig, "no foreground job"),
        }
    }
}

async fn quit_on_sigquit(jobs: Arc<JobManager>, mut stream: tokio::signal::unix::Signal) {
    if stream.recv().await.is_some() {
        say!(jobs.console(), "Terminating after receipt of SIGQUIT signal");
        std::process::exit(1);
    }
}

/// Deliver `sig` to every process in the job's group.
///
/// The job leader's pid is its process group id. Delivery failure (the
/// group already exited) is logged; the reaper owns the table consequences.
pub fn signal_group(pgid: Pid, sig: Signal) {
    tracing::debug!(pgid = pgid.as_raw(), signal = %sig, "signalling job");
    if let Err(e) = signal::killpg(pgid, sig) {
        tracing::warn!("failed to send {} to process group {}: {}", sig, pgid, e);
    }
}
