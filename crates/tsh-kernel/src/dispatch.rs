//! External command launch — everything that is not a built-in becomes a job.
//!
//! ```text
//! evaluate(line)
//!   └─▶ launch(cmd)
//!         ├── jobs.lock()                     (reaper excluded from here…)
//!         ├── spawn: new process group, pgid = pid
//!         ├── table.add(pid, fg|bg, line)
//!         ├── background? print "[jid] (pid) line"
//!         └── drop guard                      (…to here)
//!   foreground? └─▶ wait_for_foreground(pid)
//! ```
//!
//! The child is placed in its own process group so keyboard signals sent
//! to the shell's group never reach it directly; the shell forwards them
//! to the foreground group instead.

use std::io;
use std::os::unix::process::CommandExt;
use std::process::{Child, Command};

use nix::unistd::Pid;

use tsh_types::JobState;

use crate::lexer::CommandLine;
use crate::say;
use crate::scheduler::JobManager;

/// Start `cmd` as a job and, for a foreground job, wait for it.
///
/// `command_line` is the text recorded in the job table. Launch problems
/// are printed to the console; the read-eval loop always continues.
#[tracing::instrument(level = "debug", skip(jobs, cmd), fields(program = cmd.program()))]
pub async fn launch(jobs: &JobManager, cmd: &CommandLine, command_line: &str, verbose: bool) {
    let console = jobs.console();
    let state = if cmd.background {
        JobState::Background
    } else {
        JobState::Foreground
    };

    let pid = {
        let mut table = jobs.lock();

        let child = match spawn(&cmd.argv) {
            Ok(child) => child,
            Err(e) => {
                tracing::debug!("spawn failed: {}", e);
                say!(console, "{}: Command not found", cmd.argv[0]);
                return;
            }
        };
        let pid = Pid::from_raw(child.id() as i32);

        let id = match table.add(pid, state, command_line) {
            Ok(id) => id,
            Err(e) => {
                // The child keeps running untracked; the reaper collects it.
                say!(console, "{}", e);
                return;
            }
        };
        if verbose {
            say!(console, "Added job [{}] {} {}", id, pid, command_line);
        }
        if cmd.background {
            say!(console, "[{}] ({}) {}", id, pid, command_line);
        }
        pid
    };

    if !cmd.background {
        jobs.wait_for_foreground(pid).await;
    }
}

/// Spawn `argv` in a fresh process group with inherited stdio.
///
/// An exec failure (no such program, not executable) surfaces here as an
/// `Err`: std reports it back to the parent before `spawn` returns.
fn spawn(argv: &[String]) -> io::Result<Child> {
    let (program, args) = argv
        .split_first()
        .ok_or_else(|| io::Error::new(io::ErrorKind::InvalidInput, "empty command"))?;
    Command::new(program).args(args).process_group(0).spawn()
}
