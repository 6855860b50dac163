//! Integration tests for the tsh binary.
//!
//! These drive the built shell the way a trace driver does: commands on
//! stdin, everything the shell says read back from stdout.

use std::io::{BufRead, BufReader, Write};
use std::process::{Command, Output, Stdio};

use nix::sys::signal::{kill, Signal};
use nix::unistd::Pid;

fn tsh() -> Command {
    Command::new(env!("CARGO_BIN_EXE_tsh"))
}

/// Run tsh with `flags`, feed it `script`, and wait for it to exit.
fn run_script(flags: &[&str], script: &str) -> Output {
    let mut child = tsh()
        .args(flags)
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .expect("Failed to spawn tsh");

    child
        .stdin
        .take()
        .expect("stdin")
        .write_all(script.as_bytes())
        .expect("Failed to write script");

    child.wait_with_output().expect("Failed to wait for tsh")
}

fn stdout_lines(output: &Output) -> Vec<String> {
    String::from_utf8_lossy(&output.stdout)
        .lines()
        .map(str::to_string)
        .collect()
}

const USAGE: [&str; 4] = [
    "Usage: shell [-hvp]",
    "   -h   print this message",
    "   -v   print additional diagnostic information",
    "   -p   do not emit a command prompt",
];

#[test]
fn help_prints_usage_and_fails() {
    let output = run_script(&["-h"], "");
    assert_eq!(output.status.code(), Some(1));
    assert_eq!(stdout_lines(&output), USAGE);
}

#[test]
fn unknown_flag_prints_usage() {
    let output = run_script(&["-x"], "");
    assert_eq!(output.status.code(), Some(1));
    assert_eq!(stdout_lines(&output), USAGE);
}

#[test]
fn prompt_is_printed_before_each_read() {
    let output = run_script(&[], "\n");
    assert_eq!(output.status.code(), Some(0), "EOF exits cleanly");
    assert_eq!(String::from_utf8_lossy(&output.stdout), "tsh> tsh> ");
}

#[test]
fn quiet_quit_exits_zero() {
    let output = run_script(&["-p"], "quit\n");
    assert_eq!(output.status.code(), Some(0));
    assert!(output.stdout.is_empty(), "{:?}", String::from_utf8_lossy(&output.stdout));
}

#[test]
fn foreground_output_passes_through() {
    let output = run_script(&["-p"], "/bin/echo hello world\nquit\n");
    assert_eq!(stdout_lines(&output), vec!["hello world"]);
}

#[test]
fn child_stderr_arrives_on_stdout() {
    let output = run_script(&["-p"], "sh -c 'echo oops >&2'\nquit\n");
    assert_eq!(stdout_lines(&output), vec!["oops"]);
    assert!(output.stderr.is_empty());
}

#[test]
fn unknown_command_is_reported() {
    let output = run_script(&["-p"], "no_such_command_tsh_test\nquit\n");
    assert_eq!(
        stdout_lines(&output),
        vec!["no_such_command_tsh_test: Command not found"]
    );
    assert_eq!(output.status.code(), Some(0));
}

#[test]
fn background_job_is_listed() {
    let output = run_script(&["-p"], "sleep 1 &\njobs\nquit\n");
    let lines = stdout_lines(&output);
    assert_eq!(lines.len(), 2, "{lines:?}");
    assert!(lines[0].starts_with("[1] ("), "{}", lines[0]);
    assert!(lines[0].ends_with(") sleep 1 &"), "{}", lines[0]);
    assert!(lines[1].ends_with(") Running sleep 1 &"), "{}", lines[1]);
}

#[test]
fn verbose_reports_added_jobs() {
    let output = run_script(&["-vp"], "sleep 1 &\nquit\n");
    let lines = stdout_lines(&output);
    assert!(lines[0].starts_with("Added job [1] "), "{lines:?}");
    assert!(lines[0].ends_with(" sleep 1 &"), "{lines:?}");
    assert!(lines[1].starts_with("[1] ("), "{lines:?}");
}

#[test]
fn stopped_job_refuses_quit_until_killed() {
    let script = "sh -c 'kill -STOP $$; exit 0'\nquit\nfg %1\nquit\n";
    let output = run_script(&["-p"], script);
    let lines = stdout_lines(&output);
    assert_eq!(lines.len(), 2, "{lines:?}");
    assert!(lines[0].ends_with(") stopped by signal 19"), "{}", lines[0]);
    assert_eq!(lines[1], "There are some processes in stopped state so can't quit");
    assert_eq!(output.status.code(), Some(0));
}

#[test]
fn sigquit_terminates_the_shell() {
    let mut child = tsh()
        .arg("-p")
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .spawn()
        .expect("Failed to spawn tsh");

    let mut stdin = child.stdin.take().expect("stdin");
    let mut stdout = BufReader::new(child.stdout.take().expect("stdout"));

    // Once a command has round-tripped, the signal handlers are in place.
    stdin.write_all(b"/bin/echo ready\n").expect("write");
    let mut line = String::new();
    stdout.read_line(&mut line).expect("read");
    assert_eq!(line, "ready\n");

    kill(Pid::from_raw(child.id() as i32), Signal::SIGQUIT).expect("kill");

    line.clear();
    stdout.read_line(&mut line).expect("read");
    assert_eq!(line, "Terminating after receipt of SIGQUIT signal\n");

    let status = child.wait().expect("wait");
    assert_eq!(status.code(), Some(1));
    drop(stdin);
}
