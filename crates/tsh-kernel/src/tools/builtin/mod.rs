//! Built-in commands for tsh.

mod bg;
mod fg;
mod job_ref;
mod jobs;
mod quit;

pub use job_ref::JobRef;

use super::BuiltinRegistry;

/// Register all built-ins with the registry.
pub fn register_builtins(registry: &mut BuiltinRegistry) {
    registry.register(bg::Bg);
    registry.register(fg::Fg);
    registry.register(jobs::Jobs);
    registry.register(quit::Quit);
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use nix::unistd::Pid;
    use tsh_types::JobState;

    use super::*;
    use crate::console::{Captured, Console};
    use crate::error::BuiltinError;
    use crate::scheduler::JobManager;
    use crate::tools::{ExecContext, Flow};

    fn context() -> (ExecContext, Captured) {
        let (console, captured) = Console::capture();
        (ExecContext::new(Arc::new(JobManager::new(console))), captured)
    }

    fn argv(words: &[&str]) -> Vec<String> {
        words.iter().map(|w| w.to_string()).collect()
    }

    async fn run(ctx: &ExecContext, words: &[&str]) -> Result<Flow, BuiltinError> {
        let mut registry = BuiltinRegistry::new();
        register_builtins(&mut registry);
        let builtin = registry.get(words[0]).expect("builtin");
        builtin.execute(&argv(words), ctx).await
    }

    #[test]
    fn registers_all_builtins() {
        let mut registry = BuiltinRegistry::new();
        register_builtins(&mut registry);
        assert_eq!(registry.names(), vec!["bg", "fg", "jobs", "quit"]);
        assert!(!registry.contains("exit"));
    }

    #[tokio::test]
    async fn quit_exits_with_empty_table() {
        let (ctx, captured) = context();
        assert_eq!(run(&ctx, &["quit"]).await, Ok(Flow::Exit(0)));
        assert!(captured.contents().is_empty());
    }

    #[tokio::test]
    async fn quit_refuses_with_stopped_job() {
        let (ctx, _) = context();
        ctx.jobs
            .lock()
            .add(Pid::from_raw(500), JobState::Stopped, "vi notes")
            .unwrap();
        assert_eq!(run(&ctx, &["quit"]).await, Err(BuiltinError::StoppedJobs));
    }

    #[tokio::test]
    async fn quit_ignores_running_background_jobs() {
        let (ctx, _) = context();
        ctx.jobs
            .lock()
            .add(Pid::from_raw(500), JobState::Background, "sleep 100 &")
            .unwrap();
        assert_eq!(run(&ctx, &["quit"]).await, Ok(Flow::Exit(0)));
    }

    #[tokio::test]
    async fn jobs_lists_in_slot_order() {
        let (ctx, captured) = context();
        {
            let mut table = ctx.jobs.lock();
            table.add(Pid::from_raw(501), JobState::Background, "sleep 1 &").unwrap();
            table.add(Pid::from_raw(502), JobState::Stopped, "sleep 2").unwrap();
        }
        assert_eq!(run(&ctx, &["jobs"]).await, Ok(Flow::Continue));
        assert_eq!(
            captured.lines(),
            vec!["[1] (501) Running sleep 1 &", "[2] (502) Stopped sleep 2"]
        );
    }

    #[tokio::test]
    async fn jobs_prints_nothing_when_empty() {
        let (ctx, captured) = context();
        run(&ctx, &["jobs"]).await.unwrap();
        assert!(captured.contents().is_empty());
    }

    #[tokio::test]
    async fn bg_on_running_job_reprints_acknowledgment() {
        let (ctx, captured) = context();
        ctx.jobs
            .lock()
            .add(Pid::from_raw(503), JobState::Background, "sleep 3 &")
            .unwrap();
        assert_eq!(run(&ctx, &["bg", "%1"]).await, Ok(Flow::Continue));
        assert_eq!(captured.lines(), vec!["[1] (503) sleep 3 &"]);
        assert_eq!(ctx.jobs.list()[0].state, JobState::Background);
    }

    #[tokio::test]
    async fn bg_and_fg_report_argument_errors() {
        let (ctx, _) = context();
        assert_eq!(
            run(&ctx, &["bg"]).await.unwrap_err().to_string(),
            "bg command requires PID or %jobid argument"
        );
        assert_eq!(
            run(&ctx, &["fg", "abc"]).await.unwrap_err().to_string(),
            "fg: argument must be a PID or %jobid"
        );
        assert_eq!(
            run(&ctx, &["fg", "%5"]).await.unwrap_err().to_string(),
            "%5: No such job"
        );
        assert_eq!(
            run(&ctx, &["bg", "99999"]).await.unwrap_err().to_string(),
            "(99999): No such process"
        );
    }
}
