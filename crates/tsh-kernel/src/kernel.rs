//! Core kernel: one tokenized command line in, one [`Flow`] out.
//!
//! The kernel owns the job table, the built-in registry and the signal
//! tasks. Frontends (the REPL, tests) drive it one line at a time with
//! [`Kernel::evaluate`].

use std::sync::Arc;

use anyhow::{Context, Result};

use crate::console::Console;
use crate::dispatch;
use crate::lexer::tokenize;
use crate::say;
use crate::scheduler::JobManager;
use crate::signals::SignalHandlers;
use crate::tools::{register_builtins, BuiltinRegistry, ExecContext, Flow};

/// Configuration for initializing a kernel.
#[derive(Debug, Clone)]
pub struct KernelConfig {
    /// Name of this kernel (for identification in logs).
    pub name: String,

    /// Print an `Added job` line for every job entered into the table.
    pub verbose: bool,
}

impl Default for KernelConfig {
    fn default() -> Self {
        Self {
            name: "default".to_string(),
            verbose: false,
        }
    }
}

impl KernelConfig {
    /// Create a kernel config with the given name.
    pub fn named(name: &str) -> Self {
        Self {
            name: name.to_string(),
            ..Self::default()
        }
    }

    /// Config for the interactive shell.
    pub fn repl() -> Self {
        Self::named("repl")
    }

    /// Set verbose job reporting.
    pub fn with_verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }
}

/// The job-control kernel.
pub struct Kernel {
    name: String,
    verbose: bool,
    jobs: Arc<JobManager>,
    builtins: BuiltinRegistry,
    _signals: SignalHandlers,
}

impl Kernel {
    /// Create a kernel that prints to stdout.
    ///
    /// Must be called from within a Tokio runtime: the signal tasks are
    /// spawned onto it.
    pub fn new(config: KernelConfig) -> Result<Self> {
        Self::with_console(config, Console::stdout())
    }

    /// Create a kernel that prints through `console`.
    pub fn with_console(config: KernelConfig, console: Console) -> Result<Self> {
        let jobs = Arc::new(JobManager::new(console));
        let signals = SignalHandlers::install(jobs.clone())
            .context("job control needs SIGCHLD, SIGINT, SIGTSTP and SIGQUIT")?;

        let mut builtins = BuiltinRegistry::new();
        register_builtins(&mut builtins);

        tracing::info!(name = %config.name, verbose = config.verbose, "kernel ready");

        Ok(Self {
            name: config.name,
            verbose: config.verbose,
            jobs,
            builtins,
            _signals: signals,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Shared handle to the job table.
    pub fn jobs(&self) -> Arc<JobManager> {
        self.jobs.clone()
    }

    /// Evaluate one command line.
    ///
    /// Returns once the line's effects are complete: immediately for
    /// built-ins (except `fg`) and background jobs, and only after the
    /// foreground job stops or terminates otherwise.
    #[tracing::instrument(level = "info", skip(self), fields(kernel = %self.name))]
    pub async fn evaluate(&self, line: &str) -> Flow {
        let command_line = line.trim_end_matches(['\n', '\r']);
        let cmd = tokenize(command_line);
        let Some(program) = cmd.program() else {
            return Flow::Continue;
        };

        if let Some(builtin) = self.builtins.get(program) {
            let ctx = ExecContext::new(self.jobs.clone());
            return match builtin.execute(&cmd.argv, &ctx).await {
                Ok(flow) => flow,
                Err(e) => {
                    say!(self.jobs.console(), "{}", e);
                    Flow::Continue
                }
            };
        }

        dispatch::launch(&self.jobs, &cmd, command_line, self.verbose).await;
        Flow::Continue
    }
}

impl std::fmt::Debug for Kernel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Kernel")
            .field("name", &self.name)
            .field("verbose", &self.verbose)
            .field("builtins", &self.builtins)
            .finish_non_exhaustive()
    }
}
