//! tsh REPL — the read-eval loop in front of the job-control kernel.
//!
//! It handles:
//! - The `tsh> ` prompt (suppressed with `-p`)
//! - Line editing and history via rustyline when stdin is a terminal
//! - Plain line reading when stdin is a pipe or file, for drivers
//! - End of input (ctrl-d) as a clean exit

use std::io::{self, BufRead, IsTerminal, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};
use rustyline::error::ReadlineError;
use rustyline::history::DefaultHistory;
use rustyline::Editor;
use tokio::runtime::Runtime;

use tsh_kernel::{Flow, Kernel, KernelConfig};

/// Prompt printed before each read.
pub const PROMPT: &str = "tsh> ";

/// Startup options for the REPL.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReplConfig {
    /// Print [`PROMPT`] before each read.
    pub emit_prompt: bool,
    /// Report every job added to the table.
    pub verbose: bool,
}

impl Default for ReplConfig {
    fn default() -> Self {
        Self {
            emit_prompt: true,
            verbose: false,
        }
    }
}

impl ReplConfig {
    pub fn with_prompt(mut self, emit_prompt: bool) -> Self {
        self.emit_prompt = emit_prompt;
        self
    }

    pub fn with_verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }
}

/// REPL state: the kernel plus the runtime its signal tasks live on.
pub struct Repl {
    kernel: Kernel,
    runtime: Runtime,
    config: ReplConfig,
}

impl Repl {
    pub fn with_config(config: ReplConfig) -> Result<Self> {
        // Multi-threaded so children are reaped while the main thread sits
        // in a blocking read.
        let runtime = Runtime::new().context("Failed to create tokio runtime")?;
        let kernel = {
            let _enter = runtime.enter();
            Kernel::new(KernelConfig::repl().with_verbose(config.verbose))
                .context("Failed to create kernel")?
        };

        Ok(Self {
            kernel,
            runtime,
            config,
        })
    }

    /// Evaluate one line, blocking until any foreground job yields.
    pub fn process_line(&mut self, line: &str) -> Flow {
        self.runtime.block_on(self.kernel.evaluate(line))
    }

    fn prompt(&self) -> &'static str {
        if self.config.emit_prompt { PROMPT } else { "" }
    }
}

/// Run the REPL until `quit` or end of input. Returns the exit status.
pub fn run(config: ReplConfig) -> Result<i32> {
    let mut repl = Repl::with_config(config)?;

    if io::stdin().is_terminal() {
        run_interactive(&mut repl)
    } else {
        run_piped(&mut repl)
    }
}

/// Line-at-a-time loop for non-terminal input.
fn run_piped(repl: &mut Repl) -> Result<i32> {
    let mut input = io::stdin().lock();
    let mut buf = Vec::new();

    loop {
        if repl.config.emit_prompt {
            let mut stdout = io::stdout();
            write!(stdout, "{}", PROMPT).context("Failed to write prompt")?;
            stdout.flush().context("Failed to flush prompt")?;
        }

        buf.clear();
        let read = input
            .read_until(b'\n', &mut buf)
            .context("Failed to read command line")?;
        if read == 0 {
            return Ok(0);
        }

        let line = String::from_utf8_lossy(&buf);
        if let Flow::Exit(code) = repl.process_line(&line) {
            return Ok(code);
        }
    }
}

fn history_path() -> Option<PathBuf> {
    directories::BaseDirs::new().map(|b| b.data_dir().join("tsh").join("history.txt"))
}

/// Save REPL history to disk.
fn save_history(rl: &mut Editor<(), DefaultHistory>, history_path: &Option<PathBuf>) {
    if let Some(path) = history_path {
        if let Some(parent) = path.parent()
            && let Err(e) = std::fs::create_dir_all(parent)
        {
            tracing::warn!("Failed to create history directory: {}", e);
        }
        if let Err(e) = rl.save_history(path) {
            tracing::warn!("Failed to save history: {}", e);
        }
    }
}

/// Terminal loop with line editing and persistent history.
fn run_interactive(repl: &mut Repl) -> Result<i32> {
    let mut rl: Editor<(), DefaultHistory> =
        Editor::new().context("Failed to create editor")?;

    let history_path = history_path();
    if let Some(ref path) = history_path
        && let Err(e) = rl.load_history(path)
    {
        // Missing history is expected on first run.
        let is_not_found = matches!(&e, ReadlineError::Io(io_err) if io_err.kind() == io::ErrorKind::NotFound);
        if !is_not_found {
            tracing::warn!("Failed to load history: {}", e);
        }
    }

    let code = loop {
        match rl.readline(repl.prompt()) {
            Ok(line) => {
                if !line.trim().is_empty()
                    && let Err(e) = rl.add_history_entry(line.as_str())
                {
                    tracing::warn!("Failed to add history entry: {}", e);
                }
                if let Flow::Exit(code) = repl.process_line(&line) {
                    break code;
                }
            }
            // ctrl-c at the prompt: nothing is running, just re-prompt.
            Err(ReadlineError::Interrupted) => continue,
            Err(ReadlineError::Eof) => break 0,
            Err(err) => {
                save_history(&mut rl, &history_path);
                return Err(err).context("Failed to read command line");
            }
        }
    };

    save_history(&mut rl, &history_path);
    Ok(code)
}
