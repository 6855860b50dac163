//! tsh entry point.
//!
//! Usage:
//!   tsh          # Interactive shell with prompt
//!   tsh -p       # No prompt (for scripted drivers)
//!   tsh -v       # Report every job added
//!   tsh -h       # Usage, exit 1

use std::env;
use std::process::ExitCode;

use anyhow::{Context, Result};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use tsh_repl::ReplConfig;

const USAGE: &str = "\
Usage: shell [-hvp]
   -h   print this message
   -v   print additional diagnostic information
   -p   do not emit a command prompt";

/// What the command line asked for.
#[derive(Debug, PartialEq, Eq)]
enum Invocation {
    Run(ReplConfig),
    Usage,
}

/// Parse `-h`, `-v`, `-p`, alone or combined (`-vp`). Option parsing stops
/// at the first non-option argument or `--`; later arguments are ignored.
fn parse_args(args: impl IntoIterator<Item = String>) -> Invocation {
    let mut config = ReplConfig::default();
    for arg in args {
        if arg == "--" {
            break;
        }
        let Some(flags) = arg.strip_prefix('-').filter(|f| !f.is_empty()) else {
            break;
        };
        for flag in flags.chars() {
            match flag {
                'v' => config = config.with_verbose(true),
                'p' => config = config.with_prompt(false),
                _ => return Invocation::Usage,
            }
        }
    }
    Invocation::Run(config)
}

fn main() -> ExitCode {
    // One pipe carries everything a driver needs to see. Children inherit
    // the merged descriptors.
    if let Err(e) = nix::unistd::dup2(1, 2) {
        eprintln!("Error: failed to redirect stderr to stdout: {e}");
        return ExitCode::FAILURE;
    }

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .init();

    let config = match parse_args(env::args().skip(1)) {
        Invocation::Run(config) => config,
        Invocation::Usage => {
            println!("{USAGE}");
            return ExitCode::FAILURE;
        }
    };

    match run(config) {
        Ok(code) => ExitCode::from(u8::try_from(code).unwrap_or(1)),
        Err(e) => {
            eprintln!("Error: {e:?}");
            ExitCode::FAILURE
        }
    }
}

fn run(config: ReplConfig) -> Result<i32> {
    tracing::debug!(?config, "starting shell");
    tsh_repl::run(config).context("shell terminated abnormally")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Invocation {
        parse_args(args.iter().map(|a| a.to_string()))
    }

    #[test]
    fn no_flags_prompts_quietly() {
        assert_eq!(parse(&[]), Invocation::Run(ReplConfig::default()));
    }

    #[test]
    fn flags_combine() {
        let expected = ReplConfig::default().with_prompt(false).with_verbose(true);
        assert_eq!(parse(&["-vp"]), Invocation::Run(expected));
        assert_eq!(parse(&["-v", "-p"]), Invocation::Run(expected));
    }

    #[test]
    fn help_and_unknown_flags_print_usage() {
        assert_eq!(parse(&["-h"]), Invocation::Usage);
        assert_eq!(parse(&["-px"]), Invocation::Usage);
    }

    #[test]
    fn parsing_stops_at_operands() {
        assert_eq!(parse(&["script", "-x"]), Invocation::Run(ReplConfig::default()));
        assert_eq!(
            parse(&["-p", "--", "-x"]),
            Invocation::Run(ReplConfig::default().with_prompt(false))
        );
    }
}
