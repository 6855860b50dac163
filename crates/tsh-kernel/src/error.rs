//! Error types for the kernel.
//!
//! User-input errors from built-ins are [`BuiltinError`]; they are printed
//! and the shell carries on. [`KernelError`] covers OS-level setup failures
//! that make job control impossible, and is fatal at startup.

use thiserror::Error;

/// Fatal kernel errors.
#[derive(Debug, Error)]
pub enum KernelError {
    #[error("failed to install {signal} handler: {source}")]
    SignalSetup {
        signal: &'static str,
        #[source]
        source: std::io::Error,
    },
}

/// Errors reported by built-in commands. The Display text is exactly what
/// the user sees.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BuiltinError {
    #[error("{0} command requires PID or %jobid argument")]
    MissingArgument(String),

    #[error("{0}: argument must be a PID or %jobid")]
    InvalidArgument(String),

    /// Carries the `%N` reference as written.
    #[error("{0}: No such job")]
    NoSuchJob(String),

    /// Carries the process id as written.
    #[error("({0}): No such process")]
    NoSuchProcess(String),

    #[error("There are some processes in stopped state so can't quit")]
    StoppedJobs,
}
