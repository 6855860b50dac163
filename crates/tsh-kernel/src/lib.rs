//! tsh-kernel: job control for a tiny Unix shell.
//!
//! This crate provides:
//!
//! - **Lexer**: splits a command line into words using logos
//! - **Scheduler**: the fixed-capacity job table and its shared handle
//! - **Signals**: the SIGCHLD reaper and the SIGINT/SIGTSTP forwarders
//! - **Tools**: the `quit`, `jobs`, `bg` and `fg` built-ins
//! - **Kernel**: line evaluation and external command launch

pub mod console;
pub mod dispatch;
pub mod error;
pub mod kernel;
pub mod lexer;
pub mod scheduler;
pub mod signals;
pub mod tools;

pub use console::{Captured, Console};
pub use error::{BuiltinError, KernelError};
pub use kernel::{Kernel, KernelConfig};
pub use lexer::{tokenize, CommandLine};
pub use scheduler::{JobManager, MAX_JOBS};
pub use tools::Flow;
