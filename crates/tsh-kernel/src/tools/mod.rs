//! Built-in command system for tsh.
//!
//! A command line whose first word names a built-in runs inside the shell
//! process; anything else is launched as a job.
//!
//! ```text
//! BuiltinRegistry
//! ├── quit
//! ├── jobs
//! ├── bg   (resume in background)
//! └── fg   (resume in foreground, then wait)
//! ```

mod builtin;
mod context;
mod registry;
mod traits;

pub use builtin::{register_builtins, JobRef};
pub use context::ExecContext;
pub use registry::BuiltinRegistry;
pub use traits::{Builtin, Flow};
