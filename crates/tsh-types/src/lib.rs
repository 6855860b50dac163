//! Pure data types for tsh — job ids, job states, job listings.
//!
//! This crate is a leaf dependency with no async runtime and no I/O, so
//! tools that only render or inspect job listings do not need the kernel.

pub mod job;

pub use job::*;
