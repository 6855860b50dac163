//! Job references shared by `bg` and `fg`: `%N` for a job id, bare digits
//! for a process id.

use nix::unistd::Pid;

use tsh_types::JobId;

use crate::error::BuiltinError;
use crate::scheduler::{Job, JobTable};

/// A parsed `bg`/`fg` argument.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum JobRef {
    /// `%N`, with the argument as typed for error messages.
    Job { id: JobId, text: String },
    Process(Pid),
}

impl JobRef {
    /// Parse the first argument of `command`.
    ///
    /// Only plain decimal digits are accepted, checked character by
    /// character before conversion, so `+3`, ` 3` and `%-1` are usage
    /// errors rather than quietly parsed. A number too large to be an id
    /// cannot name anything and is reported as not found.
    pub fn parse(command: &str, arg: Option<&str>) -> Result<Self, BuiltinError> {
        let Some(arg) = arg else {
            return Err(BuiltinError::MissingArgument(command.to_string()));
        };

        let (digits, is_job) = match arg.strip_prefix('%') {
            Some(rest) => (rest, true),
            None => (arg, false),
        };
        if digits.is_empty() || !digits.chars().all(|c| c.is_ascii_digit()) {
            return Err(BuiltinError::InvalidArgument(command.to_string()));
        }

        if is_job {
            digits
                .parse::<u32>()
                .map(|n| JobRef::Job {
                    id: JobId(n),
                    text: arg.to_string(),
                })
                .map_err(|_| BuiltinError::NoSuchJob(arg.to_string()))
        } else {
            digits
                .parse::<i32>()
                .map(|n| JobRef::Process(Pid::from_raw(n)))
                .map_err(|_| BuiltinError::NoSuchProcess(arg.to_string()))
        }
    }

    /// Look the reference up in the table.
    pub fn resolve<'t>(&self, table: &'t mut JobTable) -> Result<&'t mut Job, BuiltinError> {
        match self {
            JobRef::Job { id, text } => table
                .find_by_jid_mut(*id)
                .ok_or_else(|| BuiltinError::NoSuchJob(text.clone())),
            JobRef::Process(pid) => table
                .find_by_pid_mut(*pid)
                .ok_or_else(|| BuiltinError::NoSuchProcess(pid.to_string())),
        }
    }
}
