use std::process::Command;

use super::{signal, ProcessError, ProcessInspector, ProcessListing, ProcessSample};

/// Shells out to the platform's process tools; no CPU sampling.
#[derive(Debug, Clone, Default)]
pub struct CommandInspector;

impl CommandInspector {
    pub fn new() -> Self {
        Self
    }

    #[cfg(windows)]
    fn table_command() -> Command {
        Command::new("tasklist")
    }

    #[cfg(not(windows))]
    fn table_command() -> Command {
        let mut cmd = Command::new("ps");
        cmd.args(["-eo", "pid,comm,user"]);
        cmd
    }
}

impl ProcessInspector for CommandInspector {
    fn name(&self) -> &'static str {
        "subprocess"
    }

    fn list(&self) -> Result<ProcessListing, ProcessError> {
        let output = Self::table_command().output()?;
        Ok(ProcessListing::Raw(
            String::from_utf8_lossy(&output.stdout).into_owned(),
        ))
    }

    fn top(&self, _limit: usize) -> Result<Vec<ProcessSample>, ProcessError> {
        Err(ProcessError::Unavailable)
    }

    fn terminate(&self, pid: u32) -> Result<String, ProcessError> {
        signal::send_terminate(pid)?;
        Ok(format!("Kill signal sent to process {}.", pid))
    }
}
