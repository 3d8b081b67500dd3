use std::thread;

use sysinfo::{Pid, Signal, System, Users, MINIMUM_CPU_UPDATE_INTERVAL};

use super::{ProcessError, ProcessInfo, ProcessInspector, ProcessListing, ProcessSample};

/// Reads the process table through sysinfo.
#[derive(Debug, Clone, Default)]
pub struct NativeInspector;

impl NativeInspector {
    pub fn new() -> Self {
        Self
    }
}

impl ProcessInspector for NativeInspector {
    fn name(&self) -> &'static str {
        "sysinfo"
    }

    fn list(&self) -> Result<ProcessListing, ProcessError> {
        let mut system = System::new();
        system.refresh_processes();
        let users = Users::new_with_refreshed_list();

        let mut rows: Vec<ProcessInfo> = system
            .processes()
            .iter()
            .map(|(pid, process)| ProcessInfo {
                pid: pid.as_u32(),
                name: process.name().to_string(),
                user: process
                    .user_id()
                    .and_then(|uid| users.get_user_by_id(uid))
                    .map(|user| user.name().to_string())
                    .unwrap_or_default(),
            })
            .collect();
        rows.sort_by_key(|row| row.pid);

        Ok(ProcessListing::Rows(rows))
    }

    /// CPU usage needs two refreshes at least the minimum interval apart.
    fn top(&self, limit: usize) -> Result<Vec<ProcessSample>, ProcessError> {
        let mut system = System::new();
        system.refresh_processes();
        thread::sleep(MINIMUM_CPU_UPDATE_INTERVAL);
        system.refresh_processes();

        let mut samples: Vec<ProcessSample> = system
            .processes()
            .iter()
            .map(|(pid, process)| ProcessSample {
                cpu: process.cpu_usage(),
                pid: pid.as_u32(),
                name: process.name().to_string(),
            })
            .collect();
        samples.sort_by(ProcessSample::rank);
        samples.truncate(limit);

        Ok(samples)
    }

    fn terminate(&self, pid: u32) -> Result<String, ProcessError> {
        let target = Pid::from_u32(pid);
        let mut system = System::new();
        if !system.refresh_process(target) {
            return Err(ProcessError::NoSuchProcess(pid));
        }
        let process = system
            .process(target)
            .ok_or(ProcessError::NoSuchProcess(pid))?;

        match process.kill_with(Signal::Term) {
            Some(true) => Ok(format!("Process {} terminated.", pid)),
            Some(false) => Err(ProcessError::SignalError(format!(
                "failed to signal process {}",
                pid
            ))),
            None => Err(ProcessError::SignalError(
                "SIGTERM is not supported on this platform".into(),
            )),
        }
    }
}
