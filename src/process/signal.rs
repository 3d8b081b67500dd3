use crate::process::ProcessError;

/// Sends SIGTERM to a single process.
///
/// pid 0 and values beyond `pid_t` are refused, since `kill(2)` would read
/// them as process-group targets.
#[cfg(unix)]
pub fn send_terminate(pid: u32) -> Result<(), ProcessError> {
    let target = libc::pid_t::try_from(pid)
        .ok()
        .filter(|p| *p > 0)
        .ok_or(ProcessError::NoSuchProcess(pid))?;

    let rc = unsafe { libc::kill(target, libc::SIGTERM) };
    if rc == 0 {
        return Ok(());
    }

    let err = std::io::Error::last_os_error();
    match err.raw_os_error() {
        Some(libc::ESRCH) => Err(ProcessError::NoSuchProcess(pid)),
        _ => Err(ProcessError::SignalError(err.to_string())),
    }
}

#[cfg(windows)]
pub fn send_terminate(pid: u32) -> Result<(), ProcessError> {
    let status = std::process::Command::new("taskkill")
        .args(["/PID", &pid.to_string()])
        .status()?;
    if status.success() {
        Ok(())
    } else {
        Err(ProcessError::SignalError(format!("taskkill exited with {}", status)))
    }
}

#[cfg(not(any(unix, windows)))]
pub fn send_terminate(_pid: u32) -> Result<(), ProcessError> {
    Err(ProcessError::Unavailable)
}
