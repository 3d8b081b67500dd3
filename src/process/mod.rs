use std::cmp::Ordering;
use std::fmt;

pub mod fallback;
#[cfg(feature = "native-procs")]
pub mod native;
pub mod signal;

pub use fallback::CommandInspector;
#[cfg(feature = "native-procs")]
pub use native::NativeInspector;

#[derive(Debug, PartialEq)]
pub enum ProcessError {
    /// The active inspector cannot answer this kind of query.
    Unavailable,
    NoSuchProcess(u32),
    SignalError(String),
    Other(String),
}

impl From<std::io::Error> for ProcessError {
    fn from(e: std::io::Error) -> Self {
        ProcessError::Other(e.to_string())
    }
}

impl fmt::Display for ProcessError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProcessError::Unavailable => write!(f, "process inspection unavailable"),
            ProcessError::NoSuchProcess(pid) => write!(f, "no such process: {}", pid),
            ProcessError::SignalError(msg) => write!(f, "signal error: {}", msg),
            ProcessError::Other(msg) => f.write_str(msg),
        }
    }
}

impl std::error::Error for ProcessError {}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProcessInfo {
    pub pid: u32,
    pub name: String,
    pub user: String,
}

/// A process table, either structured or as dumped by an OS tool.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProcessListing {
    Rows(Vec<ProcessInfo>),
    Raw(String),
}

#[derive(Debug, Clone, PartialEq)]
pub struct ProcessSample {
    pub cpu: f32,
    pub pid: u32,
    pub name: String,
}

impl ProcessSample {
    /// Highest CPU first, then by pid and name.
    pub fn rank(a: &Self, b: &Self) -> Ordering {
        b.cpu
            .total_cmp(&a.cpu)
            .then_with(|| b.pid.cmp(&a.pid))
            .then_with(|| b.name.cmp(&a.name))
    }
}

/// Backend for `ps`, `top` and `kill`. Chosen once per interpreter.
pub trait ProcessInspector {
    fn name(&self) -> &'static str;

    fn list(&self) -> Result<ProcessListing, ProcessError>;

    /// Up to `limit` samples, already ranked.
    fn top(&self, limit: usize) -> Result<Vec<ProcessSample>, ProcessError>;

    /// Sends a terminate request; returns the confirmation message.
    fn terminate(&self, pid: u32) -> Result<String, ProcessError>;
}

/// The native inspector where sysinfo supports the host, else the subprocess one.
pub fn select_inspector() -> Box<dyn ProcessInspector> {
    #[cfg(feature = "native-procs")]
    {
        if sysinfo::IS_SUPPORTED_SYSTEM {
            return Box::new(NativeInspector::new());
        }
    }
    Box::new(CommandInspector::new())
}
