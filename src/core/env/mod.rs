mod vars;

pub use vars::EnvVarManager;

#[derive(Debug, PartialEq)]
pub enum EnvError {
    VarNotFound(String),
    InvalidName(String),
    InvalidValue(&'static str),
}

impl std::fmt::Display for EnvError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EnvError::VarNotFound(var) => write!(f, "Environment variable not found: {}", var),
            EnvError::InvalidName(name) => write!(f, "Invalid variable name: '{}'", name),
            EnvError::InvalidValue(val) => write!(f, "Invalid value: {}", val),
        }
    }
}

impl std::error::Error for EnvError {}
