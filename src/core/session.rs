use crate::core::env::EnvVarManager;
use crate::history::CommandLog;

/// Mutable state shared by every dispatch of one interpreter session.
#[derive(Debug, Default, Clone)]
pub struct Session {
    history: CommandLog,
    env: EnvVarManager,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn history(&self) -> &CommandLog {
        &self.history
    }

    pub fn history_mut(&mut self) -> &mut CommandLog {
        &mut self.history
    }

    pub fn env(&self) -> &EnvVarManager {
        &self.env
    }

    pub fn env_mut(&mut self) -> &mut EnvVarManager {
        &mut self.env
    }
}
