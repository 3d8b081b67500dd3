use std::fmt;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use crate::core::env::{EnvError, EnvVarManager};
use crate::core::outcome::Theme;
use crate::path::PathExpander;

const RC_FILE: &str = ".winuxrc";

/// Settings read from the rc file before the first prompt.
///
/// `export` lines are applied to the session environment while parsing;
/// everything else is kept here for the front end to act on.
#[derive(Debug, Default, Clone)]
pub struct Config {
    pub theme: Theme,
    pub start_dir: Option<PathBuf>,
    pub warnings: Vec<String>,
}

impl Config {
    pub fn default_path() -> Option<PathBuf> {
        PathExpander::new().home_dir().map(|home| home.join(RC_FILE))
    }

    /// Loads `path` if it exists; a missing rc file is not an error.
    pub fn load(path: &Path, env: &mut EnvVarManager) -> Result<Self, ConfigError> {
        match fs::read_to_string(path) {
            Ok(content) => Ok(Self::parse(&content, env)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(Self::default()),
            Err(e) => Err(ConfigError::Io(path.to_path_buf(), e)),
        }
    }

    pub fn parse(content: &str, env: &mut EnvVarManager) -> Self {
        let mut config = Self::default();
        for (index, line) in content.lines().enumerate() {
            if let Err(e) = config.process_line(line, env) {
                config.warnings.push(format!("line {}: {}", index + 1, e));
            }
        }
        config
    }

    fn process_line(&mut self, line: &str, env: &mut EnvVarManager) -> Result<(), ConfigError> {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            return Ok(());
        }

        match line.split_once(char::is_whitespace) {
            Some(("export", def)) => Self::process_export(def.trim(), env),
            Some(("theme", name)) => {
                self.theme = name
                    .trim()
                    .to_lowercase()
                    .parse()
                    .map_err(ConfigError::Invalid)?;
                Ok(())
            }
            Some(("start", dir)) => self.process_start(dir.trim()),
            _ => Err(ConfigError::Invalid(format!("unrecognised line '{}'", line))),
        }
    }

    fn process_export(def: &str, env: &mut EnvVarManager) -> Result<(), ConfigError> {
        let (name, value) = def
            .split_once('=')
            .ok_or_else(|| ConfigError::Invalid(format!("expected NAME=VALUE, got '{}'", def)))?;
        let value = strip_quotes(value.trim());

        let expanded = env.expand_value(value).into_owned();
        env.set(name.trim(), &expanded)?;
        Ok(())
    }

    fn process_start(&mut self, dir: &str) -> Result<(), ConfigError> {
        let path = PathExpander::new().expand(dir);
        if !path.is_dir() {
            return Err(ConfigError::Invalid(format!(
                "start directory {} does not exist",
                path.display()
            )));
        }
        self.start_dir = Some(path);
        Ok(())
    }
}

fn strip_quotes(value: &str) -> &str {
    ['"', '\'']
        .iter()
        .find_map(|q| value.strip_prefix(*q).and_then(|v| v.strip_suffix(*q)))
        .unwrap_or(value)
}

#[derive(Debug)]
pub enum ConfigError {
    Io(PathBuf, io::Error),
    Env(EnvError),
    Invalid(String),
}

impl From<EnvError> for ConfigError {
    fn from(e: EnvError) -> Self {
        ConfigError::Env(e)
    }
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Io(path, e) => write!(f, "cannot read {}: {}", path.display(), e),
            ConfigError::Env(e) => write!(f, "{}", e),
            ConfigError::Invalid(msg) => f.write_str(msg),
        }
    }
}

impl std::error::Error for ConfigError {}
