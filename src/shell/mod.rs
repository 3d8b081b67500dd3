use std::env;
use std::ops::ControlFlow;
use std::path::PathBuf;
use std::time::Instant;

use rustyline::{config::Configurer, error::ReadlineError, history::DefaultHistory, Editor};

mod executor;

use crate::{
    completer::ShellCompleter, config::Config, core::Interpreter, error::ShellError,
    flags::Flags, highlight::SyntaxHighlighter, path::PathExpander,
};

use executor::OutcomeHandler;

pub struct Shell {
    pub(crate) editor: Editor<ShellCompleter, DefaultHistory>,
    pub(crate) interpreter: Interpreter,
    pub(crate) cwd: PathBuf,
    pub(crate) highlighter: SyntaxHighlighter,
    pub(crate) flags: Flags,
}

impl Shell {
    pub fn new(flags: Flags) -> Result<Self, ShellError> {
        let mut interpreter = Interpreter::new();

        let config_path = flags
            .get_value("config")
            .map(PathBuf::from)
            .or_else(Config::default_path);
        let config = match config_path {
            Some(path) => Config::load(&path, interpreter.session_mut().env_mut())?,
            None => Config::default(),
        };
        if !flags.is_set("quiet") {
            for warning in &config.warnings {
                eprintln!("Warning: {}", warning);
            }
        }

        let cwd = initial_dir(&config)?;
        let highlighter = SyntaxHighlighter::new(config.theme);

        let mut editor = Editor::<ShellCompleter, DefaultHistory>::new()?;
        editor.set_helper(Some(ShellCompleter::new(cwd.clone(), highlighter)));
        editor.set_auto_add_history(true);

        // Long-running verbs block the loop; SIGINT reaches their child
        // processes while the shell itself stays up.
        ctrlc::set_handler(move || {
            eprintln!("\nUse 'exit' to leave the shell");
        })?;

        let shell = Shell {
            editor,
            interpreter,
            cwd,
            highlighter,
            flags,
        };
        shell.debug(format_args!(
            "process inspector: {}",
            shell.interpreter.inspector_name()
        ));
        Ok(shell)
    }

    pub fn run(&mut self) -> Result<(), ShellError> {
        if !self.flags.is_set("quiet") {
            println!("{}", banner());
        }

        loop {
            let prompt = format!("{}> ", self.cwd.display());
            match self.editor.readline(&prompt) {
                Ok(line) => {
                    if self.dispatch(&line)?.is_break() {
                        break;
                    }
                }
                Err(ReadlineError::Interrupted) => continue,
                Err(ReadlineError::Eof) => break,
                Err(e) => return Err(e.into()),
            }
        }
        Ok(())
    }

    /// Runs a single line without the prompt loop. Returns whether it failed.
    pub fn run_once(&mut self, line: &str) -> Result<bool, ShellError> {
        let (cwd, outcome) = self.execute(line);
        self.cwd = cwd;
        Ok(self.print_outcome(outcome))
    }

    fn dispatch(&mut self, line: &str) -> Result<ControlFlow<()>, ShellError> {
        let (cwd, outcome) = self.execute(line);
        if cwd != self.cwd {
            self.set_cwd(cwd);
        }
        self.handle_outcome(outcome)
    }

    fn execute(&mut self, line: &str) -> (PathBuf, crate::core::Outcome) {
        let started = Instant::now();
        let (cwd, outcome) = self.interpreter.execute(&self.cwd, line);
        self.debug(format_args!(
            "{:?} -> cwd {} in {:?}",
            line.trim(),
            cwd.display(),
            started.elapsed()
        ));
        (cwd, outcome)
    }

    fn set_cwd(&mut self, cwd: PathBuf) {
        if let Some(helper) = self.editor.helper_mut() {
            helper.set_cwd(&cwd);
        }
        self.cwd = cwd;
    }

    pub(crate) fn debug(&self, message: std::fmt::Arguments<'_>) {
        if self.flags.is_set("debug") {
            eprintln!("[debug] {}", message);
        }
    }
}

fn banner() -> String {
    format!(
        "Welcome to Winux Terminal [v{}]\nRunning on {} ({})\nType 'help' for the list of commands.\n",
        env!("CARGO_PKG_VERSION"),
        env::consts::OS,
        env::consts::ARCH
    )
}

/// rc `start` dir, else `~/Desktop`, else home, else the process cwd.
fn initial_dir(config: &Config) -> Result<PathBuf, ShellError> {
    let paths = PathExpander::new();
    let process_cwd = env::current_dir()?;

    let home = paths.home_dir().filter(|home| home.is_dir());
    let desktop = home
        .as_ref()
        .map(|home| home.join("Desktop"))
        .filter(|desktop| desktop.is_dir());

    let chosen = config
        .start_dir
        .clone()
        .or(desktop)
        .or(home)
        .unwrap_or_else(|| process_cwd.clone());
    Ok(paths.absolute(&process_cwd.join(chosen)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_start_dir_wins() {
        let temp = tempfile::tempdir().unwrap();
        let config = Config {
            start_dir: Some(temp.path().to_path_buf()),
            ..Config::default()
        };
        assert_eq!(initial_dir(&config).unwrap(), temp.path());
    }

    #[test]
    fn test_fallback_is_absolute_directory() {
        let dir = initial_dir(&Config::default()).unwrap();
        assert!(dir.is_absolute());
        assert!(dir.is_dir());
    }

    #[test]
    fn test_banner_names_version() {
        assert!(banner().starts_with(&format!(
            "Welcome to Winux Terminal [v{}]",
            env!("CARGO_PKG_VERSION")
        )));
    }
}
