use std::collections::BTreeMap;
use std::fmt;
use std::path::{Path, PathBuf};

mod archive;
mod cd;
mod env;
mod fs;
mod history;
mod net;
mod process;
pub(crate) mod script;
mod system;
mod text;

pub use cd::CdCommand;
pub use history::HistoryCommand;

use crate::core::outcome::Outcome;
use crate::core::session::Session;
use crate::path::PathExpander;
use crate::process::ProcessInspector;

/// Every verb the interpreter dispatches, for caller-side completion.
pub const VERBS: &[&str] = &[
    "cat", "cd", "chmod", "chown", "clear", "cp", "curl", "date", "df", "du", "echo", "env",
    "exit", "find", "grep", "head", "help", "history", "hostname", "kill", "ln", "ls", "mkdir",
    "mv", "ping", "ps", "pwd", "rm", "set", "tail", "tar", "theme", "top", "touch", "unzip",
    "wget", "whoami", "zip",
];

#[derive(Debug, PartialEq)]
pub enum CommandError {
    /// Wrong arguments; detected before any side effect.
    Usage(&'static str),
    /// A filesystem, process or network operation failed.
    Failed { action: &'static str, message: String },
    /// A precondition did not hold; the message is shown as is.
    Invalid(String),
}

impl CommandError {
    pub fn failed(action: &'static str, err: impl fmt::Display) -> Self {
        CommandError::Failed {
            action,
            message: err.to_string(),
        }
    }
}

impl fmt::Display for CommandError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CommandError::Usage(usage) => write!(f, "Usage: {}", usage),
            CommandError::Failed { action, message } => write!(f, "{} error: {}", action, message),
            CommandError::Invalid(msg) => f.write_str(msg),
        }
    }
}

impl std::error::Error for CommandError {}

/// Everything a handler may read or change during one dispatch.
pub struct CommandContext<'a> {
    pub cwd: &'a mut PathBuf,
    pub session: &'a mut Session,
    pub processes: &'a dyn ProcessInspector,
    pub paths: &'a PathExpander,
}

impl CommandContext<'_> {
    pub fn cwd(&self) -> &Path {
        self.cwd.as_path()
    }

    /// Resolves a user-supplied path against the working directory.
    pub fn resolve(&self, arg: &str) -> PathBuf {
        self.paths.resolve(self.cwd.as_path(), arg)
    }
}

pub trait Command {
    fn execute(&self, ctx: &mut CommandContext<'_>, args: &[String])
        -> Result<Outcome, CommandError>;
}

impl<F> Command for F
where
    F: Fn(&mut CommandContext<'_>, &[String]) -> Result<Outcome, CommandError>,
{
    fn execute(
        &self,
        ctx: &mut CommandContext<'_>,
        args: &[String],
    ) -> Result<Outcome, CommandError> {
        self(ctx, args)
    }
}

/// The fixed verb table. Keys are lowercase; entries never change after
/// construction.
pub struct CommandExecutor {
    commands: BTreeMap<&'static str, Box<dyn Command>>,
}

impl Default for CommandExecutor {
    fn default() -> Self {
        Self::new()
    }
}

impl CommandExecutor {
    pub fn new() -> Self {
        let mut executor = Self {
            commands: BTreeMap::new(),
        };

        executor.register("cd", CdCommand::new());
        executor.register("history", HistoryCommand::new());

        executor.register("ls", fs::ls);
        executor.register("mkdir", fs::mkdir);
        executor.register("pwd", fs::pwd);
        executor.register("rm", fs::rm);
        executor.register("cat", fs::cat);
        executor.register("touch", fs::touch);
        executor.register("cp", fs::cp);
        executor.register("mv", fs::mv);
        executor.register("ln", fs::ln);

        executor.register("echo", text::echo);
        executor.register("find", text::find);
        executor.register("grep", text::grep);
        executor.register("head", text::head);
        executor.register("tail", text::tail);

        executor.register("tar", archive::tar);
        executor.register("zip", archive::zip);
        executor.register("unzip", archive::unzip);

        executor.register("ping", net::ping);
        executor.register("wget", net::wget);
        executor.register("curl", net::curl);

        executor.register("ps", process::ps);
        executor.register("kill", process::kill);
        executor.register("top", process::top);

        executor.register("clear", system::clear);
        executor.register("help", system::help);
        executor.register("theme", system::theme);
        executor.register("chmod", system::chmod);
        executor.register("chown", system::chown);
        executor.register("df", system::df);
        executor.register("du", system::du);
        executor.register("hostname", system::hostname);
        executor.register("whoami", system::whoami);
        executor.register("date", system::date);
        executor.register("exit", system::exit);

        executor.register("env", env::env);
        executor.register("set", env::set);

        executor
    }

    fn register(&mut self, name: &'static str, command: impl Command + 'static) {
        self.commands.insert(name, Box::new(command));
    }

    pub fn get(&self, verb: &str) -> Option<&dyn Command> {
        self.commands.get(verb).map(|cmd| cmd.as_ref())
    }
}

#[cfg(test)]
pub(crate) mod test_support {
    use super::*;
    use crate::core::outcome::Output;
    use crate::process::{ProcessError, ProcessListing, ProcessSample};

    pub struct NoProcesses;

    impl ProcessInspector for NoProcesses {
        fn name(&self) -> &'static str {
            "none"
        }

        fn list(&self) -> Result<ProcessListing, ProcessError> {
            Ok(ProcessListing::Rows(Vec::new()))
        }

        fn top(&self, _limit: usize) -> Result<Vec<ProcessSample>, ProcessError> {
            Err(ProcessError::Unavailable)
        }

        fn terminate(&self, pid: u32) -> Result<String, ProcessError> {
            Err(ProcessError::NoSuchProcess(pid))
        }
    }

    /// Runs `command` against `cwd` with a throwaway session.
    pub fn run(
        command: impl Command,
        cwd: &Path,
        args: &[&str],
    ) -> (PathBuf, Result<Outcome, CommandError>) {
        let mut session = Session::new();
        run_in(command, cwd, args, &mut session, &NoProcesses)
    }

    pub fn run_in(
        command: impl Command,
        cwd: &Path,
        args: &[&str],
        session: &mut Session,
        processes: &dyn ProcessInspector,
    ) -> (PathBuf, Result<Outcome, CommandError>) {
        let mut cwd = cwd.to_path_buf();
        let paths = PathExpander::new();
        let args: Vec<String> = args.iter().map(|s| s.to_string()).collect();
        let mut ctx = CommandContext {
            cwd: &mut cwd,
            session,
            processes,
            paths: &paths,
        };
        let result = command.execute(&mut ctx, &args);
        (cwd, result)
    }

    pub fn output(result: Result<Outcome, CommandError>) -> Output {
        match result {
            Ok(Outcome::Output(output)) => output,
            Ok(Outcome::Exit) => panic!("unexpected exit"),
            Err(e) => panic!("unexpected error: {}", e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_table_matches_completion_list() {
        let executor = CommandExecutor::new();
        let mut verbs: Vec<_> = executor.commands.keys().copied().collect();
        verbs.sort_unstable();
        let mut listed = VERBS.to_vec();
        listed.sort_unstable();
        assert_eq!(verbs, listed);
    }

    #[test]
    fn test_lookup_is_exact() {
        let executor = CommandExecutor::new();
        assert!(executor.get("cd").is_some());
        assert!(executor.get("tar").is_some());
        assert!(executor.get("CD").is_none());
        assert!(executor.get("unknown").is_none());
        assert!(executor.get("").is_none());
    }

    #[test]
    fn test_command_error_display() {
        assert_eq!(
            CommandError::Usage("mkdir <foldername>").to_string(),
            "Usage: mkdir <foldername>"
        );
        assert_eq!(
            CommandError::failed("mkdir", "File exists").to_string(),
            "mkdir error: File exists"
        );
        assert_eq!(
            CommandError::Invalid("No such file: x".into()).to_string(),
            "No such file: x"
        );
    }
}
