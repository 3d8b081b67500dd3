use std::path::{Path, PathBuf};

use super::commands::{script, CommandContext, CommandExecutor};
use super::outcome::{Outcome, Output};
use super::session::Session;
use crate::path::PathExpander;
use crate::process::{select_inspector, ProcessInspector};

/// Turns one raw command line into a new cwd and an [`Outcome`].
///
/// Owns the session (history and environment) and the process inspector
/// picked at construction. Never prints and never panics on bad input;
/// every failure comes back as an `error`-kind [`Output`].
pub struct Interpreter {
    executor: CommandExecutor,
    session: Session,
    processes: Box<dyn ProcessInspector>,
    paths: PathExpander,
    script_depth: usize,
}

impl Default for Interpreter {
    fn default() -> Self {
        Self::new()
    }
}

impl Interpreter {
    pub fn new() -> Self {
        Self::with_inspector(select_inspector())
    }

    pub fn with_inspector(processes: Box<dyn ProcessInspector>) -> Self {
        Self {
            executor: CommandExecutor::new(),
            session: Session::new(),
            processes,
            paths: PathExpander::new(),
            script_depth: 0,
        }
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn session_mut(&mut self) -> &mut Session {
        &mut self.session
    }

    pub fn inspector_name(&self) -> &'static str {
        self.processes.name()
    }

    pub fn execute(&mut self, cwd: &Path, line: &str) -> (PathBuf, Outcome) {
        let line = line.trim();
        self.session.history_mut().record(line);

        let mut cwd = cwd.to_path_buf();
        let mut tokens = line.split_whitespace();
        let Some(first) = tokens.next() else {
            return (cwd, Output::normal("").into());
        };
        let verb = first.to_lowercase();
        let args: Vec<String> = tokens.map(str::to_string).collect();

        if let Some(command) = self.executor.get(&verb) {
            let mut ctx = CommandContext {
                cwd: &mut cwd,
                session: &mut self.session,
                processes: self.processes.as_ref(),
                paths: &self.paths,
            };
            let outcome = command
                .execute(&mut ctx, &args)
                .unwrap_or_else(|e| Output::error(e.to_string()).into());
            return (cwd, outcome);
        }

        match script::locate(&cwd, line) {
            Some(path) => self.replay(cwd, &path),
            None => (cwd, Output::error(format!("Command not found: {}", verb)).into()),
        }
    }

    /// Feeds each script line back through [`execute`](Self::execute).
    /// An `exit` line ends the script, not the session.
    fn replay(&mut self, mut cwd: PathBuf, path: &Path) -> (PathBuf, Outcome) {
        if self.script_depth >= script::MAX_DEPTH {
            return (cwd, Output::error(script::depth_error()).into());
        }
        let lines = match script::read_commands(path) {
            Ok(lines) => lines,
            Err(e) => return (cwd, Output::error(format!("script error: {}", e)).into()),
        };

        self.script_depth += 1;
        let mut transcript = script::Transcript::new();
        for line in &lines {
            let (next, outcome) = self.execute(&cwd, line);
            cwd = next;
            match outcome {
                Outcome::Output(output) => transcript.push(line, &output),
                Outcome::Exit => break,
            }
        }
        self.script_depth -= 1;

        (cwd, transcript.finish().into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::commands::test_support::NoProcesses;
    use crate::core::outcome::ResultKind;
    use std::fs;

    fn interpreter() -> Interpreter {
        Interpreter::with_inspector(Box::new(NoProcesses))
    }

    fn text(outcome: &Outcome) -> &str {
        outcome.output().map(|o| o.text.as_str()).unwrap_or_default()
    }

    fn kind(outcome: &Outcome) -> Option<ResultKind> {
        outcome.output().map(|o| o.kind)
    }

    #[test]
    fn test_empty_line_is_not_an_error() {
        let temp = tempfile::tempdir().unwrap();
        let mut shell = interpreter();
        let (cwd, outcome) = shell.execute(temp.path(), "   ");
        assert_eq!(cwd, temp.path());
        assert_eq!(outcome, Outcome::from(Output::normal("")));
        assert!(shell.session().history().is_empty());
    }

    #[test]
    fn test_history_excludes_itself() {
        let temp = tempfile::tempdir().unwrap();
        let mut shell = interpreter();
        shell.execute(temp.path(), "pwd");
        shell.execute(temp.path(), "ls");
        let (_, outcome) = shell.execute(temp.path(), "history");
        assert_eq!(text(&outcome), "1 pwd\n2 ls");
    }

    #[test]
    fn test_failed_lines_are_still_recorded() {
        let temp = tempfile::tempdir().unwrap();
        let mut shell = interpreter();
        let (_, outcome) = shell.execute(temp.path(), "cat missing");
        assert_eq!(kind(&outcome), Some(ResultKind::Error));
        assert_eq!(
            shell.session().history().entries().collect::<Vec<_>>(),
            vec!["cat missing"]
        );
    }

    #[test]
    fn test_verbs_are_case_insensitive() {
        let temp = tempfile::tempdir().unwrap();
        let mut shell = interpreter();
        let (_, outcome) = shell.execute(temp.path(), "ECHO Mixed Case");
        assert_eq!(text(&outcome), "Mixed Case");
    }

    #[test]
    fn test_unknown_verb() {
        let temp = tempfile::tempdir().unwrap();
        let mut shell = interpreter();
        let (_, outcome) = shell.execute(temp.path(), "Frobnicate now");
        assert_eq!(
            outcome,
            Outcome::from(Output::error("Command not found: frobnicate"))
        );
    }

    #[test]
    fn test_missing_arguments_change_nothing() {
        let temp = tempfile::tempdir().unwrap();
        let mut shell = interpreter();
        for line in [
            "mkdir", "rm", "cat", "touch", "cp a", "mv a", "find", "grep x", "head", "tail",
            "chmod 7", "chown u", "ln -s a", "kill", "tar -cf", "zip a.zip", "unzip", "ping",
            "wget", "curl", "set",
        ] {
            let (cwd, outcome) = shell.execute(temp.path(), line);
            assert_eq!(cwd, temp.path(), "{}", line);
            assert_eq!(kind(&outcome), Some(ResultKind::Error), "{}", line);
            assert!(text(&outcome).starts_with("Usage: "), "{}", line);
        }
        assert_eq!(fs::read_dir(temp.path()).unwrap().count(), 0);
    }

    #[test]
    fn test_cd_then_pwd() {
        let temp = tempfile::tempdir().unwrap();
        let mut shell = interpreter();
        shell.execute(temp.path(), "mkdir d");
        let (cwd, _) = shell.execute(temp.path(), "cd d");
        let (_, outcome) = shell.execute(&cwd, "pwd");
        assert_eq!(text(&outcome), temp.path().join("d").display().to_string());
    }

    #[test]
    fn test_touch_cat_and_echo() {
        let temp = tempfile::tempdir().unwrap();
        let mut shell = interpreter();
        shell.execute(temp.path(), "touch f");
        let (_, outcome) = shell.execute(temp.path(), "cat f");
        assert_eq!(outcome, Outcome::from(Output::normal("")));
        let (_, outcome) = shell.execute(temp.path(), "echo a b c");
        assert_eq!(text(&outcome), "a b c");
    }

    #[test]
    fn test_find_by_name_and_wildcard() {
        let temp = tempfile::tempdir().unwrap();
        let mut shell = interpreter();
        shell.execute(temp.path(), "mkdir d");
        let (_, outcome) = shell.execute(temp.path(), "find d");
        assert_eq!(text(&outcome), "d");
        let (_, outcome) = shell.execute(temp.path(), "find d*");
        assert_eq!(text(&outcome), "d");
    }

    #[test]
    fn test_tar_round_trip() {
        let src = tempfile::tempdir().unwrap();
        let dst = tempfile::tempdir().unwrap();
        fs::write(src.path().join("x.txt"), "contents\n").unwrap();

        let mut shell = interpreter();
        shell.execute(src.path(), "tar -cf x.tar x.txt");
        let archive = src.path().join("x.tar");
        let (_, outcome) = shell.execute(dst.path(), &format!("tar -xf {}", archive.display()));
        assert_eq!(kind(&outcome), Some(ResultKind::Normal));
        assert_eq!(
            fs::read(dst.path().join("x.txt")).unwrap(),
            fs::read(src.path().join("x.txt")).unwrap()
        );
    }

    #[test]
    fn test_grep_mixed_files() {
        let temp = tempfile::tempdir().unwrap();
        fs::write(temp.path().join("a.txt"), "one\nfind me\n").unwrap();
        let mut shell = interpreter();
        let (_, outcome) = shell.execute(temp.path(), "grep find a.txt nope.txt");
        assert_eq!(text(&outcome), "a.txt:2:find me\nFile not found: nope.txt");
    }

    #[test]
    fn test_script_replay() {
        let temp = tempfile::tempdir().unwrap();
        fs::write(temp.path().join("setup.wnx"), "mkdir a\n# comment\ncd a\npwd\n").unwrap();

        let mut shell = interpreter();
        let (cwd, outcome) = shell.execute(temp.path(), "setup.wnx");
        let inner = temp.path().join("a");
        assert_eq!(cwd, inner);
        assert_eq!(kind(&outcome), Some(ResultKind::Normal));
        assert_eq!(
            text(&outcome),
            format!(
                "> mkdir a\nFolder 'a' created.\n> cd a\nChanged directory to {0}\n> pwd\n{0}",
                inner.display()
            )
        );
        assert_eq!(
            shell.session().history().entries().collect::<Vec<_>>(),
            vec!["setup.wnx", "mkdir a", "cd a", "pwd"]
        );
    }

    #[test]
    fn test_script_exit_stops_replay_only() {
        let temp = tempfile::tempdir().unwrap();
        fs::write(temp.path().join("stop.sh"), "echo before\nexit\necho after\n").unwrap();

        let mut shell = interpreter();
        let (_, outcome) = shell.execute(temp.path(), "stop.sh");
        assert_eq!(outcome, Outcome::from(Output::normal("> echo before\nbefore")));
    }

    #[test]
    fn test_recursive_script_is_capped() {
        let temp = tempfile::tempdir().unwrap();
        fs::write(temp.path().join("loop.py"), "loop.py\n").unwrap();

        let mut shell = interpreter();
        let (_, outcome) = shell.execute(temp.path(), "loop.py");
        let rendered = text(&outcome);
        assert!(rendered.ends_with(&script::depth_error()));
        assert_eq!(rendered.matches("> loop.py").count(), script::MAX_DEPTH);
        assert_eq!(shell.script_depth, 0);
    }
}
