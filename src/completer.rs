use rustyline::completion::{Completer, Pair};
use rustyline::highlight::{CmdKind, Highlighter};
use rustyline::hint::Hinter;
use rustyline::validate::Validator;
use rustyline::{Context, Helper};
use std::borrow::Cow;
use std::collections::BTreeSet;
use std::fs;
use std::path::{Path, PathBuf};

use crate::core::commands::VERBS;
use crate::core::outcome::Theme;
use crate::highlight::SyntaxHighlighter;

/// rustyline helper: completes verbs and entries of the session's cwd,
/// hints the first verb match, and colours the input line.
#[derive(Clone)]
pub struct ShellCompleter {
    verbs: BTreeSet<&'static str>,
    cwd: PathBuf,
    highlighter: SyntaxHighlighter,
}

impl ShellCompleter {
    pub fn new(cwd: PathBuf, highlighter: SyntaxHighlighter) -> Self {
        Self {
            verbs: VERBS.iter().copied().collect(),
            cwd,
            highlighter,
        }
    }

    /// The session cwd is not the process cwd, so it is pushed in after every dispatch.
    pub fn set_cwd(&mut self, cwd: &Path) {
        self.cwd = cwd.to_path_buf();
    }

    pub fn set_theme(&mut self, theme: Theme) {
        self.highlighter.set_theme(theme);
    }

    fn complete_command(&self, prefix: &str) -> Vec<Pair> {
        let mut names: BTreeSet<String> = self
            .verbs
            .iter()
            .filter(|verb| verb.starts_with(prefix))
            .map(|verb| verb.to_string())
            .collect();
        names.extend(self.entries_matching(&self.cwd, prefix));

        names
            .into_iter()
            .map(|name| Pair {
                display: name.clone(),
                replacement: name,
            })
            .collect()
    }

    fn complete_path(&self, incomplete: &str) -> Vec<Pair> {
        let (dir, prefix) = match incomplete.rfind('/') {
            Some(idx) => (&incomplete[..=idx], &incomplete[idx + 1..]),
            None => ("", incomplete),
        };
        let search = if dir.is_empty() {
            self.cwd.clone()
        } else {
            self.cwd.join(dir)
        };

        self.entries_matching(&search, prefix)
            .into_iter()
            .map(|name| {
                let full = format!("{}{}", dir, name);
                let replacement = if full.ends_with('/') {
                    full.clone()
                } else {
                    format!("{} ", full)
                };
                Pair {
                    display: full,
                    replacement,
                }
            })
            .collect()
    }

    /// Sorted entry names under `dir`; directories carry a trailing `/`.
    fn entries_matching(&self, dir: &Path, prefix: &str) -> BTreeSet<String> {
        let Ok(entries) = fs::read_dir(dir) else {
            return BTreeSet::new();
        };

        entries
            .filter_map(Result::ok)
            .filter_map(|entry| {
                let name = entry.file_name().to_str()?.to_string();
                if !name.starts_with(prefix) {
                    return None;
                }
                Some(if entry.path().is_dir() {
                    format!("{}/", name)
                } else {
                    name
                })
            })
            .collect()
    }
}

impl Helper for ShellCompleter {}

impl Highlighter for ShellCompleter {
    fn highlight<'l>(&self, line: &'l str, _pos: usize) -> Cow<'l, str> {
        let known = line
            .split_whitespace()
            .next()
            .map(|verb| self.verbs.contains(verb.to_lowercase().as_str()))
            .unwrap_or(false);
        Cow::Owned(self.highlighter.highlight_command(line, known))
    }

    fn highlight_hint<'h>(&self, hint: &'h str) -> Cow<'h, str> {
        Cow::Owned(self.highlighter.highlight_hint(hint))
    }

    fn highlight_char(&self, _line: &str, _pos: usize, _kind: CmdKind) -> bool {
        true
    }
}

impl Hinter for ShellCompleter {
    type Hint = String;

    /// Suggests the rest of the first matching verb while the verb is typed.
    fn hint(&self, line: &str, pos: usize, _ctx: &Context<'_>) -> Option<String> {
        if line.is_empty() || pos < line.len() || line.contains(char::is_whitespace) {
            return None;
        }
        self.verbs
            .iter()
            .find(|verb| verb.starts_with(line) && verb.len() > line.len())
            .map(|verb| verb[line.len()..].to_string())
    }
}

impl Validator for ShellCompleter {}

impl Completer for ShellCompleter {
    type Candidate = Pair;

    fn complete(
        &self,
        line: &str,
        pos: usize,
        _ctx: &Context<'_>,
    ) -> rustyline::Result<(usize, Vec<Pair>)> {
        let line_up_to_cursor = &line[..pos];
        let start = line_up_to_cursor
            .rfind(char::is_whitespace)
            .map(|idx| idx + 1)
            .unwrap_or(0);
        let word = &line_up_to_cursor[start..];

        let first_word = line_up_to_cursor[..start].trim().is_empty();
        let candidates = if first_word {
            self.complete_command(word)
        } else {
            self.complete_path(word)
        };
        Ok((start, candidates))
    }
}
