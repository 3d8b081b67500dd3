//! Script replay helpers. The replay loop itself lives in the interpreter,
//! since every script line goes back through full dispatch.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use crate::core::outcome::Output;

pub const EXTENSIONS: [&str; 3] = [".py", ".sh", ".wnx"];

/// Deepest allowed chain of scripts invoking scripts.
pub const MAX_DEPTH: usize = 16;

pub fn depth_error() -> String {
    format!(
        "script error: nesting deeper than {} levels (recursive script?)",
        MAX_DEPTH
    )
}

/// The script a raw line names, if it is an existing file in `cwd` with a
/// script extension. The whole line is the file name.
pub fn locate(cwd: &Path, line: &str) -> Option<PathBuf> {
    if !EXTENSIONS.iter().any(|ext| line.ends_with(ext)) {
        return None;
    }
    let path = cwd.join(line);
    path.is_file().then_some(path)
}

/// Trimmed lines that should run: blanks and `#` comments are dropped.
pub fn read_commands(path: &Path) -> io::Result<Vec<String>> {
    let source = fs::read_to_string(path)?;
    Ok(source
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .map(str::to_string)
        .collect())
}

/// Accumulates `> line` blocks in execution order.
#[derive(Debug, Default)]
pub struct Transcript {
    lines: Vec<String>,
}

impl Transcript {
    pub fn new() -> Self {
        Self::default()
    }

    /// Lines whose output is empty leave no trace.
    pub fn push(&mut self, line: &str, output: &Output) {
        if output.text.is_empty() {
            return;
        }
        self.lines.push(format!("> {}", line));
        self.lines.push(output.text.clone());
    }

    pub fn finish(self) -> Output {
        Output::normal(self.lines.join("\n"))
    }
}
