//! Text verbs: `echo`, `find`, `grep`, `head`, `tail`.

use std::collections::VecDeque;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use glob::Pattern;
use walkdir::{DirEntry, WalkDir};

use super::{CommandContext, CommandError};
use crate::core::outcome::{Outcome, Output};

const NO_MATCHES: &str = "No matches found.";
const DEFAULT_LINES: usize = 10;

pub fn echo(_ctx: &mut CommandContext<'_>, args: &[String]) -> Result<Outcome, CommandError> {
    Ok(Output::normal(args.join(" ")).into())
}

/// Walks cwd and matches file and directory names against a shell wildcard.
pub fn find(ctx: &mut CommandContext<'_>, args: &[String]) -> Result<Outcome, CommandError> {
    let raw = args.first().ok_or(CommandError::Usage("find <pattern>"))?;
    let pattern = Pattern::new(raw).map_err(|e| CommandError::failed("find", e))?;

    let root = ctx.cwd();
    let matches: Vec<String> = listing_order(root)
        .into_iter()
        .filter(|entry| pattern.matches(&entry.file_name().to_string_lossy()))
        .filter_map(|entry| {
            entry
                .path()
                .strip_prefix(root)
                .ok()
                .map(|rel| rel.display().to_string())
        })
        .collect();

    if matches.is_empty() {
        Ok(Output::normal(NO_MATCHES).into())
    } else {
        Ok(Output::normal(matches.join("\n")).into())
    }
}

/// Every entry below `root`, one directory at a time: its files, then its
/// subdirectories, then the same for each subdirectory in turn.
fn listing_order(root: &Path) -> Vec<DirEntry> {
    let directories = WalkDir::new(root)
        .sort_by_file_name()
        .into_iter()
        .filter_map(Result::ok)
        .filter(|entry| entry.file_type().is_dir());

    let mut entries = Vec::new();
    for dir in directories {
        let (subdirs, files): (Vec<_>, Vec<_>) = WalkDir::new(dir.path())
            .min_depth(1)
            .max_depth(1)
            .sort_by_file_name()
            .into_iter()
            .filter_map(Result::ok)
            .partition(|entry| entry.file_type().is_dir());
        entries.extend(files);
        entries.extend(subdirs);
    }
    entries
}

pub fn grep(ctx: &mut CommandContext<'_>, args: &[String]) -> Result<Outcome, CommandError> {
    let [needle, files @ ..] = args else {
        return Err(CommandError::Usage("grep <pattern> <files...>"));
    };
    if files.is_empty() {
        return Err(CommandError::Usage("grep <pattern> <files...>"));
    }

    let mut lines = Vec::new();
    for name in files {
        let path = ctx.resolve(name);
        if !path.is_file() {
            lines.push(format!("File not found: {}", name));
            continue;
        }
        if let Err(e) = scan(&path, name, needle, &mut lines) {
            lines.push(format!("Error reading {}: {}", name, e));
        }
    }

    if lines.is_empty() {
        Ok(Output::normal(NO_MATCHES).into())
    } else {
        Ok(Output::normal(lines.join("\n")).into())
    }
}

fn scan(path: &Path, name: &str, needle: &str, out: &mut Vec<String>) -> std::io::Result<()> {
    let reader = BufReader::new(File::open(path)?);
    for (index, line) in reader.lines().enumerate() {
        let line = line?;
        if line.contains(needle) {
            out.push(format!("{}:{}:{}", name, index + 1, line.trim_end()));
        }
    }
    Ok(())
}

pub fn head(ctx: &mut CommandContext<'_>, args: &[String]) -> Result<Outcome, CommandError> {
    let (reader, count) = open_lines(ctx, args, "head <filename> [lines]")?;

    let mut out = Vec::with_capacity(count.min(1024));
    for line in reader.lines().take(count) {
        let line = line.map_err(|e| CommandError::failed("head", e))?;
        out.push(line.trim_end().to_string());
    }
    Ok(Output::normal(out.join("\n")).into())
}

/// Streams the file, keeping only the last `n` lines in memory.
pub fn tail(ctx: &mut CommandContext<'_>, args: &[String]) -> Result<Outcome, CommandError> {
    let (reader, count) = open_lines(ctx, args, "tail <filename> [lines]")?;

    let mut window = VecDeque::with_capacity(count.min(1024));
    if count > 0 {
        for line in reader.lines() {
            let line = line.map_err(|e| CommandError::failed("tail", e))?;
            if window.len() == count {
                window.pop_front();
            }
            window.push_back(line.trim_end().to_string());
        }
    }
    Ok(Output::normal(Vec::from(window).join("\n")).into())
}

/// Shared argument handling for `head` and `tail`.
fn open_lines(
    ctx: &CommandContext<'_>,
    args: &[String],
    usage: &'static str,
) -> Result<(BufReader<File>, usize), CommandError> {
    let name = args.first().ok_or(CommandError::Usage(usage))?;
    let count = match args.get(1) {
        // negative counts behave like zero
        Some(raw) => raw
            .parse::<i64>()
            .map(|n| usize::try_from(n).unwrap_or(0))
            .map_err(|_| CommandError::Invalid("Lines argument must be an integer.".into()))?,
        None => DEFAULT_LINES,
    };

    let path = ctx.resolve(name);
    if !path.is_file() {
        return Err(CommandError::Invalid(format!("No such file: {}", name)));
    }
    let file = File::open(&path).map_err(|e| CommandError::failed("read", e))?;
    Ok((BufReader::new(file), count))
}
