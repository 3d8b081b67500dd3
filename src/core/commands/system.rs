//! Session and host verbs: `clear`, `help`, `theme`, `chmod`, `chown`, `df`,
//! `du`, `hostname`, `whoami`, `date`, `exit`.

use std::fs;
use std::path::Path;

use chrono::Local;
use walkdir::WalkDir;

use super::{CommandContext, CommandError};
use crate::core::outcome::{Outcome, Output, Theme};

const DATE_FORMAT: &str = "%a %b %d %H:%M:%S %Y";
const USER_VARS: [&str; 4] = ["LOGNAME", "USER", "LNAME", "USERNAME"];

const HELP: &str = "Available commands:
cd [dir] - change directory
ls - list directory contents
mkdir - create directory
pwd - print working directory
rm - remove file or directory
cat - print file content
touch - create empty file or update timestamp
echo - print provided text
clear - clear the screen
help - this help message
cp - copy files or folders
mv - move/rename files or folders
find - search files by name
grep - search text in files
head [lines] - show first lines
tail [lines] - show last lines
chmod - change permissions (simulated)
chown - change owner (simulated)
ln -s - create symbolic link
ps - list running processes
kill - terminate process by PID
top - show simplified process list
df - show disk usage summary
du - disk usage of directory
tar -cf - create tar archive
tar -xf - extract tar archive
zip - create zip archive
unzip - extract zip archive
ping - ping host
wget - download file
curl - download / transfer data
hostname - show system hostname
whoami - show current user
date - show current date/time
history - show command history
exit - exit shell
env - show environment variables
set - set environment variable
theme [default|solarized|dracula] - change color theme
Script files (.py, .sh, .wnx) in the current directory run when named.";

pub fn clear(_ctx: &mut CommandContext<'_>, _args: &[String]) -> Result<Outcome, CommandError> {
    Ok(Output::clear().into())
}

pub fn help(_ctx: &mut CommandContext<'_>, _args: &[String]) -> Result<Outcome, CommandError> {
    Ok(Output::normal(HELP).into())
}

/// Validates the name only; applying the palette is the caller's job.
pub fn theme(_ctx: &mut CommandContext<'_>, args: &[String]) -> Result<Outcome, CommandError> {
    let [name] = args else {
        return Ok(Output::normal("Usage: theme [default|solarized|dracula]").into());
    };

    let theme: Theme = name.to_lowercase().parse().map_err(CommandError::Invalid)?;
    Ok(Output::theme(theme).into())
}

pub fn chmod(_ctx: &mut CommandContext<'_>, args: &[String]) -> Result<Outcome, CommandError> {
    if args.len() < 2 {
        return Err(CommandError::Usage("chmod <mode> <file>"));
    }
    Ok(unsupported("chmod"))
}

pub fn chown(_ctx: &mut CommandContext<'_>, args: &[String]) -> Result<Outcome, CommandError> {
    if args.len() < 2 {
        return Err(CommandError::Usage("chown <owner> <file>"));
    }
    Ok(unsupported("chown"))
}

fn unsupported(verb: &str) -> Outcome {
    Output::warning(format!(
        "{} is not supported in this shell. No action taken.",
        verb
    ))
    .into()
}

pub fn df(ctx: &mut CommandContext<'_>, _args: &[String]) -> Result<Outcome, CommandError> {
    let usage = disk_usage(ctx.cwd()).map_err(|e| CommandError::failed("df", e))?;
    Ok(Output::normal(format!(
        "Filesystem: {}\nTotal: {:.2} MB\nUsed: {:.2} MB\nFree: {:.2} MB",
        ctx.cwd().display(),
        usage.total_mb,
        usage.total_mb - usage.free_mb,
        usage.free_mb
    ))
    .into())
}

struct DiskUsage {
    total_mb: f64,
    free_mb: f64,
}

#[cfg(unix)]
fn disk_usage(path: &Path) -> std::io::Result<DiskUsage> {
    use std::ffi::CString;
    use std::os::unix::ffi::OsStrExt;

    const MB: f64 = 1024.0 * 1024.0;

    let c_path = CString::new(path.as_os_str().as_bytes())
        .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidInput, e))?;
    let mut stat: libc::statvfs = unsafe { std::mem::zeroed() };
    if unsafe { libc::statvfs(c_path.as_ptr(), &mut stat) } != 0 {
        return Err(std::io::Error::last_os_error());
    }

    let block = stat.f_frsize as f64;
    Ok(DiskUsage {
        total_mb: stat.f_blocks as f64 * block / MB,
        free_mb: stat.f_bfree as f64 * block / MB,
    })
}

#[cfg(not(unix))]
fn disk_usage(_path: &Path) -> std::io::Result<DiskUsage> {
    Err(std::io::Error::new(
        std::io::ErrorKind::Unsupported,
        "disk statistics are not available on this platform",
    ))
}

/// Apparent size of a file, or of every regular file beneath a directory.
pub fn du(ctx: &mut CommandContext<'_>, args: &[String]) -> Result<Outcome, CommandError> {
    let target = match args.first() {
        Some(arg) => ctx.resolve(arg),
        None => ctx.cwd().to_path_buf(),
    };
    if !target.exists() {
        return Err(CommandError::Invalid(format!(
            "No such file or directory: {}",
            target.display()
        )));
    }

    let bytes: u64 = if target.is_file() {
        fs::metadata(&target)
            .map_err(|e| CommandError::failed("du", e))?
            .len()
    } else {
        WalkDir::new(&target)
            .into_iter()
            .filter_map(Result::ok)
            .filter(|entry| !entry.file_type().is_dir())
            .filter_map(|entry| fs::metadata(entry.path()).ok())
            .filter(|meta| meta.is_file())
            .map(|meta| meta.len())
            .sum()
    };

    Ok(Output::normal(format!("{:.2} KB", bytes as f64 / 1024.0)).into())
}

pub fn hostname(_ctx: &mut CommandContext<'_>, _args: &[String]) -> Result<Outcome, CommandError> {
    let name = host_name().map_err(|e| CommandError::failed("hostname", e))?;
    Ok(Output::normal(name).into())
}

#[cfg(unix)]
fn host_name() -> std::io::Result<String> {
    let mut buf = [0u8; 256];
    let rc = unsafe { libc::gethostname(buf.as_mut_ptr().cast(), buf.len()) };
    if rc != 0 {
        return Err(std::io::Error::last_os_error());
    }
    let end = buf.iter().position(|b| *b == 0).unwrap_or(buf.len());
    Ok(String::from_utf8_lossy(&buf[..end]).into_owned())
}

#[cfg(not(unix))]
fn host_name() -> std::io::Result<String> {
    std::env::var("COMPUTERNAME")
        .map_err(|e| std::io::Error::new(std::io::ErrorKind::NotFound, e))
}

pub fn whoami(ctx: &mut CommandContext<'_>, _args: &[String]) -> Result<Outcome, CommandError> {
    let env = ctx.session.env();
    USER_VARS
        .iter()
        .find_map(|var| env.get(var).ok().filter(|v| !v.is_empty()))
        .map(str::to_string)
        .or_else(account_name)
        .map(|user| Outcome::from(Output::normal(user)))
        .ok_or_else(|| CommandError::Invalid("Unable to get current user".into()))
}

#[cfg(unix)]
fn account_name() -> Option<String> {
    let entry = unsafe { libc::getpwuid(libc::getuid()) };
    if entry.is_null() {
        return None;
    }
    let name = unsafe { std::ffi::CStr::from_ptr((*entry).pw_name) };
    Some(name.to_string_lossy().into_owned())
}

#[cfg(not(unix))]
fn account_name() -> Option<String> {
    None
}

pub fn date(_ctx: &mut CommandContext<'_>, _args: &[String]) -> Result<Outcome, CommandError> {
    Ok(Output::normal(Local::now().format(DATE_FORMAT).to_string()).into())
}

pub fn exit(_ctx: &mut CommandContext<'_>, _args: &[String]) -> Result<Outcome, CommandError> {
    Ok(Outcome::Exit)
}
