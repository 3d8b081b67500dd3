//! Filesystem verbs: `ls`, `mkdir`, `pwd`, `rm`, `cat`, `touch`, `cp`, `mv`, `ln`.

use std::fs::{self, File, FileTimes, OpenOptions};
use std::io;
use std::path::{Path, PathBuf};
use std::time::SystemTime;

use walkdir::WalkDir;

use super::{CommandContext, CommandError};
use crate::core::outcome::{Outcome, Output};

pub fn ls(ctx: &mut CommandContext<'_>, _args: &[String]) -> Result<Outcome, CommandError> {
    let entries = fs::read_dir(ctx.cwd()).map_err(|e| CommandError::failed("ls", e))?;

    let mut names = Vec::new();
    for entry in entries {
        let entry = entry.map_err(|e| CommandError::failed("ls", e))?;
        names.push(entry.file_name().to_string_lossy().into_owned());
    }

    Ok(Output::dirlist(names.join("\n")).into())
}

pub fn mkdir(ctx: &mut CommandContext<'_>, args: &[String]) -> Result<Outcome, CommandError> {
    let name = args.first().ok_or(CommandError::Usage("mkdir <foldername>"))?;

    fs::create_dir(ctx.resolve(name)).map_err(|e| CommandError::failed("mkdir", e))?;
    Ok(Output::normal(format!("Folder '{}' created.", name)).into())
}

pub fn pwd(ctx: &mut CommandContext<'_>, _args: &[String]) -> Result<Outcome, CommandError> {
    Ok(Output::normal(ctx.cwd().display().to_string()).into())
}

pub fn rm(ctx: &mut CommandContext<'_>, args: &[String]) -> Result<Outcome, CommandError> {
    let name = args.first().ok_or(CommandError::Usage("rm <file_or_folder>"))?;
    let target = ctx.resolve(name);

    // symlink_metadata so a link to a directory removes the link, not the tree
    let metadata = fs::symlink_metadata(&target).map_err(|_| {
        CommandError::Invalid(format!("No such file or directory: {}", target.display()))
    })?;

    if metadata.is_dir() {
        fs::remove_dir_all(&target).map_err(|e| CommandError::failed("rm", e))?;
        Ok(Output::normal(format!("Directory '{}' removed.", name)).into())
    } else {
        fs::remove_file(&target).map_err(|e| CommandError::failed("rm", e))?;
        Ok(Output::normal(format!("File '{}' removed.", name)).into())
    }
}

pub fn cat(ctx: &mut CommandContext<'_>, args: &[String]) -> Result<Outcome, CommandError> {
    let name = args.first().ok_or(CommandError::Usage("cat <filename>"))?;
    let target = ctx.resolve(name);
    if !target.is_file() {
        return Err(CommandError::Invalid(format!(
            "No such file: {}",
            target.display()
        )));
    }

    let content = fs::read_to_string(&target).map_err(|e| CommandError::failed("cat", e))?;
    Ok(Output::normal(content).into())
}

pub fn touch(ctx: &mut CommandContext<'_>, args: &[String]) -> Result<Outcome, CommandError> {
    let name = args.first().ok_or(CommandError::Usage("touch <filename>"))?;

    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(ctx.resolve(name))
        .map_err(|e| CommandError::failed("touch", e))?;
    file.set_modified(SystemTime::now())
        .map_err(|e| CommandError::failed("touch", e))?;

    Ok(Output::normal(format!("Touched file: {}", name)).into())
}

pub fn cp(ctx: &mut CommandContext<'_>, args: &[String]) -> Result<Outcome, CommandError> {
    let [src, dst, ..] = args else {
        return Err(CommandError::Usage("cp <source> <destination>"));
    };
    let (src_path, dst_path) = (ctx.resolve(src), ctx.resolve(dst));

    if src_path.is_dir() {
        copy_tree(&src_path, &dst_path).map_err(|e| CommandError::failed("cp", e))?;
        Ok(Output::normal(format!("Directory copied from '{}' to '{}'", src, dst)).into())
    } else if src_path.is_file() {
        let dst_path = into_directory(&src_path, dst_path);
        copy_file(&src_path, &dst_path).map_err(|e| CommandError::failed("cp", e))?;
        Ok(Output::normal(format!("File copied from '{}' to '{}'", src, dst)).into())
    } else {
        Err(CommandError::Invalid(format!("Source does not exist: {}", src)))
    }
}

pub fn mv(ctx: &mut CommandContext<'_>, args: &[String]) -> Result<Outcome, CommandError> {
    let [src, dst, ..] = args else {
        return Err(CommandError::Usage("mv <source> <destination>"));
    };
    let src_path = ctx.resolve(src);
    let dst_path = into_directory(&src_path, ctx.resolve(dst));

    move_path(&src_path, &dst_path).map_err(|e| CommandError::failed("mv", e))?;
    Ok(Output::normal(format!("Moved '{}' to '{}'", src, dst)).into())
}

pub fn ln(ctx: &mut CommandContext<'_>, args: &[String]) -> Result<Outcome, CommandError> {
    let [flag, target, link, ..] = args else {
        return Err(CommandError::Usage("ln -s <target> <linkname>"));
    };
    if flag != "-s" {
        return Err(CommandError::Usage("ln -s <target> <linkname>"));
    }

    symlink(&ctx.resolve(target), &ctx.resolve(link))
        .map_err(|e| CommandError::failed("ln", e))?;
    Ok(Output::normal(format!(
        "Symbolic link created from '{}' to '{}'",
        link, target
    ))
    .into())
}

/// When `dst` names an existing directory, the source lands inside it.
fn into_directory(src: &Path, dst: PathBuf) -> PathBuf {
    match src.file_name() {
        Some(name) if dst.is_dir() => dst.join(name),
        _ => dst,
    }
}

/// Copies contents, permissions and timestamps. The copy may already be
/// read-only when its times are set.
fn copy_file(src: &Path, dst: &Path) -> io::Result<()> {
    fs::copy(src, dst)?;

    let metadata = fs::metadata(src)?;
    let times = FileTimes::new()
        .set_accessed(metadata.accessed()?)
        .set_modified(metadata.modified()?);
    times_handle(dst)?.set_times(times)
}

/// futimens only needs ownership, so a read handle is enough.
#[cfg(unix)]
fn times_handle(path: &Path) -> io::Result<File> {
    File::open(path)
}

#[cfg(windows)]
fn times_handle(path: &Path) -> io::Result<File> {
    use std::os::windows::fs::OpenOptionsExt;

    // FILE_WRITE_ATTRIBUTES is allowed on read-only files.
    const FILE_WRITE_ATTRIBUTES: u32 = 0x0100;
    File::options()
        .access_mode(FILE_WRITE_ATTRIBUTES)
        .open(path)
}

#[cfg(not(any(unix, windows)))]
fn times_handle(path: &Path) -> io::Result<File> {
    File::options().write(true).open(path)
}

/// Recursive copy; `dst` must not exist yet.
fn copy_tree(src: &Path, dst: &Path) -> io::Result<()> {
    fs::create_dir(dst)?;

    for entry in WalkDir::new(src).min_depth(1) {
        let entry = entry?;
        let relative = entry
            .path()
            .strip_prefix(src)
            .map_err(|e| io::Error::new(io::ErrorKind::Other, e))?;
        let target = dst.join(relative);

        if entry.file_type().is_dir() {
            fs::create_dir(&target)?;
        } else {
            copy_file(entry.path(), &target)?;
        }
    }
    Ok(())
}

fn move_path(src: &Path, dst: &Path) -> io::Result<()> {
    match fs::rename(src, dst) {
        Err(e) if crosses_devices(&e) => {
            if src.is_dir() {
                copy_tree(src, dst)?;
                fs::remove_dir_all(src)
            } else {
                copy_file(src, dst)?;
                fs::remove_file(src)
            }
        }
        result => result,
    }
}

#[cfg(unix)]
fn crosses_devices(err: &io::Error) -> bool {
    err.raw_os_error() == Some(libc::EXDEV)
}

#[cfg(not(unix))]
fn crosses_devices(_err: &io::Error) -> bool {
    false
}

#[cfg(unix)]
fn symlink(target: &Path, link: &Path) -> io::Result<()> {
    std::os::unix::fs::symlink(target, link)
}

#[cfg(windows)]
fn symlink(target: &Path, link: &Path) -> io::Result<()> {
    if target.is_dir() {
        std::os::windows::fs::symlink_dir(target, link)
    } else {
        std::os::windows::fs::symlink_file(target, link)
    }
}

#[cfg(not(any(unix, windows)))]
fn symlink(_target: &Path, _link: &Path) -> io::Result<()> {
    Err(io::Error::new(
        io::ErrorKind::Unsupported,
        "symbolic links are not supported on this platform",
    ))
}
