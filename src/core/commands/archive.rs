use std::fs::File;
use std::io;
use std::path::{Path, PathBuf};

use zip::write::FileOptions;
use zip::{CompressionMethod, ZipArchive, ZipWriter};

use super::{CommandContext, CommandError};
use crate::core::outcome::{Outcome, Output};

const TAR_USAGE: &str = "tar -cf <archive> <files...>\nor: tar -xf <archive>";

pub fn tar(ctx: &mut CommandContext<'_>, args: &[String]) -> Result<Outcome, CommandError> {
    let [option, archive, files @ ..] = args else {
        return Err(CommandError::Usage(TAR_USAGE));
    };
    let archive_path = ctx.resolve(archive);

    match option.as_str() {
        "-cf" => {
            let inputs: Vec<PathBuf> = files.iter().map(|f| ctx.resolve(f)).collect();
            create_tar(&archive_path, &inputs).map_err(|e| CommandError::failed("tar", e))?;
            Ok(Output::normal(format!("Created tar archive {}", archive)).into())
        }
        "-xf" => {
            let file = File::open(&archive_path).map_err(|e| CommandError::failed("tar", e))?;
            tar::Archive::new(file)
                .unpack(ctx.cwd())
                .map_err(|e| CommandError::failed("tar", e))?;
            Ok(Output::normal(format!("Extracted tar archive {}", archive)).into())
        }
        _ => Err(CommandError::Invalid(
            "Unsupported tar option, use -cf or -xf".into(),
        )),
    }
}

/// Every input is stored under its base name, directories recursively.
fn create_tar(archive: &Path, inputs: &[PathBuf]) -> io::Result<()> {
    let mut builder = tar::Builder::new(File::create(archive)?);

    for input in inputs {
        let name = base_name(input)?;
        if input.is_dir() {
            builder.append_dir_all(&name, input)?;
        } else {
            builder.append_path_with_name(input, &name)?;
        }
    }
    builder.into_inner()?;
    Ok(())
}

pub fn zip(ctx: &mut CommandContext<'_>, args: &[String]) -> Result<Outcome, CommandError> {
    let [archive, files @ ..] = args else {
        return Err(CommandError::Usage("zip <archive.zip> <files...>"));
    };
    if files.is_empty() {
        return Err(CommandError::Usage("zip <archive.zip> <files...>"));
    }

    let inputs: Vec<PathBuf> = files.iter().map(|f| ctx.resolve(f)).collect();
    create_zip(&ctx.resolve(archive), &inputs).map_err(|e| CommandError::failed("zip", e))?;
    Ok(Output::normal(format!("Created zip archive {}", archive)).into())
}

fn create_zip(archive: &Path, inputs: &[PathBuf]) -> zip::result::ZipResult<()> {
    let mut writer = ZipWriter::new(File::create(archive)?);
    let options = FileOptions::default().compression_method(CompressionMethod::Stored);

    // missing inputs are skipped without complaint
    for input in inputs.iter().filter(|p| p.exists()) {
        let name = base_name(input)?;
        if input.is_dir() {
            writer.add_directory(name, options)?;
        } else {
            writer.start_file(name, options)?;
            io::copy(&mut File::open(input)?, &mut writer)?;
        }
    }
    writer.finish()?;
    Ok(())
}

pub fn unzip(ctx: &mut CommandContext<'_>, args: &[String]) -> Result<Outcome, CommandError> {
    let archive = args
        .first()
        .ok_or(CommandError::Usage("unzip <archive.zip>"))?;

    let file = File::open(ctx.resolve(archive)).map_err(|e| CommandError::failed("unzip", e))?;
    ZipArchive::new(file)
        .and_then(|mut zip| zip.extract(ctx.cwd()))
        .map_err(|e| CommandError::failed("unzip", e))?;
    Ok(Output::normal(format!("Extracted zip archive {}", archive)).into())
}

fn base_name(path: &Path) -> io::Result<String> {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .ok_or_else(|| {
            io::Error::new(
                io::ErrorKind::InvalidInput,
                format!("{} has no file name", path.display()),
            )
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::commands::test_support::{output, run};
    use std::fs;

    #[test]
    fn test_tar_round_trip() {
        let src = tempfile::tempdir().unwrap();
        let dst = tempfile::tempdir().unwrap();
        fs::write(src.path().join("x.txt"), b"payload\x00bytes").unwrap();

        let (_, result) = run(tar, src.path(), &["-cf", "a.tar", "x.txt"]);
        assert_eq!(output(result).text, "Created tar archive a.tar");

        let archive = src.path().join("a.tar").display().to_string();
        let (_, result) = run(tar, dst.path(), &["-xf", &archive]);
        assert!(output(result).text.starts_with("Extracted tar archive "));
        assert_eq!(
            fs::read(dst.path().join("x.txt")).unwrap(),
            b"payload\x00bytes"
        );
    }

    #[test]
    fn test_tar_stores_base_names_and_directories() {
        let src = tempfile::tempdir().unwrap();
        let dst = tempfile::tempdir().unwrap();
        fs::create_dir_all(src.path().join("nested/dir")).unwrap();
        fs::write(src.path().join("nested/dir/f"), "in dir").unwrap();
        fs::write(src.path().join("nested/top"), "top").unwrap();

        let (_, result) = run(tar, src.path(), &["-cf", "b.tar", "nested/top", "nested/dir"]);
        assert!(result.is_ok());

        let archive = src.path().join("b.tar").display().to_string();
        let (_, result) = run(tar, dst.path(), &["-xf", &archive]);
        assert!(result.is_ok());
        assert_eq!(fs::read_to_string(dst.path().join("top")).unwrap(), "top");
        assert_eq!(fs::read_to_string(dst.path().join("dir/f")).unwrap(), "in dir");
    }

    #[test]
    fn test_tar_errors() {
        let temp = tempfile::tempdir().unwrap();

        let (_, result) = run(tar, temp.path(), &["-cf"]);
        assert_eq!(result, Err(CommandError::Usage(TAR_USAGE)));

        let (_, result) = run(tar, temp.path(), &["-zf", "a.tar"]);
        assert_eq!(
            result,
            Err(CommandError::Invalid("Unsupported tar option, use -cf or -xf".into()))
        );

        let (_, result) = run(tar, temp.path(), &["-xf", "missing.tar"]);
        assert!(matches!(result, Err(CommandError::Failed { action: "tar", .. })));

        let (_, result) = run(tar, temp.path(), &["-cf", "c.tar", "ghost"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_zip_skips_missing_and_unzips() {
        let src = tempfile::tempdir().unwrap();
        let dst = tempfile::tempdir().unwrap();
        fs::write(src.path().join("a.txt"), "alpha").unwrap();

        let (_, result) = run(zip, src.path(), &["out.zip", "a.txt", "ghost.txt"]);
        assert_eq!(output(result).text, "Created zip archive out.zip");

        let archive = src.path().join("out.zip").display().to_string();
        let (_, result) = run(unzip, dst.path(), &[&archive]);
        assert!(output(result).text.starts_with("Extracted zip archive "));
        assert_eq!(fs::read_to_string(dst.path().join("a.txt")).unwrap(), "alpha");
        assert!(!dst.path().join("ghost.txt").exists());
    }

    #[test]
    fn test_zip_usage_and_bad_archive() {
        let temp = tempfile::tempdir().unwrap();
        fs::write(temp.path().join("junk.zip"), "not a zip").unwrap();

        let (_, result) = run(zip, temp.path(), &["out.zip"]);
        assert_eq!(result, Err(CommandError::Usage("zip <archive.zip> <files...>")));

        let (_, result) = run(unzip, temp.path(), &[]);
        assert_eq!(result, Err(CommandError::Usage("unzip <archive.zip>")));

        let (_, result) = run(unzip, temp.path(), &["junk.zip"]);
        assert!(matches!(result, Err(CommandError::Failed { action: "unzip", .. })));
    }
}
