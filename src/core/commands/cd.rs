use super::{Command, CommandContext, CommandError};
use crate::core::outcome::{Outcome, Output};
use crate::path::PathExpander;

#[derive(Clone)]
pub struct CdCommand {
    path_expander: PathExpander,
}

impl Default for CdCommand {
    fn default() -> Self {
        Self::new()
    }
}

impl CdCommand {
    pub fn new() -> Self {
        Self {
            path_expander: PathExpander::new(),
        }
    }
}

impl Command for CdCommand {
    fn execute(
        &self,
        ctx: &mut CommandContext<'_>,
        args: &[String],
    ) -> Result<Outcome, CommandError> {
        let path_str = args.first().map(|s| s.as_str()).unwrap_or("~");
        let target = if self.path_expander.is_home_path(path_str) {
            self.path_expander.expand(path_str)
        } else {
            ctx.resolve(path_str)
        };

        if !target.is_dir() {
            return Err(CommandError::Invalid(format!(
                "No such directory: {}",
                target.display()
            )));
        }

        let target = self.path_expander.absolute(&target);
        let message = format!("Changed directory to {}", target.display());
        *ctx.cwd = target;
        Ok(Output::normal(message).into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::commands::test_support::{output, run};
    use std::fs;

    #[test]
    fn test_cd_relative() {
        let temp = tempfile::tempdir().unwrap();
        fs::create_dir(temp.path().join("sub")).unwrap();

        let (cwd, result) = run(CdCommand::new(), temp.path(), &["sub"]);
        let out = output(result);
        assert_eq!(cwd, temp.path().join("sub"));
        assert!(out.text.starts_with("Changed directory to "));
    }

    #[test]
    fn test_cd_parent_is_normalised() {
        let temp = tempfile::tempdir().unwrap();
        fs::create_dir(temp.path().join("sub")).unwrap();

        let (cwd, result) = run(CdCommand::new(), &temp.path().join("sub"), &[".."]);
        assert!(result.is_ok());
        assert_eq!(cwd, temp.path());
    }

    #[test]
    fn test_cd_absolute() {
        let temp = tempfile::tempdir().unwrap();
        let other = tempfile::tempdir().unwrap();
        let target = other.path().to_string_lossy().to_string();

        let (cwd, result) = run(CdCommand::new(), temp.path(), &[&target]);
        assert!(result.is_ok());
        assert_eq!(cwd, other.path());
    }

    #[test]
    fn test_cd_home() {
        let temp = tempfile::tempdir().unwrap();
        let Some(home) = dirs::home_dir() else {
            return;
        };
        if !home.is_dir() {
            return;
        }

        let (cwd, result) = run(CdCommand::new(), temp.path(), &[]);
        assert!(result.is_ok());
        assert_eq!(cwd, PathExpander::new().absolute(&home));
    }

    #[test]
    fn test_cd_invalid_keeps_cwd() {
        let temp = tempfile::tempdir().unwrap();
        let (cwd, result) = run(CdCommand::new(), temp.path(), &["missing"]);
        assert_eq!(cwd, temp.path());
        assert!(matches!(result, Err(CommandError::Invalid(msg)) if msg.starts_with("No such directory: ")));
    }

    #[test]
    fn test_cd_tilde_name_is_relative_to_cwd() {
        let temp = tempfile::tempdir().unwrap();
        fs::create_dir(temp.path().join("~stash")).unwrap();

        let (cwd, result) = run(CdCommand::new(), temp.path(), &["~stash"]);
        assert!(result.is_ok());
        assert!(cwd.is_absolute());
        assert_eq!(cwd, temp.path().join("~stash"));
    }

    #[test]
    fn test_cd_into_file_fails() {
        let temp = tempfile::tempdir().unwrap();
        fs::write(temp.path().join("file.txt"), "x").unwrap();
        let (cwd, result) = run(CdCommand::new(), temp.path(), &["file.txt"]);
        assert_eq!(cwd, temp.path());
        assert!(result.is_err());
    }
}
