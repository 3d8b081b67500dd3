use super::{CommandContext, CommandError};
use crate::core::outcome::{Outcome, Output};

pub fn env(ctx: &mut CommandContext<'_>, _args: &[String]) -> Result<Outcome, CommandError> {
    let lines: Vec<String> = ctx
        .session
        .env()
        .iter()
        .map(|(key, value)| format!("{}={}", key, value))
        .collect();
    Ok(Output::normal(lines.join("\n")).into())
}

/// `set NAME=VALUE`; splits on the first `=` so values may contain more.
pub fn set(ctx: &mut CommandContext<'_>, args: &[String]) -> Result<Outcome, CommandError> {
    let (key, value) = args
        .first()
        .and_then(|arg| arg.split_once('='))
        .ok_or(CommandError::Usage("set VAR=VALUE"))?;

    ctx.session
        .env_mut()
        .set(key, value)
        .map_err(|e| CommandError::failed("set", e))?;
    Ok(Output::normal(format!("Set {}={}", key, value)).into())
}
