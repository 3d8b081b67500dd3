use super::{CommandContext, CommandError};
use crate::core::outcome::{Outcome, Output};
use crate::process::{ProcessInfo, ProcessListing, ProcessSample};

const TOP_LIMIT: usize = 10;
const NAME_WIDTH: usize = 25;

pub fn ps(ctx: &mut CommandContext<'_>, _args: &[String]) -> Result<Outcome, CommandError> {
    let listing = ctx
        .processes
        .list()
        .map_err(|e| CommandError::failed("ps", e))?;

    let text = match listing {
        ProcessListing::Rows(rows) => rows.iter().map(format_row).collect::<Vec<_>>().join("\n"),
        ProcessListing::Raw(text) => text,
    };
    Ok(Output::normal(text).into())
}

fn format_row(row: &ProcessInfo) -> String {
    let name: String = row.name.chars().take(NAME_WIDTH).collect();
    format!("{:>6} {:width$} {}", row.pid, name, row.user, width = NAME_WIDTH)
}

pub fn kill(ctx: &mut CommandContext<'_>, args: &[String]) -> Result<Outcome, CommandError> {
    let raw = args.first().ok_or(CommandError::Usage("kill <pid>"))?;
    let pid: u32 = raw.parse().map_err(|e| CommandError::failed("kill", e))?;

    let message = ctx
        .processes
        .terminate(pid)
        .map_err(|e| CommandError::failed("kill", e))?;
    Ok(Output::normal(message).into())
}

pub fn top(ctx: &mut CommandContext<'_>, _args: &[String]) -> Result<Outcome, CommandError> {
    let samples = ctx
        .processes
        .top(TOP_LIMIT)
        .map_err(|e| CommandError::failed("top", e))?;

    let mut lines = vec!["  CPU%   PID NAME".to_string()];
    lines.extend(samples.iter().map(format_sample));
    Ok(Output::normal(lines.join("\n")).into())
}

fn format_sample(sample: &ProcessSample) -> String {
    format!("{:6.1} {:6} {}", sample.cpu, sample.pid, sample.name)
}
