use super::{Command, CommandContext, CommandError};
use crate::core::outcome::{Outcome, Output};
use crate::history::CommandLog;

#[derive(Clone, Default)]
pub struct HistoryCommand;

impl HistoryCommand {
    pub fn new() -> Self {
        Self
    }

    fn format_log(&self, log: &CommandLog) -> String {
        if log.is_empty() {
            return "No commands in history.".to_string();
        }

        log.entries()
            .enumerate()
            .map(|(i, entry)| format!("{} {}", i + 1, entry))
            .collect::<Vec<_>>()
            .join("\n")
    }
}

impl Command for HistoryCommand {
    fn execute(
        &self,
        ctx: &mut CommandContext<'_>,
        _args: &[String],
    ) -> Result<Outcome, CommandError> {
        Ok(Output::normal(self.format_log(ctx.session.history())).into())
    }
}
