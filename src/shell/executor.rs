use std::ops::ControlFlow;

use crate::core::{Outcome, Output, ResultKind, Theme};
use crate::error::ShellError;

/// Presentation side of a dispatch: printing, clearing, theme switches.
pub(crate) trait OutcomeHandler {
    /// Interactive handling; `Break` ends the prompt loop.
    fn handle_outcome(&mut self, outcome: Outcome) -> Result<ControlFlow<()>, ShellError>;

    /// Non-interactive handling; returns whether the result was an error.
    fn print_outcome(&mut self, outcome: Outcome) -> bool;
}

impl OutcomeHandler for super::Shell {
    fn handle_outcome(&mut self, outcome: Outcome) -> Result<ControlFlow<()>, ShellError> {
        let output = match outcome {
            Outcome::Exit => return Ok(ControlFlow::Break(())),
            Outcome::Output(output) => output,
        };

        match output.kind {
            ResultKind::Clear => self.editor.clear_screen()?,
            ResultKind::Theme => self.switch_theme(&output.text),
            _ => self.print(&output),
        }
        Ok(ControlFlow::Continue(()))
    }

    fn print_outcome(&mut self, outcome: Outcome) -> bool {
        match outcome {
            Outcome::Exit => false,
            Outcome::Output(output) => {
                match output.kind {
                    ResultKind::Clear => {}
                    ResultKind::Theme => self.switch_theme(&output.text),
                    _ => self.print(&output),
                }
                output.kind == ResultKind::Error
            }
        }
    }
}

impl super::Shell {
    fn print(&self, output: &Output) {
        if output.text.is_empty() {
            return;
        }
        let rendered = self.highlighter.render(output);
        match output.kind {
            ResultKind::Error | ResultKind::Warning => eprintln!("{}", rendered),
            _ => println!("{}", rendered),
        }
    }

    fn switch_theme(&mut self, name: &str) {
        match name.parse::<Theme>() {
            Ok(theme) => {
                self.highlighter.set_theme(theme);
                if let Some(helper) = self.editor.helper_mut() {
                    helper.set_theme(theme);
                }
                self.print(&Output::normal(format!("Theme set to {}", theme)));
            }
            Err(message) => self.print(&Output::error(message)),
        }
    }
}
