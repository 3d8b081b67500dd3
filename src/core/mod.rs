pub mod commands;
pub mod env;
pub mod interpreter;
pub mod outcome;
pub mod session;

pub use commands::{CommandError, VERBS};
pub use interpreter::Interpreter;
pub use outcome::{Outcome, Output, ResultKind, Theme};
pub use session::Session;
