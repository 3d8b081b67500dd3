pub mod completer;
pub mod config;
pub mod error;
pub mod flags;
pub mod highlight;
pub mod shell;

pub mod core;
pub mod history;
pub mod path;
pub mod process;
