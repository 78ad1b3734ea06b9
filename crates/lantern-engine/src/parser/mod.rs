//! Command parsing and name resolution.

mod command;
mod resolver;

pub use command::{CommandParser, ParsedCommand, WordParser, strip_article};
pub use resolver::{resolve_name, scope, suggest_names};
