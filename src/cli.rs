//! CLI domain: parse, route, output, and presentation only.
//! No view logic; a single route table dispatches to the show service and the store.

mod output;
mod parse;
mod presentation;
mod route;

pub use output::map_error;
pub use parse::{Cli, Commands, OutputFormat, ShowTarget};
pub use presentation::{format_view_json, format_view_text};
pub use route::RunContext;
