//! Config sources, lowest precedence first: global file, local file, environment.

pub mod env;
pub mod global_file;
pub mod local_file;
