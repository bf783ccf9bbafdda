//! Integration tests for the netview interface view engine

mod cli_commands;
mod sled_store;
mod test_utils;
