//! Netview: Interface State Views
//!
//! Computes read-only operational views of network interfaces from a
//! multi-database key/value state store. Each view fetches the tables it
//! addresses, derives per-entity status and renders a deterministic keyed
//! document for the transport layer.

pub mod access;
pub mod cli;
pub mod config;
pub mod dataset;
pub mod error;
pub mod logging;
pub mod query;
pub mod store;
pub mod types;
pub mod views;
