//! kgraph CLI library
//!
//! Argument parsing, command handlers and export writers for the `kgraph`
//! binary. The graph itself is built by `kilngraph-core`.

pub mod cli;
pub mod commands;
pub mod export;
pub mod output;
