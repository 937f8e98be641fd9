//! Core library for the `polypath` CLI.
//!
//! This crate provides the building blocks used by the binary: CLI argument
//! types, configuration loading, input loaders, the reqwest-backed request
//! executor, and the probe engine (dispatcher, worker pool, and aggregator).
//! The primary user-facing interface is the `polypath` command-line
//! application; library APIs may evolve as the CLI grows.
pub mod args;
pub mod config;
pub mod error;
pub mod http;
pub mod input;
pub mod probe;
pub mod shutdown;
