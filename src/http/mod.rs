//! HTTP client construction and the reqwest-backed request executor.
mod client;
mod sender;


pub use client::{ClientSettings, build_client, build_header_map};
pub use sender::HttpExecutor;
