//! Loaders for the run inputs: targets, wordlist, and request headers.
//!
//! Every failure here is a configuration error detected before any request
//! is issued.
mod headers;
mod targets;
mod wordlist;


pub use headers::load_headers;
pub use targets::{load_targets, parse_targets};
pub use wordlist::{load_wordlist, parse_wordlist};

fn non_empty_lines(content: &str) -> impl Iterator<Item = &str> {
    content.lines().map(str::trim).filter(|line| !line.is_empty())
}
