//! CLI argument types and parsing helpers.
mod cli;
mod defaults;
pub(crate) mod parsers;
mod types;

#[cfg(test)]
mod test_support;
#[cfg(test)]
mod tests;

pub use cli::ProbeArgs;
pub use defaults::DEFAULT_CONFIG_FILES;
pub use parsers::dedup_methods;
pub use types::{HttpMethod, MethodList, MinDiff, PositiveUsize};

pub(crate) use defaults::DEFAULT_USER_AGENT;
pub(crate) use parsers::{parse_duration_arg, parse_header, validate_status_code};
