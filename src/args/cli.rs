use clap::Parser;
use std::time::Duration;

use super::defaults::{DEFAULT_MIN_DIFF, DEFAULT_STATUS_CODES, DEFAULT_TIMEOUT, DEFAULT_WORKERS};
use super::parsers::{
    parse_bool_env, parse_duration_arg, parse_methods, parse_positive_usize, parse_status_code,
};
use super::types::{MethodList, MinDiff, PositiveUsize};

#[derive(Debug, Parser, Clone)]
#[clap(
    version,
    about = "Concurrent content-discovery probe: requests every wordlist path on every target and reports responses that differ from the target's baseline."
)]
pub struct ProbeArgs {
    /// File with one absolute target URL per line
    #[arg(value_name = "TARGETS_FILE")]
    pub targets: Option<String>,

    /// Request headers: comma-separated 'Key: Value' list, or @file with one per line (repeatable)
    #[arg(long = "header", short = 'H')]
    pub headers: Vec<String>,

    /// Comma-separated list of request methods to send
    #[arg(
        long = "method",
        short = 'X',
        value_name = "METHODS",
        default_value = "get",
        value_parser = parse_methods
    )]
    pub methods: MethodList,

    /// Minimum fractional difference in response payload length from the target's baseline
    #[arg(long = "min-diff", short = 'd', default_value = DEFAULT_MIN_DIFF)]
    pub min_diff: MinDiff,

    /// Print errors and exit after this many (0 ignores errors)
    #[arg(long = "max-errors", short = 'e', default_value_t = 0)]
    pub max_errors: u64,

    /// Allow insecure TLS connections
    #[arg(long, short = 'k')]
    pub insecure: bool,

    /// Number of concurrent workers
    #[arg(long = "workers", short = 'n', default_value = DEFAULT_WORKERS, value_parser = parse_positive_usize)]
    pub workers: PositiveUsize,

    /// Comma-separated list of acceptable status codes
    #[arg(
        long = "status",
        short = 's',
        default_value = DEFAULT_STATUS_CODES,
        value_delimiter = ',',
        value_parser = parse_status_code
    )]
    pub status_codes: Vec<u16>,

    /// Wordlist of paths to try
    #[arg(long, short = 'w')]
    pub wordlist: Option<String>,

    /// Request timeout (supports ms/s/m/h)
    #[arg(long = "timeout", default_value = DEFAULT_TIMEOUT, value_parser = parse_duration_arg)]
    pub request_timeout: Duration,

    /// Path to config file (TOML/JSON). Defaults to ./polypath.toml or ./polypath.json if present.
    #[arg(long)]
    pub config: Option<String>,

    /// Do not print the banner
    #[arg(long = "no-banner")]
    pub no_banner: bool,

    /// Enable verbose logging (sets log level to debug unless overridden by POLYPATH_LOG/RUST_LOG)
    #[arg(long, short = 'v', alias = "debug")]
    pub verbose: bool,

    /// Disable color output
    #[arg(long = "no-color", env = "NO_COLOR", value_parser = parse_bool_env)]
    pub no_color: bool,
}
