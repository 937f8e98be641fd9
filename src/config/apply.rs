use clap::ArgMatches;
use clap::parser::ValueSource;

use crate::args::{MethodList, PositiveUsize, ProbeArgs, validate_status_code};
use crate::error::{AppError, AppResult, ConfigError, ValidationError};

use super::types::ConfigFile;

/// Applies configuration values to CLI arguments that were not given on the
/// command line.
///
/// # Errors
///
/// Returns an error when a config value is out of range or malformed.
pub fn apply_config(
    args: &mut ProbeArgs,
    matches: &ArgMatches,
    config: &ConfigFile,
) -> AppResult<()> {
    if !is_cli(matches, "targets")
        && let Some(targets) = config.targets.clone()
    {
        args.targets = Some(targets);
    }

    if !is_cli(matches, "wordlist")
        && let Some(wordlist) = config.wordlist.clone()
    {
        args.wordlist = Some(wordlist);
    }

    if !is_cli(matches, "headers")
        && let Some(headers) = config.headers.clone()
    {
        args.headers = headers;
    }

    if !is_cli(matches, "methods")
        && let Some(methods) = config.methods.clone()
    {
        args.methods = MethodList::from(methods);
    }

    if !is_cli(matches, "status_codes")
        && let Some(status) = config.status.as_ref()
    {
        let mut codes = Vec::with_capacity(status.len());
        for code in status {
            codes.push(validate_status_code(*code).map_err(|err| field_error("status", err))?);
        }
        args.status_codes = codes;
    }

    if !is_cli(matches, "min_diff")
        && let Some(min_diff) = config.min_diff.as_ref()
    {
        args.min_diff = min_diff
            .to_min_diff()
            .map_err(|err| field_error("min_diff", err))?;
    }

    if !is_cli(matches, "max_errors")
        && let Some(max_errors) = config.max_errors
    {
        args.max_errors = max_errors;
    }

    if !is_cli(matches, "workers")
        && let Some(workers) = config.workers
    {
        args.workers =
            PositiveUsize::try_from(workers).map_err(|err| field_error("workers", err))?;
    }

    if !is_cli(matches, "insecure")
        && let Some(insecure) = config.insecure
    {
        args.insecure = insecure;
    }

    if !is_cli(matches, "request_timeout")
        && let Some(timeout) = config.timeout.as_ref()
    {
        args.request_timeout = timeout.to_duration()?;
    }

    Ok(())
}

fn is_cli(matches: &ArgMatches, name: &str) -> bool {
    matches.value_source(name) == Some(ValueSource::CommandLine)
}

fn field_error(field: &'static str, source: ValidationError) -> AppError {
    AppError::config(ConfigError::InvalidField { field, source })
}
