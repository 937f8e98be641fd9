use std::path::PathBuf;

use crate::args::parse_header;
use crate::error::{AppError, AppResult, InputError};

use super::non_empty_lines;

/// Expands `-H` values into header pairs.
///
/// A value starting with `@` names a file holding one header per line; any
/// other value is a comma-separated list of `Key: Value` entries.
///
/// # Errors
///
/// Returns an error when a header file cannot be read or an entry is not in
/// `Key: Value` form.
pub fn load_headers(values: &[String]) -> AppResult<Vec<(String, String)>> {
    let mut headers = Vec::new();
    for value in values {
        if let Some(file) = value.strip_prefix('@') {
            let path = PathBuf::from(file);
            let content = std::fs::read_to_string(&path).map_err(|err| {
                AppError::input(InputError::ReadHeaders {
                    path: path.clone(),
                    source: err,
                })
            })?;
            for line in non_empty_lines(&content) {
                headers.push(parse_entry(line, value)?);
            }
        } else {
            for entry in value.split(',').map(str::trim).filter(|entry| !entry.is_empty()) {
                headers.push(parse_entry(entry, value)?);
            }
        }
    }
    Ok(headers)
}

fn parse_entry(entry: &str, origin: &str) -> AppResult<(String, String)> {
    parse_header(entry).map_err(|err| {
        AppError::input(InputError::InvalidHeader {
            origin: origin.to_owned(),
            source: err,
        })
    })
}
