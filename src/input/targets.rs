use std::path::Path;

use url::Url;

use crate::error::{AppError, AppResult, InputError};
use crate::probe::Target;

use super::non_empty_lines;

/// Reads the targets file: one absolute URL per non-empty line.
///
/// # Errors
///
/// Returns an error when the file cannot be read, holds no targets, or a line
/// is not an absolute URL.
pub fn load_targets(path: &Path) -> AppResult<Vec<Target>> {
    let content = std::fs::read_to_string(path).map_err(|err| {
        AppError::input(InputError::ReadTargets {
            path: path.to_path_buf(),
            source: err,
        })
    })?;
    let targets = parse_targets(&content)?;
    if targets.is_empty() {
        return Err(AppError::input(InputError::TargetsEmpty {
            path: path.to_path_buf(),
        }));
    }
    Ok(targets)
}

/// Parses target lines, normalizing each URL to have no trailing `/`.
///
/// # Errors
///
/// Returns an error for the first line that is not an absolute URL.
pub fn parse_targets(content: &str) -> AppResult<Vec<Target>> {
    non_empty_lines(content).map(parse_target).collect()
}

fn parse_target(line: &str) -> AppResult<Target> {
    let url = Url::parse(line).map_err(|_err| {
        AppError::input(InputError::InvalidTarget {
            value: line.to_owned(),
        })
    })?;
    let normalized = url.as_str();
    Ok(Target::new(
        normalized.strip_suffix('/').unwrap_or(normalized),
    ))
}
