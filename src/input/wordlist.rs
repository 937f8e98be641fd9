use std::path::Path;
use std::sync::Arc;

use crate::error::{AppError, AppResult, InputError};

use super::non_empty_lines;

/// Reads the wordlist: one candidate path per non-empty line.
///
/// # Errors
///
/// Returns an error when the file cannot be read or holds no paths.
pub fn load_wordlist(path: &Path) -> AppResult<Vec<Arc<str>>> {
    let content = std::fs::read_to_string(path).map_err(|err| {
        AppError::input(InputError::ReadWordlist {
            path: path.to_path_buf(),
            source: err,
        })
    })?;
    let paths = parse_wordlist(&content);
    if paths.is_empty() {
        return Err(AppError::input(InputError::WordlistEmpty {
            path: path.to_path_buf(),
        }));
    }
    Ok(paths)
}

/// Parses wordlist lines, adding a leading `/` where it is missing.
#[must_use]
pub fn parse_wordlist(content: &str) -> Vec<Arc<str>> {
    non_empty_lines(content)
        .map(|line| {
            if line.starts_with('/') {
                Arc::from(line)
            } else {
                Arc::from(format!("/{}", line))
            }
        })
        .collect()
}
