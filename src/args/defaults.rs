pub(crate) const DEFAULT_USER_AGENT: &str = concat!("polypath/", env!("CARGO_PKG_VERSION"));

/// Config filenames checked, in order, when `--config` is not given.
pub const DEFAULT_CONFIG_FILES: [&str; 2] = ["polypath.toml", "polypath.json"];

pub(super) const DEFAULT_WORKERS: &str = "40";
pub(super) const DEFAULT_MIN_DIFF: &str = "0.2";
pub(super) const DEFAULT_STATUS_CODES: &str = "200";
pub(super) const DEFAULT_TIMEOUT: &str = "3s";
