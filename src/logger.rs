use tracing_subscriber::{EnvFilter, FmtSubscriber};

/// Installs the global fmt subscriber on stderr. Stdout is reserved for hits.
pub fn init_logging(verbose: bool, no_color: bool) {
    let filter = std::env::var("POLYPATH_LOG")
        .or_else(|_missing| std::env::var("RUST_LOG"))
        .map_or_else(
            |_missing| {
                if verbose {
                    EnvFilter::new("debug")
                } else {
                    EnvFilter::new("info")
                }
            },
            |value| EnvFilter::try_new(value).unwrap_or_else(|_invalid| EnvFilter::new("info")),
        );

    let subscriber = FmtSubscriber::builder()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_ansi(!no_color)
        .finish();

    if let Err(err) = tracing::subscriber::set_global_default(subscriber) {
        eprintln!("Failed to set global default subscriber: {}", err);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn init_logging_is_idempotent() {
        init_logging(false, true);
        init_logging(true, true);
    }
}
