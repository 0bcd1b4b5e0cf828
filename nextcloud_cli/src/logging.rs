use log::LevelFilter;

/// Installs the stderr logger. Stdout is reserved for the stdio transport.
///
/// Level is `info`, or `debug` when verbose; `RUST_LOG` overrides both.
pub fn initialize_logging(verbose: bool) {
    let level = if verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    };

    let mut builder = env_logger::Builder::new();
    builder
        .filter_level(level)
        .parse_default_env()
        .format_timestamp_millis()
        .target(env_logger::Target::Stderr)
        .init();
}
