/// Initialises env_logger. `--verbose` shows per-file progress and debug
/// output; otherwise only warnings (unbalanced markers, failed files) and
/// errors are printed. `RUST_LOG` still overrides both.
pub fn init_logger(verbose: bool) {
    env_logger::Builder::new()
        .filter_level(if verbose {
            log::LevelFilter::Debug
        } else {
            log::LevelFilter::Warn
        })
        .format_timestamp(None)
        .parse_default_env()
        .init();
}
