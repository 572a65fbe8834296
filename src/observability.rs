use tracing_subscriber::EnvFilter;

/// Installs the global fmt subscriber, logging to stderr.
///
/// `RUST_LOG` takes precedence; otherwise the crate logs at `info`, or
/// `debug` when `verbose` is set.
pub fn init_tracing(verbose: bool) {
    let default = if verbose {
        "campus_energy=debug"
    } else {
        "campus_energy=info"
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}
