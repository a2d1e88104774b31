//! Tracing subscriber setup for binaries.

use tracing_subscriber::EnvFilter;

/// Install a stderr fmt subscriber.
///
/// `RUST_LOG` wins when set. Otherwise the crate logs at `info`, or at
/// `debug` when `verbose` is true. Calling this twice is harmless; the
/// second install is ignored.
pub fn init_logging(verbose: bool) {
    let default_level = if verbose { "etl_rs=debug" } else { "etl_rs=info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}
