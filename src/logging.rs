//! Logging setup for the command line tool.

use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;

/// Sets up logging of events reported while converting zone data.
///
/// Events are written to stderr. Use the RUST_LOG environment variable to
/// override the defaults.
///
/// E.g. to see every record as it is read:
///   RUST_LOG=dnszone=TRACE
///
/// Without RUST_LOG, only warnings are shown unless `verbose` is set, in
/// which case debug events are shown, too.
pub fn init_logging(verbose: bool) {
    let level = if verbose {
        LevelFilter::DEBUG
    } else {
        LevelFilter::WARN
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::builder()
                .with_default_directive(level.into())
                .from_env_lossy(),
        )
        .with_writer(std::io::stderr)
        .without_time()
        .try_init()
        .ok();
}
