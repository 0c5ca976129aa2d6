use tracing_subscriber::EnvFilter;

/// Setup logging of events reported by the library and the command line
/// tool.
///
/// Events go to stderr so they never mix with the labels printed on
/// stdout. Use the RUST_LOG environment variable to override the defaults.
///
/// E.g. To see each conversion:
///   RUST_LOG=tinydns_tai64=TRACE
pub fn init_logging() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .without_time()
        .try_init()
        .ok();
}
