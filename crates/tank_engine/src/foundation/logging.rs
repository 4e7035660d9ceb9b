//! Logging setup for binaries built on the engine

/// Initialize logging with a default filter used when `RUST_LOG` is unset
///
/// Calling it twice is harmless.
pub fn init_with_level(default_filter: &str) {
    let env = env_logger::Env::default().default_filter_or(default_filter);
    let _ = env_logger::Builder::from_env(env).try_init();
}
