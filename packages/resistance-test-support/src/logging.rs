//! Shared test logging initialization for unit and integration tests.

use once_cell::sync::OnceCell;
use tracing_subscriber::{fmt, EnvFilter};

static INITIALIZED: OnceCell<()> = OnceCell::new();

/// Variables consulted for the filter directive, first match wins.
pub const FILTER_VARS: [&str; 2] = ["TEST_LOG", "RUST_LOG"];

/// Install a test subscriber with the `"warn"` fallback.
pub fn init() {
    init_with_default("warn");
}

/// Install a test subscriber once per process.
///
/// The filter comes from the first set variable in [`FILTER_VARS`], else
/// `fallback`. Output goes through the test writer so the harness captures
/// it, without timestamps. Safe to call repeatedly; a subscriber installed
/// elsewhere is left in place.
pub fn init_with_default(fallback: &str) {
    INITIALIZED.get_or_init(|| {
        let filter = FILTER_VARS
            .iter()
            .find_map(|name| std::env::var(name).ok())
            .map(EnvFilter::new)
            .unwrap_or_else(|| EnvFilter::new(fallback));

        fmt()
            .with_env_filter(filter)
            .with_test_writer()
            .without_time()
            .try_init()
            .ok();
    });
}
