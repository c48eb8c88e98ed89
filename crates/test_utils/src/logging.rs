//! Tracing bootstrap for tests
//!
//! Installs a global `tracing-subscriber` fmt subscriber the first time it is
//! called in a test binary; later calls do nothing. Output goes through the
//! test writer, so it is captured per test and shown only on failure.
//!
//! `RUST_LOG` selects the level, defaulting to `warn`:
//!
//! ```bash
//! RUST_LOG=domain_person=debug cargo test -p domain_person
//! ```

use once_cell::sync::Lazy;
use tracing_subscriber::EnvFilter;

static TRACING: Lazy<()> = Lazy::new(|| {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    // Another harness may already own the global subscriber
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_test_writer()
        .try_init();
});

/// Initializes tracing for the current test binary
pub fn init_test_tracing() {
    Lazy::force(&TRACING);
}
