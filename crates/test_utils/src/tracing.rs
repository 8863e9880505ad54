//! Test log capture
//!
//! Domain crates emit `tracing` events (skipped ex-member contributions,
//! recorded payments). Tests that want to see them call [`init_test_tracing`]
//! once; repeated calls are no-ops.

use once_cell::sync::OnceCell;
use tracing_subscriber::EnvFilter;

static INIT: OnceCell<()> = OnceCell::new();

/// Installs a global subscriber honoring `RUST_LOG`, at most once
pub fn init_test_tracing() {
    INIT.get_or_init(|| {
        tracing_subscriber::fmt()
            .with_env_filter(EnvFilter::from_default_env())
            .with_test_writer()
            .try_init()
            .ok();
    });
}
