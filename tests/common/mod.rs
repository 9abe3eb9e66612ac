// SPDX-License-Identifier: MIT OR Apache-2.0

//! Helper utilities shared across integration tests.

use std::sync::OnceLock;

/// Guard so the subscriber is only installed once per test binary.
static TRACING: OnceLock<()> = OnceLock::new();

/// Installs a tracing subscriber for test output.
///
/// Honors `RUST_LOG`; safe to call from every test.
#[allow(dead_code)]
pub fn init_tracing() {
    TRACING.get_or_init(|| {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(
                tracing_subscriber::EnvFilter::try_from_default_env()
                    .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
            )
            .with_test_writer()
            .try_init();
    });
}
