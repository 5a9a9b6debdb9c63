//! Shared setup for the integration tests
#![allow(dead_code)]

pub mod builders;

use std::sync::Once;

static INIT: Once = Once::new();

/// Initialises logging once across all tests in a binary
pub fn setup(log_level: &str) {
    INIT.call_once(|| {
        let _ = env_logger::Builder::new()
            .is_test(true)
            .parse_filters(log_level)
            .try_init();
    });
}
