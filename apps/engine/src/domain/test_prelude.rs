//! Shared configuration for domain property tests.

use std::env;

use proptest::prelude::ProptestConfig;

pub fn proptest_config() -> ProptestConfig {
    let cases = env::var("PROPTEST_CASES")
        .ok()
        .and_then(|s| s.parse().ok())
        .unwrap_or(64); // Low default for fast CI

    ProptestConfig {
        cases,
        ..ProptestConfig::default()
    }
}
