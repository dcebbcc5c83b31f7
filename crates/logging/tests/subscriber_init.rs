//! Integration tests for installing the diagnostic subscriber.

use rsyncy_logging::{LogConfig, LoggingError, init_tracing};

/// Only the first installation succeeds; later ones report the conflict.
#[test]
fn second_initialisation_is_reported() {
    let config = LogConfig::default();
    init_tracing(&config).expect("first init");

    let error = init_tracing(&config).expect_err("second init");
    assert!(matches!(error, LoggingError::AlreadyInitialised(_)));
    assert!(format!("{error}").contains("already initialised"));

    tracing::warn!(target: "rsyncy::test", "emitted after init");
}
