//! Logging setup for override tests
//!
//! Discovery and the component registry emit `tracing` events. With the `log`
//! feature enabled those events reach `env_logger`, which tests initialize here.

use std::sync::Once;

/// Filter used when `RUST_LOG` is not set.
pub const DEFAULT_TEST_LOG_FILTER: &str = "warn,reinhardt_test=debug,reinhardt_di=debug";

static INIT: Once = Once::new();

/// Initializes `env_logger` for tests with [`DEFAULT_TEST_LOG_FILTER`].
///
/// `RUST_LOG=reinhardt_test=trace` additionally shows the scanned class
/// hierarchy and every resolved marker.
///
/// # Examples
///
/// ```
/// use reinhardt_test::logging::init_test_logging;
///
/// init_test_logging();
/// ```
pub fn init_test_logging() {
	init_test_logging_with_filter(DEFAULT_TEST_LOG_FILTER);
}

/// Initializes `env_logger` for tests, falling back to `filter` when
/// `RUST_LOG` is not set.
///
/// Only the first call in a test binary takes effect.
pub fn init_test_logging_with_filter(filter: &str) {
	INIT.call_once(|| {
		let env = env_logger::Env::default().default_filter_or(filter);
		let _ = env_logger::Builder::from_env(env).is_test(true).try_init();
	});
}
