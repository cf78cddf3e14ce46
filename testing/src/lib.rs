//! # CardVault Testing
//!
//! Testing utilities and helpers for CardVault.
//!
//! This crate provides:
//! - Deterministic implementations of environment traits
//! - A storage backend whose reads and writes can be made to fail
//! - The [`ReducerTest`] Given-When-Then harness
//! - proptest strategies for domain inputs
//!
//! ## Example
//!
//! ```ignore
//! use cardvault_testing::{ReducerTest, test_clock};
//!
//! ReducerTest::new(BrowseReducer::new())
//!     .with_env(BrowseEnvironment::new(catalog, test_clock(), 15))
//!     .given_state(BrowseState::default())
//!     .when_action(BrowseAction::Search)
//!     .then_effects(assertions::assert_has_future_effect)
//!     .run();
//! ```

use chrono::{DateTime, Utc};
use cardvault_core::environment::Clock;


pub use reducer_test::{ReducerTest, assertions};

/// Mock implementations for testing.
pub mod mocks {
    use super::{Clock, DateTime, Utc};
    use cardvault_storage::{KeyValueBackend, MemoryBackend, Result, StorageError};
    use std::sync::Arc;
    use std::sync::atomic::{AtomicBool, Ordering};

    /// Fixed clock for deterministic tests
    ///
    /// Always returns the same time, making tests reproducible.
    ///
    /// # Example
    ///
    /// ```
    /// use cardvault_testing::mocks::FixedClock;
    /// use cardvault_core::environment::Clock;
    /// use chrono::Utc;
    ///
    /// let clock = FixedClock::new(Utc::now());
    /// let time1 = clock.now();
    /// let time2 = clock.now();
    /// assert_eq!(time1, time2); // Always the same!
    /// ```
    #[derive(Debug, Clone)]
    pub struct FixedClock {
        time: DateTime<Utc>,
    }

    impl FixedClock {
        /// Create a new fixed clock with the given time
        #[must_use]
        pub const fn new(time: DateTime<Utc>) -> Self {
            Self { time }
        }
    }

    impl Clock for FixedClock {
        fn now(&self) -> DateTime<Utc> {
            self.time
        }
    }

    /// Create a default fixed clock for tests (2025-01-01 00:00:00 UTC)
    #[must_use]
    pub fn test_clock() -> FixedClock {
        FixedClock::new(DateTime::<Utc>::from_timestamp(1_735_689_600, 0).unwrap_or_default())
    }

    /// Backend that can be switched into failing reads or writes.
    ///
    /// Wraps a [`MemoryBackend`]; clones share both the data and the switches,
    /// so a test can hand one clone to the code under test and flip failures
    /// on the other.
    #[derive(Debug, Clone, Default)]
    pub struct FailingBackend {
        inner: MemoryBackend,
        fail_reads: Arc<AtomicBool>,
        fail_writes: Arc<AtomicBool>,
    }

    impl FailingBackend {
        /// Healthy backend over an empty namespace.
        #[must_use]
        pub fn new() -> Self {
            Self::default()
        }

        /// Backend whose every write fails.
        #[must_use]
        pub fn read_only() -> Self {
            let backend = Self::new();
            backend.set_fail_writes(true);
            backend
        }

        /// Backend whose every operation fails.
        #[must_use]
        pub fn unavailable() -> Self {
            let backend = Self::read_only();
            backend.set_fail_reads(true);
            backend
        }

        /// Make `get_item` fail (or recover).
        pub fn set_fail_reads(&self, fail: bool) {
            self.fail_reads.store(fail, Ordering::SeqCst);
        }

        /// Make `set_item`, `remove_item` and `clear` fail (or recover).
        pub fn set_fail_writes(&self, fail: bool) {
            self.fail_writes.store(fail, Ordering::SeqCst);
        }

        /// The wrapped data, bypassing the failure switches.
        #[must_use]
        pub const fn inner(&self) -> &MemoryBackend {
            &self.inner
        }

        fn check(flag: &AtomicBool, operation: &str) -> Result<()> {
            if flag.load(Ordering::SeqCst) {
                Err(StorageError::Unavailable(format!("{operation} disabled by test")))
            } else {
                Ok(())
            }
        }
    }

    impl KeyValueBackend for FailingBackend {
        fn get_item(&self, key: &str) -> Result<Option<String>> {
            Self::check(&self.fail_reads, "read")?;
            self.inner.get_item(key)
        }

        fn set_item(&self, key: &str, value: &str) -> Result<()> {
            Self::check(&self.fail_writes, "write")?;
            self.inner.set_item(key, value)
        }

        fn remove_item(&self, key: &str) -> Result<()> {
            Self::check(&self.fail_writes, "remove")?;
            self.inner.remove_item(key)
        }

        fn clear(&self) -> Result<()> {
            Self::check(&self.fail_writes, "clear")?;
            self.inner.clear()
        }
    }
}

/// Test helpers and utilities.
pub mod helpers {
    use tracing_subscriber::EnvFilter;

    /// Route `tracing` output through the test harness.
    ///
    /// Honors `RUST_LOG`; safe to call from every test.
    pub fn init_tracing() {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(EnvFilter::from_default_env())
            .with_test_writer()
            .try_init();
    }
}

/// Property-based testing utilities using proptest.
pub mod properties {
    use proptest::prelude::*;

    /// Card ids shaped like the catalog's, e.g. `base1-4`.
    pub fn card_id() -> impl Strategy<Value = String> {
        "[a-z]{2,6}[0-9]{1,2}-[0-9]{1,3}"
    }

    /// Usernames that pass credential validation.
    pub fn valid_username() -> impl Strategy<Value = String> {
        "[a-zA-Z][a-zA-Z0-9_]{2,15}"
    }
}

// Re-export commonly used items
pub use helpers::init_tracing;
pub use mocks::{FailingBackend, FixedClock, test_clock};
