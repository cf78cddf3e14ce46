//! Catalog client configuration.

use std::time::Duration;

/// Public Pokémon TCG API.
pub const DEFAULT_BASE_URL: &str = "https://api.pokemontcg.io/v2";

/// Cards per page when the caller does not choose.
pub const DEFAULT_PAGE_SIZE: u32 = 15;

/// Environment variable overriding [`CatalogConfig::base_url`].
pub const BASE_URL_ENV: &str = "CARDVAULT_CATALOG_URL";

/// Card catalog client configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogConfig {
    /// Base URL without trailing slash, e.g. `https://api.pokemontcg.io/v2`.
    pub base_url: String,

    /// Default number of cards per listing page.
    ///
    /// Default: 15
    pub page_size: u32,

    /// Per-request timeout. `None` leaves requests unbounded.
    pub timeout: Option<Duration>,
}

impl CatalogConfig {
    /// Configuration pointing at `base_url`.
    #[must_use]
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url: String = base_url.into();
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            ..Self::default()
        }
    }

    /// Defaults, with the base URL taken from `CARDVAULT_CATALOG_URL` when set.
    #[must_use]
    pub fn from_env() -> Self {
        match std::env::var(BASE_URL_ENV) {
            Ok(url) if !url.trim().is_empty() => Self::new(url.trim()),
            _ => Self::default(),
        }
    }

    /// Set the default page size. Zero is treated as 1.
    #[must_use]
    pub const fn with_page_size(mut self, page_size: u32) -> Self {
        self.page_size = if page_size == 0 { 1 } else { page_size };
        self
    }

    /// Set the per-request timeout.
    #[must_use]
    pub const fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            page_size: DEFAULT_PAGE_SIZE,
            timeout: None,
        }
    }
}
