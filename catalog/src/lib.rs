//! # CardVault Catalog
//!
//! Read-only access to the Pokémon TCG card catalog.
//!
//! ## Example
//!
//! ```no_run
//! use cardvault_catalog::{CardCatalog, CatalogClient, CatalogConfig};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = CatalogClient::new(CatalogConfig::default())?;
//!
//!     let page = client.search_by_name(Some("charizard"), 15, 1).await?;
//!     for card in &page.data {
//!         println!("{} {}", card.id, card.name);
//!     }
//!     Ok(())
//! }
//! ```
//!
//! ## Modules
//!
//! - [`client`]: the [`CardCatalog`] trait and its HTTP implementation
//! - [`browse`]: listing and detail views as a reducer, with stale-response protection
//! - [`validation`] and [`format`]: input checks and display helpers

pub mod browse;
pub mod client;
pub mod config;
pub mod error;
pub mod format;
pub mod query;
pub mod response;
pub mod types;
pub mod validation;

#[cfg(any(test, feature = "test-utils"))]
pub mod mocks;

pub use browse::{BrowseAction, BrowseEnvironment, BrowseReducer, BrowseState};
pub use client::{CardCatalog, CatalogClient};
pub use config::CatalogConfig;
pub use error::{CatalogError, ErrorCategory, Result};
pub use query::CardQuery;
pub use response::is_valid_api_response;
pub use types::{Card, CardId, CardImages, CardPage, CardSet};
