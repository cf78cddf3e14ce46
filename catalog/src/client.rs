//! Card catalog client implementation

use crate::config::CatalogConfig;
use crate::error::{CatalogError, Result};
use crate::query::CardQuery;
use crate::response::is_valid_api_response;
use crate::types::{Card, CardId, CardPage, SingleCardResponse};
use crate::validation::validate_card_id;
use reqwest::Client;
use std::future::Future;

/// Read access to a card catalog.
///
/// Implemented by [`CatalogClient`] for the real service and by the
/// in-memory catalog in `mocks` for tests.
pub trait CardCatalog: Send + Sync {
    /// Search cards by name, ordered by collector number then name.
    ///
    /// A blank or absent `term` lists all Pokémon cards.
    ///
    /// # Errors
    ///
    /// Returns errors for network failures, non-success statuses, or malformed listings.
    fn search_by_name(
        &self,
        term: Option<&str>,
        page_size: u32,
        page: u32,
    ) -> impl Future<Output = Result<CardPage>> + Send;

    /// Fetch one card.
    ///
    /// # Errors
    ///
    /// Any non-success status yields [`CatalogError::CardNotFound`], as does a
    /// malformed id.
    fn fetch_by_id(&self, id: &CardId) -> impl Future<Output = Result<Card>> + Send;

    /// List cards of one energy type, ordered by name.
    ///
    /// # Errors
    ///
    /// Returns errors for network failures, non-success statuses, or malformed listings.
    fn fetch_by_type(
        &self,
        card_type: &str,
        page_size: u32,
    ) -> impl Future<Output = Result<CardPage>> + Send;

    /// List cards depicting one National Pokédex entry, ordered by name.
    ///
    /// # Errors
    ///
    /// Returns errors for network failures, non-success statuses, or malformed listings.
    fn fetch_by_pokedex_number(&self, number: u32) -> impl Future<Output = Result<CardPage>> + Send;
}

/// HTTP client for the Pokémon TCG API.
#[derive(Clone, Debug)]
pub struct CatalogClient {
    client: Client,
    config: CatalogConfig,
}

impl CatalogClient {
    /// Create a client.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::Configuration`] if the HTTP client cannot be built.
    pub fn new(config: CatalogConfig) -> Result<Self> {
        let mut builder = Client::builder();
        if let Some(timeout) = config.timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder
            .build()
            .map_err(|e| CatalogError::Configuration(e.to_string()))?;

        Ok(Self { client, config })
    }

    /// Create a client configured from the environment.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::Configuration`] if the HTTP client cannot be built.
    pub fn from_env() -> Result<Self> {
        Self::new(CatalogConfig::from_env())
    }

    /// Active configuration.
    #[must_use]
    pub const fn config(&self) -> &CatalogConfig {
        &self.config
    }

    /// Run a listing query.
    ///
    /// # Errors
    ///
    /// Returns errors for network failures, non-success statuses, or malformed listings.
    #[tracing::instrument(skip(self), name = "catalog_list")]
    pub async fn list(&self, query: &CardQuery) -> Result<CardPage> {
        let url = format!("{}/cards", self.config.base_url);
        let params = query.params();
        tracing::debug!(%url, ?params, "Requesting card listing");

        let response = self
            .client
            .get(&url)
            .query(&params)
            .send()
            .await
            .map_err(|e| CatalogError::Network(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            tracing::warn!(status = status.as_u16(), "Card listing failed");
            return Err(CatalogError::Status {
                status: status.as_u16(),
                message,
            });
        }

        let body: serde_json::Value = response
            .json()
            .await
            .map_err(|e| CatalogError::Decode(e.to_string()))?;

        if !is_valid_api_response(&body) {
            return Err(CatalogError::InvalidResponse(
                "expected data array with numeric page and pageSize".to_string(),
            ));
        }

        let page: CardPage =
            serde_json::from_value(body).map_err(|e| CatalogError::Decode(e.to_string()))?;
        tracing::debug!(count = page.data.len(), total = page.total_count, "Card listing loaded");
        Ok(page)
    }

    /// Fetch one card.
    ///
    /// # Errors
    ///
    /// Any non-success status yields [`CatalogError::CardNotFound`]. Ids that
    /// are not `<set>-<number>` are reported as not found (404) without a
    /// request, so they can never address another resource.
    #[tracing::instrument(skip(self, id), fields(id = %id), name = "catalog_card")]
    pub async fn card(&self, id: &CardId) -> Result<Card> {
        if !validate_card_id(id.as_str()) {
            tracing::warn!("Malformed card id, not requested");
            return Err(CatalogError::CardNotFound {
                id: id.to_string(),
                status: 404,
            });
        }

        let url = format!("{}/cards/{}", self.config.base_url, id.as_str());
        tracing::debug!(%url, "Requesting card");

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| CatalogError::Network(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            tracing::warn!(status = status.as_u16(), "Card lookup failed");
            return Err(CatalogError::CardNotFound {
                id: id.to_string(),
                status: status.as_u16(),
            });
        }

        response
            .json::<SingleCardResponse>()
            .await
            .map(|envelope| envelope.data)
            .map_err(|e| CatalogError::Decode(e.to_string()))
    }
}

impl CardCatalog for CatalogClient {
    fn search_by_name(
        &self,
        term: Option<&str>,
        page_size: u32,
        page: u32,
    ) -> impl Future<Output = Result<CardPage>> + Send {
        let query = CardQuery::Search {
            term: term.map(str::to_string),
            page_size,
            page,
        };
        async move { self.list(&query).await }
    }

    fn fetch_by_id(&self, id: &CardId) -> impl Future<Output = Result<Card>> + Send {
        self.card(id)
    }

    fn fetch_by_type(
        &self,
        card_type: &str,
        page_size: u32,
    ) -> impl Future<Output = Result<CardPage>> + Send {
        let query = CardQuery::ByType {
            card_type: card_type.to_string(),
            page_size,
        };
        async move { self.list(&query).await }
    }

    fn fetch_by_pokedex_number(
        &self,
        number: u32,
    ) -> impl Future<Output = Result<CardPage>> + Send {
        let query = CardQuery::ByPokedexNumber(number);
        async move { self.list(&query).await }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)] // Test code
mod tests {
    use super::*;

    #[test]
    fn client_keeps_config() {
        let client = CatalogClient::new(CatalogConfig::new("http://localhost:9999/")).unwrap();
        assert_eq!(client.config().base_url, "http://localhost:9999");
        assert_eq!(client.config().page_size, 15);
    }
}
