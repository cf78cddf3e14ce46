//! HTTP behaviour of the catalog client against a mock server.

#![allow(clippy::unwrap_used)] // Test code

use cardvault_catalog::{
    CardCatalog, CardId, CatalogClient, CatalogConfig, CatalogError, ErrorCategory,
};
use serde_json::json;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn listing(cards: serde_json::Value) -> serde_json::Value {
    let count = cards.as_array().map_or(0, Vec::len);
    json!({"data": cards, "page": 1, "pageSize": 15, "count": count, "totalCount": count})
}

fn charizard() -> serde_json::Value {
    json!({
        "id": "base1-4",
        "name": "Charizard",
        "images": {"small": "https://images.pokemontcg.io/base1/4.png", "large": "https://images.pokemontcg.io/base1/4_hires.png"},
        "nationalPokedexNumbers": [6],
        "types": ["Fire"],
        "hp": "120",
        "rarity": "Rare Holo",
        "set": {"name": "Base", "series": "Base"}
    })
}

fn client(server: &MockServer) -> CatalogClient {
    CatalogClient::new(CatalogConfig::new(server.uri())).unwrap()
}

#[tokio::test]
async fn search_by_name_sends_catalog_query() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/cards"))
        .and(query_param("q", "name:charizard"))
        .and(query_param("orderBy", "number,name"))
        .and(query_param("pageSize", "15"))
        .and(query_param("page", "1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(listing(json!([charizard()]))))
        .expect(1)
        .mount(&server)
        .await;

    let page = client(&server)
        .search_by_name(Some("charizard"), 15, 1)
        .await
        .unwrap();

    assert_eq!(page.data.len(), 1);
    assert_eq!(page.data[0].id, CardId::new("base1-4"));
    assert_eq!(page.data[0].hp.as_deref(), Some("120"));
}

#[tokio::test]
async fn blank_search_lists_all_pokemon() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/cards"))
        .and(query_param("q", "supertype:pokemon"))
        .respond_with(ResponseTemplate::new(200).set_body_json(listing(json!([]))))
        .expect(1)
        .mount(&server)
        .await;

    let page = client(&server).search_by_name(Some("  "), 15, 1).await.unwrap();
    assert!(page.data.is_empty());
}

#[tokio::test]
async fn multi_word_term_is_quoted_and_encoded_once() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/cards"))
        .and(query_param("q", "name:\"mr mime\""))
        .respond_with(ResponseTemplate::new(200).set_body_json(listing(json!([]))))
        .expect(1)
        .mount(&server)
        .await;

    client(&server)
        .search_by_name(Some("mr mime"), 15, 1)
        .await
        .unwrap();
}

#[tokio::test]
async fn type_and_pokedex_queries_order_by_name() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/cards"))
        .and(query_param("q", "types:Fire"))
        .and(query_param("orderBy", "name"))
        .and(query_param("pageSize", "5"))
        .respond_with(ResponseTemplate::new(200).set_body_json(listing(json!([charizard()]))))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/cards"))
        .and(query_param("q", "nationalPokedexNumbers:6"))
        .and(query_param("orderBy", "name"))
        .respond_with(ResponseTemplate::new(200).set_body_json(listing(json!([charizard()]))))
        .expect(1)
        .mount(&server)
        .await;

    let catalog = client(&server);
    assert_eq!(catalog.fetch_by_type("Fire", 5).await.unwrap().data.len(), 1);
    assert_eq!(catalog.fetch_by_pokedex_number(6).await.unwrap().data.len(), 1);
}

#[tokio::test]
async fn fetch_by_id_unwraps_envelope() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/cards/base1-4"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"data": charizard()})))
        .mount(&server)
        .await;

    let card = client(&server)
        .fetch_by_id(&CardId::new("base1-4"))
        .await
        .unwrap();
    assert_eq!(card.name, "Charizard");
}

#[tokio::test]
async fn any_failed_lookup_is_card_not_found() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/cards/base1-999"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/cards/base1-500"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let catalog = client(&server);
    for (id, status) in [("base1-999", 404), ("base1-500", 500)] {
        let error = catalog.fetch_by_id(&CardId::new(id)).await.unwrap_err();
        assert_eq!(
            error,
            CatalogError::CardNotFound {
                id: id.to_string(),
                status
            }
        );
        assert_eq!(error.category(), ErrorCategory::NotFound);
    }
}

#[tokio::test]
async fn malformed_ids_never_leave_the_cards_path() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/sets/base1"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({"data": {"id": "base1", "name": "Base"}})),
        )
        .mount(&server)
        .await;

    let catalog = client(&server);
    for id in ["../sets/base1", "base1-4/../../sets/base1", "base1-4?q=x", "", "base1-4#x"] {
        let error = catalog.fetch_by_id(&CardId::new(id)).await.unwrap_err();
        assert_eq!(
            error,
            CatalogError::CardNotFound {
                id: id.to_string(),
                status: 404
            }
        );
    }

    assert!(server.received_requests().await.unwrap().is_empty());
}

#[tokio::test]
async fn listing_statuses_are_classified() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/cards"))
        .and(query_param("q", "name:missingno"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/cards"))
        .and(query_param("q", "name:broken"))
        .respond_with(ResponseTemplate::new(502).set_body_string("bad gateway"))
        .mount(&server)
        .await;

    let catalog = client(&server);

    let not_found = catalog.search_by_name(Some("missingno"), 15, 1).await.unwrap_err();
    assert_eq!(not_found.category(), ErrorCategory::NotFound);

    let server_error = catalog.search_by_name(Some("broken"), 15, 1).await.unwrap_err();
    assert_eq!(server_error.category(), ErrorCategory::ServerError);
    assert!(server_error.to_string().contains("bad gateway"));
}

#[tokio::test]
async fn malformed_listing_is_invalid_response() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/cards"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({"data": {}, "page": 1, "pageSize": 15})),
        )
        .mount(&server)
        .await;

    let error = client(&server).search_by_name(None, 15, 1).await.unwrap_err();
    assert!(matches!(error, CatalogError::InvalidResponse(_)));
    assert_eq!(error.category(), ErrorCategory::Unknown);
}

#[tokio::test]
async fn unreachable_catalog_is_network_unavailable() {
    // Port 9 (discard) is closed on test hosts.
    let catalog = CatalogClient::new(CatalogConfig::new("http://127.0.0.1:9")).unwrap();

    let error = catalog.search_by_name(None, 15, 1).await.unwrap_err();
    assert!(matches!(error, CatalogError::Network(_)));
    assert_eq!(error.category(), ErrorCategory::NetworkUnavailable);
}
