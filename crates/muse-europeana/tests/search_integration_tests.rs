// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights
// reserved. SPDX-License-Identifier: Proprietary

//! Integration tests for the search endpoint and cursor pagination,
//! against a mocked Europeana backend.

use std::collections::HashSet;

use futures::StreamExt;
use muse_europeana::{
	EuropeanaClient, EuropeanaConfig, EuropeanaError, Record, SearchRequest,
};
use serde_json::json;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

const SEARCH_PATH: &str = "/record/v2/search.json";

fn test_client(server: &MockServer) -> EuropeanaClient {
	EuropeanaClient::new(EuropeanaConfig::new("test-key").with_base_url(server.uri()))
}

fn item(id: &str, title: &str) -> serde_json::Value {
	json!({
		"id": id,
		"title": [title],
		"type": "IMAGE",
		"dataProvider": ["Rijksmuseum"]
	})
}

fn page(items: Vec<serde_json::Value>, total: u64, next_cursor: Option<&str>) -> serde_json::Value {
	let mut body = json!({
		"success": true,
		"itemsCount": items.len(),
		"totalResults": total,
		"items": items
	});
	if let Some(cursor) = next_cursor {
		body["nextCursor"] = json!(cursor);
	}
	body
}

#[tokio::test]
async fn test_search_maps_items_and_sends_key() {
	let server = MockServer::start().await;
	Mock::given(method("GET"))
		.and(path(SEARCH_PATH))
		.and(query_param("query", "paris"))
		.and(query_param("rows", "10"))
		.and(query_param("wskey", "test-key"))
		.respond_with(ResponseTemplate::new(200).set_body_json(page(
			vec![item("/1/a", "A"), item("/1/b", "B"), item("/1/c", "C")],
			3,
			None,
		)))
		.mount(&server)
		.await;

	let client = test_client(&server);
	let result = client
		.search(&SearchRequest::new("paris").with_rows(10))
		.await
		.unwrap();

	assert_eq!(result.items.len(), 3);
	assert_eq!(result.total_results, 3);
	for record in &result.items {
		assert!(!record.id().is_empty());
	}
	assert_eq!(result.items[0].title(), Some("A"));
}

#[tokio::test]
async fn test_search_page_is_bounded_by_rows() {
	let server = MockServer::start().await;
	Mock::given(method("GET"))
		.and(path(SEARCH_PATH))
		.and(query_param("rows", "2"))
		.respond_with(ResponseTemplate::new(200).set_body_json(page(
			vec![item("/1/a", "A"), item("/1/b", "B")],
			40,
			Some("next"),
		)))
		.mount(&server)
		.await;

	let client = test_client(&server);
	let request = SearchRequest::new("paris").with_rows(2);
	let result = client.search(&request).await.unwrap();

	assert!(result.items.len() <= 2);
	assert_eq!(result.next_cursor.as_deref(), Some("next"));
}

#[tokio::test]
async fn test_search_parses_facets() {
	let server = MockServer::start().await;
	let body = json!({
		"success": true,
		"itemsCount": 0,
		"totalResults": 12,
		"items": [],
		"facets": [{
			"name": "COUNTRY",
			"fields": [
				{"label": "france", "count": 8},
				{"label": "netherlands", "count": 4}
			]
		}]
	});
	Mock::given(method("GET"))
		.and(path(SEARCH_PATH))
		.and(query_param("facet", "COUNTRY,TYPE"))
		.respond_with(ResponseTemplate::new(200).set_body_json(body))
		.mount(&server)
		.await;

	let client = test_client(&server);
	let result = client
		.search(
			&SearchRequest::new("paris")
				.with_facet("COUNTRY")
				.with_facet("TYPE")
				.with_rows(0),
		)
		.await
		.unwrap();

	assert_eq!(result.facets.len(), 1);
	assert_eq!(result.facets[0].name, "COUNTRY");
	assert_eq!(result.facets[0].fields[0].label, "france");
	assert_eq!(result.facets[0].fields[0].count, 8);
}

#[tokio::test]
async fn test_search_unauthorized() {
	let server = MockServer::start().await;
	Mock::given(method("GET"))
		.and(path(SEARCH_PATH))
		.respond_with(ResponseTemplate::new(401).set_body_string("Invalid key"))
		.mount(&server)
		.await;

	let client = test_client(&server);
	let result = client.search(&SearchRequest::new("paris")).await;
	assert!(matches!(result, Err(EuropeanaError::Unauthorized)));
}

#[tokio::test]
async fn test_search_rate_limited() {
	let server = MockServer::start().await;
	Mock::given(method("GET"))
		.and(path(SEARCH_PATH))
		.respond_with(ResponseTemplate::new(429))
		.mount(&server)
		.await;

	let client = test_client(&server);
	let result = client.search(&SearchRequest::new("paris")).await;
	assert!(matches!(result, Err(EuropeanaError::RateLimited)));
}

#[tokio::test]
async fn test_search_server_error_carries_status_and_body() {
	let server = MockServer::start().await;
	Mock::given(method("GET"))
		.and(path(SEARCH_PATH))
		.respond_with(ResponseTemplate::new(503).set_body_string("maintenance window"))
		.mount(&server)
		.await;

	let client = test_client(&server);
	match client.search(&SearchRequest::new("paris")).await {
		Err(EuropeanaError::Api { status, message }) => {
			assert_eq!(status, 503);
			assert_eq!(message, "maintenance window");
		}
		other => panic!("expected Api error, got {other:?}"),
	}
}

#[tokio::test]
async fn test_search_unparsable_body_is_decode_error() {
	let server = MockServer::start().await;
	Mock::given(method("GET"))
		.and(path(SEARCH_PATH))
		.respond_with(ResponseTemplate::new(200).set_body_string("<html>not json</html>"))
		.mount(&server)
		.await;

	let client = test_client(&server);
	let result = client.search(&SearchRequest::new("paris")).await;
	assert!(matches!(result, Err(EuropeanaError::Decode(_))));
}

#[tokio::test]
async fn test_search_validation_fails_before_any_request() {
	let server = MockServer::start().await;
	let client = test_client(&server);

	let result = client
		.search(&SearchRequest::new("paris").with_rows(101))
		.await;
	assert!(matches!(result, Err(EuropeanaError::Validation(_))));

	let result = client
		.search(&SearchRequest::new("paris").with_start(1).with_cursor("*"))
		.await;
	assert!(matches!(result, Err(EuropeanaError::Validation(_))));

	// No mock was mounted, so any request would have failed differently.
	assert!(server.received_requests().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_search_same_cursor_returns_same_page() {
	let server = MockServer::start().await;
	Mock::given(method("GET"))
		.and(path(SEARCH_PATH))
		.and(query_param("cursor", "*"))
		.respond_with(ResponseTemplate::new(200).set_body_json(page(
			vec![item("/1/a", "A"), item("/1/b", "B")],
			2,
			Some("tail"),
		)))
		.mount(&server)
		.await;

	let client = test_client(&server);
	let request = SearchRequest::new("paris").with_cursor("*");
	let first = client.search(&request).await.unwrap();
	let second = client.search(&request).await.unwrap();

	assert_eq!(first, second);
}

#[tokio::test]
async fn test_search_all_traverses_every_page_without_repeats() {
	let server = MockServer::start().await;
	Mock::given(method("GET"))
		.and(path(SEARCH_PATH))
		.and(query_param("cursor", "*"))
		.respond_with(ResponseTemplate::new(200).set_body_json(page(
			vec![item("/1/a", "A"), item("/1/b", "B")],
			3,
			Some("c2"),
		)))
		.mount(&server)
		.await;
	Mock::given(method("GET"))
		.and(path(SEARCH_PATH))
		.and(query_param("cursor", "c2"))
		.respond_with(ResponseTemplate::new(200).set_body_json(page(
			vec![item("/1/c", "C")],
			3,
			Some("c3"),
		)))
		.mount(&server)
		.await;
	Mock::given(method("GET"))
		.and(path(SEARCH_PATH))
		.and(query_param("cursor", "c3"))
		.respond_with(ResponseTemplate::new(200).set_body_json(page(vec![], 3, None)))
		.mount(&server)
		.await;

	let client = test_client(&server);
	let records: Vec<Record> = client
		.search_all(SearchRequest::new("paris").with_rows(2))
		.unwrap()
		.map(|result| result.unwrap())
		.collect()
		.await;

	let ids: Vec<&str> = records.iter().map(Record::id).collect();
	assert_eq!(ids, vec!["/1/a", "/1/b", "/1/c"]);

	let unique: HashSet<&str> = ids.iter().copied().collect();
	assert_eq!(unique.len(), ids.len(), "a record was yielded twice");
}

#[tokio::test]
async fn test_search_all_terminates_without_next_cursor() {
	let server = MockServer::start().await;
	Mock::given(method("GET"))
		.and(path(SEARCH_PATH))
		.respond_with(ResponseTemplate::new(200).set_body_json(page(
			vec![item("/1/a", "A")],
			1,
			None,
		)))
		.mount(&server)
		.await;

	let client = test_client(&server);
	let records: Vec<Record> = client
		.search_all(SearchRequest::new("paris"))
		.unwrap()
		.map(|result| result.unwrap())
		.collect()
		.await;

	assert_eq!(records.len(), 1);
	assert_eq!(server.received_requests().await.unwrap().len(), 1);
}

#[tokio::test]
async fn test_search_all_treats_empty_page_as_end() {
	let server = MockServer::start().await;
	// Pathological backend: keeps returning a cursor with no items.
	Mock::given(method("GET"))
		.and(path(SEARCH_PATH))
		.respond_with(
			ResponseTemplate::new(200).set_body_json(page(vec![], 0, Some("loop-forever"))),
		)
		.mount(&server)
		.await;

	let client = test_client(&server);
	let records: Vec<_> = client
		.search_all(SearchRequest::new("paris"))
		.unwrap()
		.collect()
		.await;

	assert!(records.is_empty());
	assert_eq!(server.received_requests().await.unwrap().len(), 1);
}

#[tokio::test]
async fn test_search_all_surfaces_failure_once_and_ends() {
	let server = MockServer::start().await;
	Mock::given(method("GET"))
		.and(path(SEARCH_PATH))
		.and(query_param("cursor", "*"))
		.respond_with(ResponseTemplate::new(200).set_body_json(page(
			vec![item("/1/a", "A")],
			2,
			Some("boom"),
		)))
		.mount(&server)
		.await;
	Mock::given(method("GET"))
		.and(path(SEARCH_PATH))
		.and(query_param("cursor", "boom"))
		.respond_with(ResponseTemplate::new(500).set_body_string("backend exploded"))
		.mount(&server)
		.await;

	let client = test_client(&server);
	let mut stream = client.search_all(SearchRequest::new("paris")).unwrap();

	let first = stream.next().await.unwrap();
	assert_eq!(first.unwrap().id(), "/1/a");

	let failure = stream.next().await.unwrap();
	assert!(matches!(failure, Err(EuropeanaError::Api { status: 500, .. })));

	// The stream is finished; the failed fetch is not retried.
	assert!(stream.next().await.is_none());
	assert_eq!(server.received_requests().await.unwrap().len(), 2);
}

#[tokio::test]
async fn test_search_all_rejects_classic_pagination() {
	let server = MockServer::start().await;
	let client = test_client(&server);

	let result = client.search_all(SearchRequest::new("paris").with_start(5));
	assert!(matches!(result, Err(EuropeanaError::Validation(_))));
}
