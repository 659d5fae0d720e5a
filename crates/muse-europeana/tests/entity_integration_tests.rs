// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights
// reserved. SPDX-License-Identifier: Proprietary

//! Integration tests for the entity endpoints against a mocked backend.

use muse_europeana::{
	EntityType, EuropeanaClient, EuropeanaConfig, EuropeanaError, SuggestRequest,
};
use serde_json::json;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn test_client(server: &MockServer) -> EuropeanaClient {
	EuropeanaClient::new(EuropeanaConfig::new("test-key").with_base_url(server.uri()))
}

#[tokio::test]
async fn test_suggest_maps_entities() {
	let server = MockServer::start().await;
	Mock::given(method("GET"))
		.and(path("/entity/suggest"))
		.and(query_param("text", "leonardo"))
		.and(query_param("TYPE", "agent"))
		.and(query_param("wskey", "test-key"))
		.respond_with(ResponseTemplate::new(200).set_body_json(json!({
			"total": 2,
			"items": [
				{
					"id": "http://data.europeana.eu/agent/base/146741",
					"type": "Agent",
					"prefLabel": {"en": "Leonardo da Vinci"}
				},
				{
					"id": "http://data.europeana.eu/agent/base/207",
					"type": "Agent",
					"prefLabel": {"en": "Leonardo Bruni"},
					"isShownBy": {"thumbnail": "http://example.com/thumb.jpg"}
				}
			]
		})))
		.mount(&server)
		.await;

	let client = test_client(&server);
	let entities = client
		.suggest(
			&SuggestRequest::new("leonardo")
				.with_entity_type(EntityType::Agent),
		)
		.await
		.unwrap();

	assert_eq!(entities.len(), 2);
	assert_eq!(entities[0].preferred_label(), Some("Leonardo da Vinci"));
	assert_eq!(entities[0].entity_type, EntityType::Agent);
	assert_eq!(
		entities[1].is_shown_by.as_deref(),
		Some("http://example.com/thumb.jpg")
	);
}

#[tokio::test]
async fn test_suggest_without_matches_is_empty_not_an_error() {
	let server = MockServer::start().await;
	Mock::given(method("GET"))
		.and(path("/entity/suggest"))
		.respond_with(ResponseTemplate::new(200).set_body_json(json!({"total": 0})))
		.mount(&server)
		.await;

	let client = test_client(&server);
	let entities = client
		.suggest(&SuggestRequest::new("zxqjv"))
		.await
		.unwrap();
	assert!(entities.is_empty());
}

#[tokio::test]
async fn test_suggest_blank_text_fails_before_any_request() {
	let server = MockServer::start().await;
	let client = test_client(&server);

	let result = client.suggest(&SuggestRequest::new("   ")).await;
	assert!(matches!(result, Err(EuropeanaError::Validation(_))));
	assert!(server.received_requests().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_retrieve_entity_parses_details() {
	let server = MockServer::start().await;
	Mock::given(method("GET"))
		.and(path("/entity/place/base/41488.json"))
		.respond_with(ResponseTemplate::new(200).set_body_json(json!({
			"id": "http://data.europeana.eu/place/base/41488",
			"type": "Place",
			"prefLabel": {"fr": "Paris", "en": "Paris"},
			"isPartOf": ["http://data.europeana.eu/place/base/41487"],
			"lat": 48.85341,
			"long": 2.3488
		})))
		.mount(&server)
		.await;

	let client = test_client(&server);
	let details = client
		.retrieve_entity(EntityType::Place, "41488")
		.await
		.unwrap();

	assert_eq!(details.id, "http://data.europeana.eu/place/base/41488");
	assert_eq!(details.entity_type, Some(EntityType::Place));
	assert_eq!(details.preferred_label(), Some("Paris"));
	assert_eq!(details.latitude, Some(48.85341));
	assert_eq!(
		details.is_part_of,
		vec!["http://data.europeana.eu/place/base/41487".to_string()]
	);
}

#[tokio::test]
async fn test_retrieve_entity_not_found() {
	let server = MockServer::start().await;
	Mock::given(method("GET"))
		.and(path("/entity/agent/base/999999.json"))
		.respond_with(ResponseTemplate::new(404).set_body_string("no such entity"))
		.mount(&server)
		.await;

	let client = test_client(&server);
	let result = client.retrieve_entity(EntityType::Agent, "999999").await;
	assert!(matches!(result, Err(EuropeanaError::NotFound { .. })));
}

#[tokio::test]
async fn test_retrieve_entity_rejects_bad_identifier() {
	let server = MockServer::start().await;
	let client = test_client(&server);

	let result = client
		.retrieve_entity(EntityType::Agent, "146741/../../etc")
		.await;
	assert!(matches!(result, Err(EuropeanaError::Validation(_))));
	assert!(server.received_requests().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_resolve_entity_by_external_uri() {
	let server = MockServer::start().await;
	Mock::given(method("GET"))
		.and(path("/entity/resolve"))
		.and(query_param(
			"uri",
			"http://dbpedia.org/resource/Leonardo_da_Vinci",
		))
		.respond_with(ResponseTemplate::new(200).set_body_json(json!({
			"id": "http://data.europeana.eu/agent/base/146741",
			"type": "Agent",
			"prefLabel": {"en": "Leonardo da Vinci"}
		})))
		.mount(&server)
		.await;

	let client = test_client(&server);
	let details = client
		.resolve_entity("http://dbpedia.org/resource/Leonardo_da_Vinci")
		.await
		.unwrap();

	assert_eq!(details.id, "http://data.europeana.eu/agent/base/146741");
	assert_eq!(details.preferred_label(), Some("Leonardo da Vinci"));
}

#[tokio::test]
async fn test_resolve_entity_rejects_non_http_uri() {
	let server = MockServer::start().await;
	let client = test_client(&server);

	let result = client.resolve_entity("urn:isbn:12345").await;
	assert!(matches!(result, Err(EuropeanaError::Validation(_))));
	assert!(server.received_requests().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_resolve_entity_not_found() {
	let server = MockServer::start().await;
	Mock::given(method("GET"))
		.and(path("/entity/resolve"))
		.respond_with(ResponseTemplate::new(404).set_body_string("unknown uri"))
		.mount(&server)
		.await;

	let client = test_client(&server);
	let result = client
		.resolve_entity("http://dbpedia.org/resource/Nobody")
		.await;
	assert!(matches!(result, Err(EuropeanaError::NotFound { .. })));
}
