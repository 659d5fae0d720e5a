// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights
// reserved. SPDX-License-Identifier: Proprietary

//! Entity API operations: suggest, retrieve, resolve.
//!
//! Entity responses are JSON-LD with loosely-typed multilingual fields
//! (`prefLabel` maps, `{"@language", "@value"}` pairs, bare URI lists), so
//! parsing goes through tolerant helpers rather than rigid wire structs.

use std::collections::BTreeMap;

use serde::Deserialize;
use serde_json::Value;
use tracing::{debug, instrument, warn};

use crate::client::EuropeanaClient;
use crate::error::{EuropeanaError, Result};
use crate::types::{Entity, EntityDetails, EntityType, SuggestRequest};

const SUGGEST_PATH: &str = "entity/suggest";
const RESOLVE_PATH: &str = "entity/resolve";

#[derive(Debug, Deserialize)]
struct SuggestApiResponse {
	#[serde(default)]
	total: u64,
	#[serde(default)]
	items: Vec<Value>,
}

impl EuropeanaClient {
	/// Returns entities matching a text query.
	///
	/// No matches yields an empty list, not an error.
	#[instrument(skip(self, request), fields(text = %request.text))]
	pub async fn suggest(&self, request: &SuggestRequest) -> Result<Vec<Entity>> {
		request.validate()?;

		let mut url = self.endpoint_url(SUGGEST_PATH)?;
		{
			let mut pairs = url.query_pairs_mut();
			pairs.append_pair("text", &request.text);
			if let Some(language) = &request.language {
				pairs.append_pair("language", language);
			}
			if let Some(entity_type) = request.entity_type {
				pairs.append_pair("TYPE", entity_type.as_str());
			}
		}

		let response: SuggestApiResponse = self.get_json(url).await?;
		let entities: Vec<Entity> = response
			.items
			.iter()
			.filter_map(parse_suggest_item)
			.collect();

		debug!(
			total = response.total,
			count = entities.len(),
			"suggest completed"
		);
		Ok(entities)
	}

	/// Fetches the full description of one entity by type and identifier.
	#[instrument(skip(self))]
	pub async fn retrieve_entity(
		&self,
		entity_type: EntityType,
		identifier: &str,
	) -> Result<EntityDetails> {
		if identifier.is_empty() || identifier.contains('/') {
			return Err(EuropeanaError::Validation(format!(
				"invalid entity identifier {identifier:?}"
			)));
		}

		let path = format!("entity/{}/base/{identifier}.json", entity_type.as_str());
		let url = self.endpoint_url(&path)?;

		let value: Value = match self.get_json(url).await {
			Err(EuropeanaError::Api { status: 404, .. }) => {
				return Err(EuropeanaError::NotFound {
					id: format!("{}/{identifier}", entity_type.as_str()),
				});
			}
			other => other?,
		};
		parse_entity_details(&value)
	}

	/// Finds the entity matching an external URI, when Europeana knows it.
	#[instrument(skip(self))]
	pub async fn resolve_entity(&self, uri: &str) -> Result<EntityDetails> {
		if !uri.starts_with("http://") && !uri.starts_with("https://") {
			return Err(EuropeanaError::Validation(format!(
				"entity uri must be http(s), got {uri:?}"
			)));
		}

		let mut url = self.endpoint_url(RESOLVE_PATH)?;
		url.query_pairs_mut().append_pair("uri", uri);

		let value: Value = match self.get_json(url).await {
			Err(EuropeanaError::Api { status: 404, .. }) => {
				return Err(EuropeanaError::NotFound {
					id: uri.to_string(),
				});
			}
			other => other?,
		};
		parse_entity_details(&value)
	}
}

fn parse_suggest_item(item: &Value) -> Option<Entity> {
	let id = item.get("id")?.as_str()?.to_string();
	let type_name = item.get("type").and_then(Value::as_str).unwrap_or_default();
	let entity_type = match type_name.parse::<EntityType>() {
		Ok(entity_type) => entity_type,
		Err(_) => {
			warn!(id = %id, entity_type = %type_name, "skipping suggestion with unrecognized type");
			return None;
		}
	};

	Some(Entity {
		id,
		entity_type,
		pref_label: language_strings(item.get("prefLabel")),
		is_shown_by: resource_url(item.get("isShownBy")),
	})
}

fn parse_entity_details(value: &Value) -> Result<EntityDetails> {
	let id = value
		.get("id")
		.and_then(Value::as_str)
		.ok_or_else(|| EuropeanaError::Decode("entity response is missing an id".to_string()))?
		.to_string();

	let entity_type = value
		.get("type")
		.and_then(Value::as_str)
		.and_then(|name| name.parse().ok());

	Ok(EntityDetails {
		id,
		entity_type,
		pref_label: language_strings(value.get("prefLabel")),
		alt_label: language_values(value.get("altLabel")),
		note: language_values(value.get("note")),
		biographical_information: tagged_language_values(value.get("biographicalInformation")),
		date_of_birth: first_string(value.get("dateOfBirth")),
		date_of_death: first_string(value.get("dateOfDeath")),
		place_of_birth: string_list(value.get("placeOfBirth")),
		place_of_death: string_list(value.get("placeOfDeath")),
		is_part_of: string_list(value.get("isPartOf")),
		related: string_list(value.get("related")),
		same_as: string_list(value.get("sameAs")),
		latitude: coordinate(value.get("lat")),
		longitude: coordinate(value.get("long")),
		depiction: resource_url(value.get("depiction"))
			.or_else(|| resource_url(value.get("isShownBy"))),
	})
}

/// `{"en": "Leonardo", ...}` or `{"en": ["Leonardo"], ...}` → language map
/// with one value per language. A bare string lands under `def`.
fn language_strings(value: Option<&Value>) -> BTreeMap<String, String> {
	let mut out = BTreeMap::new();
	match value {
		Some(Value::Object(map)) => {
			for (language, nested) in map {
				if let Some(text) = first_string(Some(nested)) {
					out.insert(language.clone(), text);
				}
			}
		}
		Some(Value::String(text)) if !text.is_empty() => {
			out.insert("def".to_string(), text.clone());
		}
		_ => {}
	}
	out
}

/// `{"en": ["a", "b"], ...}` → language map keeping every value.
fn language_values(value: Option<&Value>) -> BTreeMap<String, Vec<String>> {
	let mut out = BTreeMap::new();
	if let Some(Value::Object(map)) = value {
		for (language, nested) in map {
			let values = string_list(Some(nested));
			if !values.is_empty() {
				out.insert(language.clone(), values);
			}
		}
	}
	out
}

/// `[{"@language": "en", "@value": "..."}]` → language map; falls back to
/// the plain language-map shape.
fn tagged_language_values(value: Option<&Value>) -> BTreeMap<String, Vec<String>> {
	let mut out: BTreeMap<String, Vec<String>> = BTreeMap::new();
	match value {
		Some(Value::Array(items)) => {
			for item in items {
				let language = item
					.get("@language")
					.and_then(Value::as_str)
					.unwrap_or("def");
				if let Some(text) = item.get("@value").and_then(Value::as_str) {
					out
						.entry(language.to_string())
						.or_default()
						.push(text.to_string());
				}
			}
		}
		other => return language_values(other),
	}
	out
}

/// Any of bare string, `["..."]`, or `[{"@id": "..."}]` → flat string list.
fn string_list(value: Option<&Value>) -> Vec<String> {
	let mut out = Vec::new();
	match value {
		Some(Value::String(text)) if !text.is_empty() => out.push(text.clone()),
		Some(Value::Array(items)) => {
			for item in items {
				match item {
					Value::String(text) if !text.is_empty() => out.push(text.clone()),
					Value::Object(map) => {
						out.extend(
							map
								.values()
								.filter_map(Value::as_str)
								.filter(|text| !text.is_empty())
								.map(str::to_string),
						);
					}
					_ => {}
				}
			}
		}
		_ => {}
	}
	out
}

fn first_string(value: Option<&Value>) -> Option<String> {
	match value {
		Some(Value::String(text)) if !text.is_empty() => Some(text.clone()),
		Some(Value::Array(items)) => items
			.iter()
			.find_map(Value::as_str)
			.filter(|text| !text.is_empty())
			.map(str::to_string),
		_ => None,
	}
}

/// `isShownBy`/`depiction` come as a bare URL or a resource object.
fn resource_url(value: Option<&Value>) -> Option<String> {
	match value {
		Some(Value::String(url)) if !url.is_empty() => Some(url.clone()),
		Some(Value::Object(map)) => ["thumbnail", "id", "@id", "source"]
			.iter()
			.find_map(|key| map.get(*key).and_then(Value::as_str))
			.map(str::to_string),
		_ => None,
	}
}

fn coordinate(value: Option<&Value>) -> Option<f64> {
	match value {
		Some(Value::Number(number)) => number.as_f64(),
		Some(Value::String(text)) => text.parse().ok(),
		_ => None,
	}
}
