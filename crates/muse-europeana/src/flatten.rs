// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights
// reserved. SPDX-License-Identifier: Proprietary

//! Flattening of Europeana's nested JSON into flat records.
//!
//! Search items and full record objects both pass through an explicit
//! mapping table (source JSON location → flat field name), so the shape of
//! a [`Record`](crate::Record) is fixed by this module rather than by
//! whatever the live API returns. Bump [`MAPPING_VERSION`] when the table
//! changes.
//!
//! Collision policy: the first value seen for a target field wins, in the
//! order root object, `europeanaAggregation`, `aggregations`, `proxies`
//! (each array walked in document order). Language-aware maps contribute
//! `en` values first, then the language-neutral `def` entry, then the
//! remaining languages in code order.

use std::collections::BTreeMap;

use serde_json::Value;

use crate::types::FieldValue;

/// Version of the flattening mapping table.
pub const MAPPING_VERSION: u32 = 1;

/// Flat field names produced by the mapping table.
pub mod fields {
	pub const TITLE: &str = "title";
	pub const DESCRIPTION: &str = "description";
	pub const CREATOR: &str = "creator";
	pub const CONTRIBUTOR: &str = "contributor";
	pub const SUBJECT: &str = "subject";
	pub const DATE: &str = "date";
	pub const IDENTIFIER: &str = "identifier";
	pub const PUBLISHER: &str = "publisher";
	pub const FORMAT: &str = "format";
	pub const TYPE: &str = "type";
	pub const COUNTRY: &str = "country";
	pub const LANGUAGE: &str = "language";
	pub const YEAR: &str = "year";
	pub const PROVIDER: &str = "provider";
	pub const DATA_PROVIDER: &str = "dataProvider";
	pub const RIGHTS: &str = "rights";
	pub const PREVIEW: &str = "edmPreview";
	pub const IS_SHOWN_AT: &str = "edmIsShownAt";
	pub const IS_SHOWN_BY: &str = "edmIsShownBy";
}

/// The declared flat schema, in column order for tabular output.
pub(crate) const TARGET_FIELDS: &[&str] = &[
	fields::TITLE,
	fields::DESCRIPTION,
	fields::CREATOR,
	fields::CONTRIBUTOR,
	fields::SUBJECT,
	fields::DATE,
	fields::IDENTIFIER,
	fields::PUBLISHER,
	fields::FORMAT,
	fields::TYPE,
	fields::COUNTRY,
	fields::LANGUAGE,
	fields::YEAR,
	fields::PROVIDER,
	fields::DATA_PROVIDER,
	fields::RIGHTS,
	fields::PREVIEW,
	fields::IS_SHOWN_AT,
	fields::IS_SHOWN_BY,
];

struct FieldMapping {
	source: &'static str,
	target: &'static str,
}

const fn map(source: &'static str, target: &'static str) -> FieldMapping {
	FieldMapping { source, target }
}

/// Search items arrive near-flat; the table selects and renames.
const SEARCH_ITEM_MAPPINGS: &[FieldMapping] = &[
	map("title", fields::TITLE),
	map("dcDescription", fields::DESCRIPTION),
	map("dcCreator", fields::CREATOR),
	map("dcContributor", fields::CONTRIBUTOR),
	map("type", fields::TYPE),
	map("country", fields::COUNTRY),
	map("language", fields::LANGUAGE),
	map("year", fields::YEAR),
	map("provider", fields::PROVIDER),
	map("dataProvider", fields::DATA_PROVIDER),
	map("rights", fields::RIGHTS),
	map("edmPreview", fields::PREVIEW),
	map("edmIsShownAt", fields::IS_SHOWN_AT),
	map("edmIsShownBy", fields::IS_SHOWN_BY),
];

/// Descriptive metadata carried by each `ore:Proxy`.
const PROXY_MAPPINGS: &[FieldMapping] = &[
	map("dcTitle", fields::TITLE),
	map("dcDescription", fields::DESCRIPTION),
	map("dcCreator", fields::CREATOR),
	map("dcContributor", fields::CONTRIBUTOR),
	map("dcSubject", fields::SUBJECT),
	map("dcDate", fields::DATE),
	map("dcIdentifier", fields::IDENTIFIER),
	map("dcPublisher", fields::PUBLISHER),
	map("dcFormat", fields::FORMAT),
	map("dcLanguage", fields::LANGUAGE),
];

/// Web resources and provenance carried by each `ore:Aggregation`.
const AGGREGATION_MAPPINGS: &[FieldMapping] = &[
	map("edmIsShownAt", fields::IS_SHOWN_AT),
	map("edmIsShownBy", fields::IS_SHOWN_BY),
	map("edmProvider", fields::PROVIDER),
	map("edmDataProvider", fields::DATA_PROVIDER),
	map("edmRights", fields::RIGHTS),
];

const EUROPEANA_AGGREGATION_MAPPINGS: &[FieldMapping] = &[
	map("edmPreview", fields::PREVIEW),
	map("edmCountry", fields::COUNTRY),
	map("edmLanguage", fields::LANGUAGE),
];

const ROOT_MAPPINGS: &[FieldMapping] = &[map("type", fields::TYPE)];

/// Flattens one item of a search response.
pub(crate) fn flatten_search_item(item: &Value) -> BTreeMap<String, FieldValue> {
	let mut out = BTreeMap::new();
	apply_mappings(&mut out, item, SEARCH_ITEM_MAPPINGS);
	out
}

/// Flattens the `object` of a record response.
pub(crate) fn flatten_record_object(object: &Value) -> BTreeMap<String, FieldValue> {
	let mut out = BTreeMap::new();

	apply_mappings(&mut out, object, ROOT_MAPPINGS);

	if let Some(aggregation) = object.get("europeanaAggregation") {
		apply_mappings(&mut out, aggregation, EUROPEANA_AGGREGATION_MAPPINGS);
	}

	if let Some(Value::Array(aggregations)) = object.get("aggregations") {
		for aggregation in aggregations {
			apply_mappings(&mut out, aggregation, AGGREGATION_MAPPINGS);
		}
	}

	if let Some(Value::Array(proxies)) = object.get("proxies") {
		for proxy in proxies {
			apply_mappings(&mut out, proxy, PROXY_MAPPINGS);
		}
	}

	out
}

fn apply_mappings(
	out: &mut BTreeMap<String, FieldValue>,
	source: &Value,
	mappings: &[FieldMapping],
) {
	for mapping in mappings {
		if out.contains_key(mapping.target) {
			continue;
		}
		let values = json_values(source.get(mapping.source));
		if !values.is_empty() {
			out.insert(mapping.target.to_string(), FieldValue::from(values));
		}
	}
}

/// Collects the string values of an arbitrary JSON subtree: scalars as-is,
/// arrays element-wise, objects as language-aware maps.
fn json_values(value: Option<&Value>) -> Vec<String> {
	let mut out = Vec::new();
	if let Some(value) = value {
		collect_values(value, &mut out);
	}
	out
}

fn collect_values(value: &Value, out: &mut Vec<String>) {
	match value {
		Value::String(s) => {
			if !s.is_empty() {
				out.push(s.clone());
			}
		}
		Value::Number(n) => out.push(n.to_string()),
		Value::Bool(b) => out.push(b.to_string()),
		Value::Array(items) => {
			for item in items {
				collect_values(item, out);
			}
		}
		Value::Object(map) => {
			let mut seen = Vec::new();
			let push_language = |key: &str, out: &mut Vec<String>, seen: &mut Vec<String>| {
				if let Some(nested) = map.get(key) {
					let mut values = Vec::new();
					collect_values(nested, &mut values);
					for v in values {
						if !seen.contains(&v) {
							seen.push(v.clone());
							out.push(v);
						}
					}
				}
			};
			push_language("en", out, &mut seen);
			push_language("def", out, &mut seen);
			for key in map.keys() {
				if key != "en" && key != "def" {
					push_language(key, out, &mut seen);
				}
			}
		}
		Value::Null => {}
	}
}
