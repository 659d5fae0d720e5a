// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights
// reserved. SPDX-License-Identifier: Proprietary

//! Search API operations.

use serde::Deserialize;
use serde_json::Value;
use tracing::{debug, instrument, warn};

use crate::client::EuropeanaClient;
use crate::error::{EuropeanaError, Result};
use crate::flatten;
use crate::stream::RecordStream;
use crate::types::{Facet, FacetField, Record, SearchPage, SearchRequest};

const SEARCH_PATH: &str = "record/v2/search.json";

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SearchApiResponse {
	success: Option<bool>,
	#[serde(default)]
	items_count: u64,
	#[serde(default)]
	total_results: u64,
	next_cursor: Option<String>,
	#[serde(default)]
	items: Vec<Value>,
	#[serde(default)]
	facets: Vec<ApiFacet>,
	error: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ApiFacet {
	name: String,
	#[serde(default)]
	fields: Vec<ApiFacetField>,
}

#[derive(Debug, Deserialize)]
struct ApiFacetField {
	label: String,
	#[serde(default)]
	count: u64,
}

impl EuropeanaClient {
	/// Runs one search query and returns a single page of results.
	///
	/// The page's `next_cursor` can be fed back through
	/// [`SearchRequest::with_cursor`] to fetch the following page, or use
	/// [`EuropeanaClient::search_all`] to walk the whole result set.
	#[instrument(skip(self, request), fields(rows = ?request.rows, cursor = ?request.cursor))]
	pub async fn search(&self, request: &SearchRequest) -> Result<SearchPage> {
		request.validate()?;

		let mut url = self.endpoint_url(SEARCH_PATH)?;
		{
			let mut pairs = url.query_pairs_mut();
			for (key, value) in request.to_query_pairs() {
				pairs.append_pair(&key, &value);
			}
		}

		let response: SearchApiResponse = self.get_json(url).await?;
		if response.success == Some(false) {
			let message = response
				.error
				.unwrap_or_else(|| "unspecified error".to_string());
			return Err(EuropeanaError::Decode(format!(
				"search reported failure: {message}"
			)));
		}

		let mut items = Vec::with_capacity(response.items.len());
		for item in &response.items {
			match item.get("id").and_then(Value::as_str) {
				Some(id) if !id.is_empty() => {
					items.push(Record::new(
						id.to_string(),
						flatten::flatten_search_item(item),
					));
				}
				_ => warn!("skipping search item without an id"),
			}
		}

		let facets = response
			.facets
			.into_iter()
			.map(|facet| Facet {
				name: facet.name,
				fields: facet
					.fields
					.into_iter()
					.map(|field| FacetField {
						label: field.label,
						count: field.count,
					})
					.collect(),
			})
			.collect();

		debug!(
			count = items.len(),
			total = response.total_results,
			has_next_cursor = response.next_cursor.is_some(),
			"search completed"
		);

		Ok(SearchPage {
			total_results: response.total_results,
			items_count: response.items_count,
			items,
			next_cursor: response.next_cursor,
			facets,
		})
	}

	/// Walks a result set with cursor pagination, yielding records one at
	/// a time.
	///
	/// The traversal is lazy (nothing is fetched until the stream is
	/// polled), strictly sequential, and finite: it ends when the server
	/// stops returning a cursor or returns an empty page. A failure is
	/// yielded once and ends the stream; it is never retried. Restarting
	/// mid-way is a matter of passing the last observed cursor in the
	/// request.
	pub fn search_all(&self, request: SearchRequest) -> Result<RecordStream> {
		if request.start.is_some() {
			return Err(EuropeanaError::Validation(
				"search_all uses cursor pagination; start is not supported".to_string(),
			));
		}
		request.validate()?;
		Ok(RecordStream::new(self.clone(), request))
	}
}
