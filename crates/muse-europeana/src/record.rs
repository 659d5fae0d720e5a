// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights
// reserved. SPDX-License-Identifier: Proprietary

//! Record API operations.

use serde::Deserialize;
use serde_json::Value;
use tracing::{debug, instrument};

use crate::client::EuropeanaClient;
use crate::error::{EuropeanaError, Result};
use crate::flatten;
use crate::types::{Record, RecordId};

#[derive(Debug, Deserialize)]
struct RecordApiResponse {
	success: Option<bool>,
	object: Option<Value>,
	error: Option<String>,
}

impl EuropeanaClient {
	/// Fetches one record by id and flattens its metadata.
	///
	/// An id the API does not know yields [`EuropeanaError::NotFound`],
	/// distinct from transport failures.
	#[instrument(skip(self, id), fields(record_id = %id))]
	pub async fn record(&self, id: &RecordId) -> Result<Record> {
		let url = self.endpoint_url(&format!("record/v2{id}.json"))?;

		let response: RecordApiResponse = match self.get_json(url).await {
			Err(EuropeanaError::Api { status: 404, .. }) => {
				return Err(EuropeanaError::NotFound { id: id.to_string() });
			}
			other => other?,
		};

		// The endpoint also reports unknown ids as success=false in a 2xx
		// body, depending on the id shape.
		if response.success == Some(false) {
			debug!(error = ?response.error, "record endpoint reported failure");
			return Err(EuropeanaError::NotFound { id: id.to_string() });
		}

		let object = response
			.object
			.ok_or_else(|| EuropeanaError::Decode("record response has no object".to_string()))?;

		// A payload for a different record than the one requested is a
		// decode failure, never silently returned.
		if let Some(about) = object.get("about").and_then(Value::as_str) {
			if about != id.to_string() {
				return Err(EuropeanaError::Decode(format!(
					"record endpoint returned {about:?} for requested id {id}"
				)));
			}
		}

		let fields = flatten::flatten_record_object(&object);
		debug!(field_count = fields.len(), "record fetched");
		Ok(Record::new(id.to_string(), fields))
	}
}
