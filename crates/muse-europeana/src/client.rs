// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights
// reserved. SPDX-License-Identifier: Proprietary

//! Europeana client and shared HTTP transport.

use reqwest::{Client, StatusCode};
use serde::de::DeserializeOwned;
use tracing::{debug, error, trace};
use url::Url;

use crate::config::EuropeanaConfig;
use crate::error::{EuropeanaError, Result};

/// Client for the Europeana REST APIs.
///
/// Cheap to clone; clones share one connection pool. Every operation is a
/// sequence of round trips awaited by the caller; nothing is cached or
/// retried, and a failed request surfaces immediately.
#[derive(Debug, Clone)]
pub struct EuropeanaClient {
	http_client: Client,
	config: EuropeanaConfig,
}

impl EuropeanaClient {
	/// Creates a client from an explicit configuration.
	pub fn new(config: EuropeanaConfig) -> Self {
		let http_client = muse_common_http::builder()
			.timeout(config.timeout)
			.build()
			.expect("failed to build HTTP client");

		Self {
			http_client,
			config,
		}
	}

	/// Creates a client with the API key read from `EUROPEANA_API_KEY`.
	pub fn from_env() -> Result<Self> {
		Ok(Self::new(EuropeanaConfig::from_env()?))
	}

	/// Points the client at a different host (useful for testing).
	pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
		self.config.base_url = base_url.into();
		self
	}

	/// Builds an endpoint URL under the configured base with the API key
	/// attached as the `wskey` query parameter.
	pub(crate) fn endpoint_url(&self, path: &str) -> Result<Url> {
		let mut base = self.config.base_url.clone();
		if !base.ends_with('/') {
			base.push('/');
		}
		let mut url = Url::parse(&base)
			.and_then(|base| base.join(path))
			.map_err(|e| EuropeanaError::InvalidUrl(format!("{}: {e}", self.config.base_url)))?;

		url
			.query_pairs_mut()
			.append_pair("wskey", self.config.api_key.expose());
		Ok(url)
	}

	/// Issues one GET request and decodes the JSON response.
	///
	/// Requests are logged by path only; the query string carries the key.
	pub(crate) async fn get_json<T: DeserializeOwned>(&self, url: Url) -> Result<T> {
		let path = url.path().to_string();
		debug!(path = %path, "sending request to Europeana");

		let response = self.http_client.get(url).send().await.map_err(|e| {
			if e.is_timeout() {
				error!(path = %path, "request timed out");
				return EuropeanaError::Timeout;
			}
			error!(path = %path, error = %e, "network error during Europeana request");
			EuropeanaError::Network(e)
		})?;

		let status = response.status();
		debug!(path = %path, status = %status, "received response from Europeana");

		if !status.is_success() {
			let status_code = status.as_u16();
			let body = response.text().await.unwrap_or_default();

			return Err(match status {
				StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => {
					error!(path = %path, status = status_code, "unauthorized request");
					EuropeanaError::Unauthorized
				}
				StatusCode::TOO_MANY_REQUESTS => {
					error!(path = %path, status = status_code, "rate limit exceeded");
					EuropeanaError::RateLimited
				}
				_ => {
					error!(path = %path, status = status_code, body = %body, "Europeana API error");
					EuropeanaError::Api {
						status: status_code,
						message: body,
					}
				}
			});
		}

		let body = response.text().await.map_err(|e| {
			error!(path = %path, error = %e, "failed to read response body");
			EuropeanaError::Network(e)
		})?;
		trace!(path = %path, body = %body, "response body");

		serde_json::from_str(&body).map_err(|e| {
			error!(path = %path, error = %e, "failed to parse Europeana response");
			EuropeanaError::Decode(format!("JSON parse error: {e}"))
		})
	}
}
