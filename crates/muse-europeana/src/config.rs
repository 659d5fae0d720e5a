// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights
// reserved. SPDX-License-Identifier: Proprietary

//! Configuration for the Europeana client.

use std::time::Duration;

use muse_common_config::require_secret_env;
use muse_common_secret::SecretString;

use crate::error::Result;

/// Environment variable holding the Europeana API key.
///
/// `EUROPEANA_API_KEY_FILE` is also honored, pointing at a file that
/// contains the key.
pub const API_KEY_ENV: &str = "EUROPEANA_API_KEY";

/// Public Europeana API host.
pub const DEFAULT_BASE_URL: &str = "https://api.europeana.eu";

const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Configuration for [`EuropeanaClient`](crate::EuropeanaClient).
///
/// The API key is held as a [`SecretString`] so it never shows up in
/// `Debug` output or tracing events.
#[derive(Debug, Clone)]
pub struct EuropeanaConfig {
	pub api_key: SecretString,
	pub base_url: String,
	pub timeout: Duration,
}

impl EuropeanaConfig {
	/// Creates a config with an explicit API key and default endpoints.
	pub fn new(api_key: impl Into<String>) -> Self {
		Self {
			api_key: SecretString::new(api_key.into()),
			base_url: DEFAULT_BASE_URL.to_string(),
			timeout: DEFAULT_TIMEOUT,
		}
	}

	/// Reads the API key from `EUROPEANA_API_KEY` (or `EUROPEANA_API_KEY_FILE`).
	///
	/// Fails before any network call when the key is absent.
	pub fn from_env() -> Result<Self> {
		let api_key = require_secret_env(API_KEY_ENV)?;
		Ok(Self {
			api_key,
			base_url: DEFAULT_BASE_URL.to_string(),
			timeout: DEFAULT_TIMEOUT,
		})
	}

	/// Sets a custom base URL for the API (useful for testing).
	pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
		self.base_url = base_url.into();
		self
	}

	/// Sets the per-request timeout.
	pub fn with_timeout(mut self, timeout: Duration) -> Self {
		self.timeout = timeout;
		self
	}
}
