// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights
// reserved. SPDX-License-Identifier: Proprietary

//! Error types for the Europeana client.

use thiserror::Error;

/// Errors that can occur when interacting with the Europeana APIs.
#[derive(Debug, Error)]
pub enum EuropeanaError {
	/// Caller input failed validation; no request was made.
	#[error("invalid request: {0}")]
	Validation(String),

	/// Required configuration is missing from the environment.
	#[error(transparent)]
	Config(#[from] muse_common_config::RequiredSecretError),

	/// A base URL or derived endpoint URL could not be parsed.
	#[error("invalid URL: {0}")]
	InvalidUrl(String),

	/// Network-level error during HTTP communication.
	#[error("network error: {0}")]
	Network(#[from] reqwest::Error),

	/// Request timed out.
	#[error("request timed out")]
	Timeout,

	/// API key is missing, invalid, or not authorized for the endpoint.
	#[error("invalid or unauthorized API key")]
	Unauthorized,

	/// Rate limit exceeded. Surfaced as-is; the client never retries.
	#[error("rate limit exceeded")]
	RateLimited,

	/// The requested record or entity does not exist.
	#[error("not found: {id}")]
	NotFound { id: String },

	/// Europeana returned an unexpected error status.
	#[error("Europeana API error ({status}): {message}")]
	Api { status: u16, message: String },

	/// Response body could not be decoded into the expected shape.
	#[error("invalid response from Europeana: {0}")]
	Decode(String),
}

/// Result type alias for Europeana operations.
pub type Result<T> = std::result::Result<T, EuropeanaError>;
