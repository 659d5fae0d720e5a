// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights
// reserved. SPDX-License-Identifier: Proprietary

//! Typed client for the Europeana cultural-heritage REST APIs.
//!
//! This crate wraps three Europeana services behind one client: the Entity
//! API (suggest/retrieve/resolve), the Record API (single-record fetch),
//! and the Search API (faceted search with classic or cursor pagination).
//! Responses are flattened through an explicit mapping table into
//! [`Record`] values, and [`Table`] projects result sets into a rows ×
//! columns shape for analysis.
//!
//! Requests authenticate with an API key sent as the `wskey` query
//! parameter, read from `EUROPEANA_API_KEY` or supplied explicitly. The
//! client never caches and never retries: every failure surfaces
//! immediately as an [`EuropeanaError`].
//!
//! # Example
//!
//! ```ignore
//! use futures::TryStreamExt;
//! use muse_europeana::{EuropeanaClient, SearchRequest, Table};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = EuropeanaClient::from_env()?;
//!
//!     // One page of results.
//!     let page = client
//!         .search(&SearchRequest::new("Paris AND Painting").with_rows(10))
//!         .await?;
//!     println!("{} matches", page.total_results);
//!
//!     // Or walk the whole result set with cursor pagination.
//!     let records: Vec<_> = client
//!         .search_all(SearchRequest::new("Vermeer"))?
//!         .try_collect()
//!         .await?;
//!     let table = Table::from_records(&records);
//!     println!("{} rows × {} columns", table.len(), table.columns().len());
//!
//!     Ok(())
//! }
//! ```

mod client;
mod config;
mod entity;
mod error;
mod flatten;
mod record;
mod search;
mod stream;
mod table;
mod types;

pub use client::EuropeanaClient;
pub use config::{EuropeanaConfig, API_KEY_ENV, DEFAULT_BASE_URL};
pub use error::{EuropeanaError, Result};
pub use flatten::{fields, MAPPING_VERSION};
pub use stream::RecordStream;
pub use table::Table;
pub use types::{
	Entity, EntityDetails, EntityType, Facet, FacetField, FieldValue, Record, RecordId,
	Reusability, SearchPage, SearchRequest, Sort, SortOrder, SuggestRequest, MAX_ROWS,
};
