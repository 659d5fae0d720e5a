// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights
// reserved. SPDX-License-Identifier: Proprietary

//! Public data model and request types for the Europeana client.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use crate::error::{EuropeanaError, Result};
use crate::flatten;

/// Identifier of a Europeana record: a dataset id plus a local id,
/// canonically rendered as `/dataset/local`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RecordId {
	dataset: String,
	local: String,
}

impl RecordId {
	/// Builds a record id from its two components.
	pub fn new(dataset: impl Into<String>, local: impl Into<String>) -> Result<Self> {
		let dataset = dataset.into();
		let local = local.into();
		if dataset.is_empty() || local.is_empty() {
			return Err(EuropeanaError::Validation(
				"record id components must not be empty".to_string(),
			));
		}
		if dataset.contains('/') || local.contains('/') {
			return Err(EuropeanaError::Validation(
				"record id components must not contain '/'".to_string(),
			));
		}
		Ok(Self { dataset, local })
	}

	/// The dataset id (first segment).
	pub fn dataset(&self) -> &str {
		&self.dataset
	}

	/// The local id within the dataset (second segment).
	pub fn local_id(&self) -> &str {
		&self.local
	}
}

impl FromStr for RecordId {
	type Err = EuropeanaError;

	fn from_str(s: &str) -> Result<Self> {
		let rest = s.strip_prefix('/').ok_or_else(|| {
			EuropeanaError::Validation(format!(
				"record id must have the form /dataset/local, got {s:?}"
			))
		})?;
		match rest.split_once('/') {
			Some((dataset, local)) => Self::new(dataset, local).map_err(|_| {
				EuropeanaError::Validation(format!(
					"record id must have the form /dataset/local, got {s:?}"
				))
			}),
			None => Err(EuropeanaError::Validation(format!(
				"record id must have the form /dataset/local, got {s:?}"
			))),
		}
	}
}

impl fmt::Display for RecordId {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "/{}/{}", self.dataset, self.local)
	}
}

/// One flattened metadata field: a single value or an ordered list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldValue {
	One(String),
	Many(Vec<String>),
}

impl FieldValue {
	/// The first value in source order.
	///
	/// Multi-valued fields collapse deterministically to their first value;
	/// use [`FieldValue::iter`] for the full list.
	pub fn first(&self) -> Option<&str> {
		match self {
			FieldValue::One(value) => Some(value),
			FieldValue::Many(values) => values.first().map(String::as_str),
		}
	}

	/// Iterates over every value in source order.
	pub fn iter(&self) -> impl Iterator<Item = &str> {
		match self {
			FieldValue::One(value) => std::slice::from_ref(value).iter(),
			FieldValue::Many(values) => values.iter(),
		}
		.map(String::as_str)
	}

	pub fn len(&self) -> usize {
		match self {
			FieldValue::One(_) => 1,
			FieldValue::Many(values) => values.len(),
		}
	}

	pub fn is_empty(&self) -> bool {
		self.len() == 0
	}
}

impl From<Vec<String>> for FieldValue {
	fn from(mut values: Vec<String>) -> Self {
		if values.len() == 1 {
			FieldValue::One(values.remove(0))
		} else {
			FieldValue::Many(values)
		}
	}
}

/// A single Europeana record, flattened to a field-name → value mapping.
///
/// Immutable once fetched. Field names follow the mapping table in the
/// flattening module (`title`, `description`, `edmPreview`, ...).
#[derive(Debug, Clone, PartialEq)]
pub struct Record {
	id: String,
	fields: BTreeMap<String, FieldValue>,
}

impl Record {
	pub(crate) fn new(id: String, fields: BTreeMap<String, FieldValue>) -> Self {
		Self { id, fields }
	}

	/// The record id in canonical `/dataset/local` form.
	pub fn id(&self) -> &str {
		&self.id
	}

	/// The first value of a field, if present.
	pub fn first(&self, field: &str) -> Option<&str> {
		self.fields.get(field).and_then(FieldValue::first)
	}

	/// Every value of a field, empty when the field is absent.
	pub fn all(&self, field: &str) -> Vec<&str> {
		self
			.fields
			.get(field)
			.map(|value| value.iter().collect())
			.unwrap_or_default()
	}

	/// Iterates over all flattened fields in name order.
	pub fn fields(&self) -> impl Iterator<Item = (&str, &FieldValue)> {
		self.fields.iter().map(|(name, value)| (name.as_str(), value))
	}

	pub fn contains(&self, field: &str) -> bool {
		self.fields.contains_key(field)
	}

	pub fn title(&self) -> Option<&str> {
		self.first(flatten::fields::TITLE)
	}

	pub fn description(&self) -> Option<&str> {
		self.first(flatten::fields::DESCRIPTION)
	}

	pub fn creator(&self) -> Option<&str> {
		self.first(flatten::fields::CREATOR)
	}

	pub fn record_type(&self) -> Option<&str> {
		self.first(flatten::fields::TYPE)
	}

	pub fn country(&self) -> Option<&str> {
		self.first(flatten::fields::COUNTRY)
	}

	pub fn language(&self) -> Option<&str> {
		self.first(flatten::fields::LANGUAGE)
	}

	pub fn rights(&self) -> Option<&str> {
		self.first(flatten::fields::RIGHTS)
	}

	pub fn provider(&self) -> Option<&str> {
		self.first(flatten::fields::PROVIDER)
	}

	pub fn data_provider(&self) -> Option<&str> {
		self.first(flatten::fields::DATA_PROVIDER)
	}

	/// Thumbnail URL (`edmPreview`).
	pub fn preview(&self) -> Option<&str> {
		self.first(flatten::fields::PREVIEW)
	}

	/// Landing page at the providing institution (`edmIsShownAt`).
	pub fn is_shown_at(&self) -> Option<&str> {
		self.first(flatten::fields::IS_SHOWN_AT)
	}

	/// Direct link to the digital object (`edmIsShownBy`).
	pub fn is_shown_by(&self) -> Option<&str> {
		self.first(flatten::fields::IS_SHOWN_BY)
	}

	pub fn year(&self) -> Option<&str> {
		self.first(flatten::fields::YEAR)
	}
}

/// One categorical breakdown returned alongside search results.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Facet {
	pub name: String,
	pub fields: Vec<FacetField>,
}

/// A single facet bucket.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FacetField {
	pub label: String,
	pub count: u64,
}

/// One page of search results plus pagination metadata.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchPage {
	/// Total matches for the query across all pages.
	pub total_results: u64,
	/// Number of items in this page.
	pub items_count: u64,
	pub items: Vec<Record>,
	/// Opaque token for the next page; absent on the last page.
	pub next_cursor: Option<String>,
	pub facets: Vec<Facet>,
}

/// The kind of named entity the Entity API works with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntityType {
	Agent,
	Place,
	Concept,
	Timespan,
}

impl EntityType {
	/// Wire value used in paths and the `TYPE` query parameter.
	pub fn as_str(&self) -> &'static str {
		match self {
			EntityType::Agent => "agent",
			EntityType::Place => "place",
			EntityType::Concept => "concept",
			EntityType::Timespan => "timespan",
		}
	}
}

impl fmt::Display for EntityType {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.as_str())
	}
}

impl FromStr for EntityType {
	type Err = EuropeanaError;

	fn from_str(s: &str) -> Result<Self> {
		match s.to_ascii_lowercase().as_str() {
			"agent" => Ok(EntityType::Agent),
			"place" => Ok(EntityType::Place),
			"concept" => Ok(EntityType::Concept),
			"timespan" => Ok(EntityType::Timespan),
			_ => Err(EuropeanaError::Validation(format!(
				"unknown entity type {s:?}"
			))),
		}
	}
}

/// A suggestion returned by the Entity API.
#[derive(Debug, Clone, PartialEq)]
pub struct Entity {
	/// Entity URI, e.g. `http://data.europeana.eu/agent/base/146741`.
	pub id: String,
	pub entity_type: EntityType,
	/// Preferred label per language code.
	pub pref_label: BTreeMap<String, String>,
	/// Illustration URL, when the entity has one.
	pub is_shown_by: Option<String>,
}

impl Entity {
	/// The label for a specific language.
	pub fn label(&self, language: &str) -> Option<&str> {
		self.pref_label.get(language).map(String::as_str)
	}

	/// The best label: English first, then the language-neutral `def`
	/// entry, then the first language in code order.
	pub fn preferred_label(&self) -> Option<&str> {
		self
			.label("en")
			.or_else(|| self.label("def"))
			.or_else(|| self.pref_label.values().next().map(String::as_str))
	}
}

/// Full entity description returned by retrieve/resolve.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EntityDetails {
	pub id: String,
	pub entity_type: Option<EntityType>,
	/// Preferred label per language code.
	pub pref_label: BTreeMap<String, String>,
	/// Alternative labels per language code.
	pub alt_label: BTreeMap<String, Vec<String>>,
	/// Multilingual description (`note`).
	pub note: BTreeMap<String, Vec<String>>,
	/// Multilingual biography, populated for agents.
	pub biographical_information: BTreeMap<String, Vec<String>>,
	pub date_of_birth: Option<String>,
	pub date_of_death: Option<String>,
	pub place_of_birth: Vec<String>,
	pub place_of_death: Vec<String>,
	/// Entities this entity belongs to (e.g. a region for a place).
	pub is_part_of: Vec<String>,
	/// Related entity URIs.
	pub related: Vec<String>,
	/// Equivalent URIs in external vocabularies.
	pub same_as: Vec<String>,
	/// Coordinates, populated for places.
	pub latitude: Option<f64>,
	pub longitude: Option<f64>,
	/// Illustration URL, when the entity has one.
	pub depiction: Option<String>,
}

impl EntityDetails {
	/// The best label: English first, then `def`, then code order.
	pub fn preferred_label(&self) -> Option<&str> {
		self
			.pref_label
			.get("en")
			.or_else(|| self.pref_label.get("def"))
			.or_else(|| self.pref_label.values().next())
			.map(String::as_str)
	}

	/// The note text for a language, first value.
	pub fn note_in(&self, language: &str) -> Option<&str> {
		self
			.note
			.get(language)
			.and_then(|values| values.first())
			.map(String::as_str)
	}

	/// The biography text for a language, first value.
	pub fn biography_in(&self, language: &str) -> Option<&str> {
		self
			.biographical_information
			.get(language)
			.and_then(|values| values.first())
			.map(String::as_str)
	}
}

/// Parameters for an entity suggest query.
#[derive(Debug, Clone, Default)]
pub struct SuggestRequest {
	/// Free-text term to match entities against.
	pub text: String,
	/// Language of the query text (e.g. `en`).
	pub language: Option<String>,
	/// Restricts matches to one entity type.
	pub entity_type: Option<EntityType>,
}

impl SuggestRequest {
	pub fn new(text: impl Into<String>) -> Self {
		Self {
			text: text.into(),
			..Default::default()
		}
	}

	pub fn with_language(mut self, language: impl Into<String>) -> Self {
		self.language = Some(language.into());
		self
	}

	pub fn with_entity_type(mut self, entity_type: EntityType) -> Self {
		self.entity_type = Some(entity_type);
		self
	}

	pub(crate) fn validate(&self) -> Result<()> {
		if self.text.trim().is_empty() {
			return Err(EuropeanaError::Validation(
				"suggest text must not be empty".to_string(),
			));
		}
		Ok(())
	}
}

/// Rights-status filter controlling which license categories are returned.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Reusability {
	Open,
	Restricted,
	Permission,
}

impl Reusability {
	pub fn as_str(&self) -> &'static str {
		match self {
			Reusability::Open => "open",
			Reusability::Restricted => "restricted",
			Reusability::Permission => "permission",
		}
	}
}

/// Sort direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortOrder {
	Ascending,
	Descending,
}

impl SortOrder {
	pub fn as_str(&self) -> &'static str {
		match self {
			SortOrder::Ascending => "asc",
			SortOrder::Descending => "desc",
		}
	}
}

/// Result ordering for search queries.
#[derive(Debug, Clone, PartialEq)]
pub enum Sort {
	/// Order by a named field, e.g. `score` or `timestamp_created`.
	Field { field: String, order: SortOrder },
	/// Randomized order; a seed makes the shuffle reproducible.
	Random { seed: Option<u64>, order: SortOrder },
}

impl Sort {
	pub fn ascending(field: impl Into<String>) -> Self {
		Sort::Field {
			field: field.into(),
			order: SortOrder::Ascending,
		}
	}

	pub fn descending(field: impl Into<String>) -> Self {
		Sort::Field {
			field: field.into(),
			order: SortOrder::Descending,
		}
	}

	pub fn random() -> Self {
		Sort::Random {
			seed: None,
			order: SortOrder::Ascending,
		}
	}

	pub fn random_seeded(seed: u64) -> Self {
		Sort::Random {
			seed: Some(seed),
			order: SortOrder::Ascending,
		}
	}

	/// Renders the `sort` query parameter, e.g. `score desc` or
	/// `random_42 asc` (the space reaches the wire URL-encoded).
	pub(crate) fn to_param(&self) -> String {
		match self {
			Sort::Field { field, order } => format!("{} {}", field, order.as_str()),
			Sort::Random { seed: None, order } => format!("random {}", order.as_str()),
			Sort::Random {
				seed: Some(seed),
				order,
			} => format!("random_{} {}", seed, order.as_str()),
		}
	}
}

/// Maximum rows Europeana serves in one page.
pub const MAX_ROWS: u32 = 100;

/// Query parameters recognized by the search endpoint; `extra` carries any
/// filter this crate does not model yet.
const RESERVED_PARAMS: &[&str] = &[
	"wskey",
	"query",
	"qf",
	"reusability",
	"media",
	"thumbnail",
	"landingpage",
	"colourpalette",
	"theme",
	"sort",
	"profile",
	"rows",
	"start",
	"cursor",
	"facet",
];

/// Parameters for a search query.
///
/// Two pagination modes exist and are mutually exclusive: classic
/// (`start` + `rows`, 1-based, `rows` capped at [`MAX_ROWS`]) and
/// cursor-based (`cursor`, for walking beyond the classic window).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SearchRequest {
	/// Free-text query; defaults to `*` (everything) on the wire.
	pub query: Option<String>,
	/// Field queries (`qf`), each sent as its own parameter.
	pub qf: Vec<String>,
	pub reusability: Vec<Reusability>,
	/// Only records with (or without) a direct media link.
	pub media: Option<bool>,
	/// Only records with (or without) a thumbnail.
	pub thumbnail: Option<bool>,
	/// Only records with (or without) a provider landing page.
	pub landing_page: Option<bool>,
	/// Image colour filters, e.g. `#0000FF`.
	pub colour_palette: Vec<String>,
	/// Thematic collection, e.g. `art` or `ww1`.
	pub theme: Option<String>,
	pub sort: Option<Sort>,
	/// Response profile, e.g. `standard` or `rich`.
	pub profile: Option<String>,
	/// Page size, at most [`MAX_ROWS`].
	pub rows: Option<u32>,
	/// 1-based offset for classic pagination.
	pub start: Option<u32>,
	/// Opaque deep-pagination token; `*` starts a traversal.
	pub cursor: Option<String>,
	/// Facet names to compute, comma-joined on the wire.
	pub facets: Vec<String>,
	/// Escape hatch for filters this crate does not model; keys must not
	/// collide with recognized parameters.
	pub extra: BTreeMap<String, Vec<String>>,
}

impl SearchRequest {
	pub fn new(query: impl Into<String>) -> Self {
		Self {
			query: Some(query.into()),
			..Default::default()
		}
	}

	/// Matches everything; useful with filters and facets.
	pub fn all() -> Self {
		Self::default()
	}

	pub fn with_qf(mut self, qf: impl Into<String>) -> Self {
		self.qf.push(qf.into());
		self
	}

	pub fn with_reusability(mut self, reusability: Reusability) -> Self {
		self.reusability.push(reusability);
		self
	}

	pub fn with_media(mut self, media: bool) -> Self {
		self.media = Some(media);
		self
	}

	pub fn with_thumbnail(mut self, thumbnail: bool) -> Self {
		self.thumbnail = Some(thumbnail);
		self
	}

	pub fn with_landing_page(mut self, landing_page: bool) -> Self {
		self.landing_page = Some(landing_page);
		self
	}

	pub fn with_colour_palette(mut self, colour: impl Into<String>) -> Self {
		self.colour_palette.push(colour.into());
		self
	}

	pub fn with_theme(mut self, theme: impl Into<String>) -> Self {
		self.theme = Some(theme.into());
		self
	}

	pub fn with_sort(mut self, sort: Sort) -> Self {
		self.sort = Some(sort);
		self
	}

	pub fn with_profile(mut self, profile: impl Into<String>) -> Self {
		self.profile = Some(profile.into());
		self
	}

	pub fn with_rows(mut self, rows: u32) -> Self {
		self.rows = Some(rows);
		self
	}

	pub fn with_start(mut self, start: u32) -> Self {
		self.start = Some(start);
		self
	}

	pub fn with_cursor(mut self, cursor: impl Into<String>) -> Self {
		self.cursor = Some(cursor.into());
		self
	}

	pub fn with_facet(mut self, facet: impl Into<String>) -> Self {
		self.facets.push(facet.into());
		self
	}

	pub fn with_extra(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
		self.extra.entry(key.into()).or_default().push(value.into());
		self
	}

	/// Validates the request; called before any I/O.
	pub(crate) fn validate(&self) -> Result<()> {
		if let Some(rows) = self.rows {
			if rows > MAX_ROWS {
				return Err(EuropeanaError::Validation(format!(
					"rows must be at most {MAX_ROWS}, got {rows}"
				)));
			}
		}
		if self.start == Some(0) {
			return Err(EuropeanaError::Validation(
				"start is 1-based; use start=1 for the first page".to_string(),
			));
		}
		if self.start.is_some() && self.cursor.is_some() {
			return Err(EuropeanaError::Validation(
				"cursor and start pagination are mutually exclusive".to_string(),
			));
		}
		for key in self.extra.keys() {
			if key.is_empty() {
				return Err(EuropeanaError::Validation(
					"extra parameter names must not be empty".to_string(),
				));
			}
			if RESERVED_PARAMS.contains(&key.as_str()) {
				return Err(EuropeanaError::Validation(format!(
					"extra parameter {key:?} collides with a recognized option"
				)));
			}
		}
		Ok(())
	}

	/// Renders the query-string pairs, excluding the API key.
	pub(crate) fn to_query_pairs(&self) -> Vec<(String, String)> {
		let mut pairs = Vec::new();
		let query = self.query.as_deref().unwrap_or("*");
		pairs.push(("query".to_string(), query.to_string()));

		for qf in &self.qf {
			pairs.push(("qf".to_string(), qf.clone()));
		}
		for reusability in &self.reusability {
			pairs.push(("reusability".to_string(), reusability.as_str().to_string()));
		}
		if let Some(media) = self.media {
			pairs.push(("media".to_string(), media.to_string()));
		}
		if let Some(thumbnail) = self.thumbnail {
			pairs.push(("thumbnail".to_string(), thumbnail.to_string()));
		}
		if let Some(landing_page) = self.landing_page {
			pairs.push(("landingpage".to_string(), landing_page.to_string()));
		}
		for colour in &self.colour_palette {
			pairs.push(("colourpalette".to_string(), colour.clone()));
		}
		if let Some(theme) = &self.theme {
			pairs.push(("theme".to_string(), theme.clone()));
		}
		if let Some(sort) = &self.sort {
			pairs.push(("sort".to_string(), sort.to_param()));
		}
		if let Some(profile) = &self.profile {
			pairs.push(("profile".to_string(), profile.clone()));
		}
		if let Some(rows) = self.rows {
			pairs.push(("rows".to_string(), rows.to_string()));
		}
		if let Some(start) = self.start {
			pairs.push(("start".to_string(), start.to_string()));
		}
		if let Some(cursor) = &self.cursor {
			pairs.push(("cursor".to_string(), cursor.clone()));
		}
		if !self.facets.is_empty() {
			pairs.push(("facet".to_string(), self.facets.join(",")));
		}
		for (key, values) in &self.extra {
			for value in values {
				pairs.push((key.clone(), value.clone()));
			}
		}
		pairs
	}
}
