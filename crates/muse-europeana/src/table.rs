// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights
// reserved. SPDX-License-Identifier: Proprietary

//! Tabular projection of flattened records.
//!
//! A pure transform for downstream analysis: no I/O, no mutation of the
//! source records. The column schema is fixed by the flattening mapping
//! table, so two tables built from different result sets always line up.

use crate::flatten;
use crate::types::Record;

/// A rows × columns view over a set of records.
///
/// Columns are `id` followed by the declared flat schema, in mapping-table
/// order. Cells hold the first value of multi-valued fields; a record
/// without a field leaves the cell empty.
#[derive(Debug, Clone, PartialEq)]
pub struct Table {
	columns: Vec<String>,
	rows: Vec<Vec<Option<String>>>,
}

impl Table {
	/// Builds a table from records, one row per record.
	///
	/// An empty input yields zero rows under the full column schema.
	pub fn from_records(records: &[Record]) -> Self {
		let columns: Vec<String> = std::iter::once("id")
			.chain(flatten::TARGET_FIELDS.iter().copied())
			.map(str::to_string)
			.collect();

		let rows = records
			.iter()
			.map(|record| {
				let mut row = Vec::with_capacity(columns.len());
				row.push(Some(record.id().to_string()));
				for field in flatten::TARGET_FIELDS {
					row.push(record.first(field).map(str::to_string));
				}
				row
			})
			.collect();

		Self { columns, rows }
	}

	pub fn columns(&self) -> &[String] {
		&self.columns
	}

	pub fn rows(&self) -> &[Vec<Option<String>>] {
		&self.rows
	}

	/// Number of rows.
	pub fn len(&self) -> usize {
		self.rows.len()
	}

	pub fn is_empty(&self) -> bool {
		self.rows.is_empty()
	}

	/// Position of a named column, if it exists in the schema.
	pub fn column_index(&self, name: &str) -> Option<usize> {
		self.columns.iter().position(|column| column == name)
	}

	/// The cell at a row for a named column.
	pub fn cell(&self, row: usize, column: &str) -> Option<&str> {
		let index = self.column_index(column)?;
		self.rows.get(row)?.get(index)?.as_deref()
	}
}
