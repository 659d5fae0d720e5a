// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights
// reserved. SPDX-License-Identifier: Proprietary

//! Secret loading from environment variables.
//!
//! Secrets can be supplied directly (`NAME=value`) or indirectly through a
//! file (`NAME_FILE=/run/secrets/name`), the convention used by container
//! orchestrators. Setting both forms for the same name is rejected rather
//! than silently picking one.

use std::env::{self, VarError};
use std::fs;

use muse_common_secret::SecretString;
use thiserror::Error;
use tracing::debug;

/// Errors while reading a secret from the environment.
#[derive(Debug, Error)]
pub enum SecretEnvError {
	/// The variable exists but is not valid unicode.
	#[error("environment variable {name} is not valid unicode")]
	NotUnicode { name: String },

	/// Both `NAME` and `NAME_FILE` are set.
	#[error("both {name} and {name}_FILE are set; supply exactly one")]
	Conflicting { name: String },

	/// The file referenced by `NAME_FILE` could not be read.
	#[error("failed to read {path} referenced by {name}_FILE: {source}")]
	FileRead {
		name: String,
		path: String,
		#[source]
		source: std::io::Error,
	},
}

/// Errors for secrets that must be present.
#[derive(Debug, Error)]
pub enum RequiredSecretError {
	/// Neither `NAME` nor `NAME_FILE` is set.
	#[error("required environment variable {name} (or {name}_FILE) is not set")]
	Missing { name: String },

	#[error(transparent)]
	Env(#[from] SecretEnvError),
}

/// Loads an optional secret from `name` or `name_FILE`.
///
/// File contents have trailing newlines stripped, so `NAME_FILE` pointing
/// at a file written with `echo` behaves the same as `NAME=value`.
pub fn load_secret_env(name: &str) -> Result<Option<SecretString>, SecretEnvError> {
	let direct = read_var(name)?;

	let file_var = format!("{name}_FILE");
	let file_path = read_var(&file_var)?;

	match (direct, file_path) {
		(Some(_), Some(_)) => Err(SecretEnvError::Conflicting {
			name: name.to_string(),
		}),
		(Some(value), None) => {
			debug!(variable = name, "loaded secret from environment");
			Ok(Some(SecretString::new(value)))
		}
		(None, Some(path)) => {
			let contents = fs::read_to_string(&path).map_err(|source| SecretEnvError::FileRead {
				name: name.to_string(),
				path: path.clone(),
				source,
			})?;
			debug!(variable = name, path = %path, "loaded secret from file");
			Ok(Some(SecretString::new(
				contents.trim_end_matches(['\r', '\n']).to_string(),
			)))
		}
		(None, None) => Ok(None),
	}
}

/// Loads a secret that must be present in the environment.
pub fn require_secret_env(name: &str) -> Result<SecretString, RequiredSecretError> {
	load_secret_env(name)?.ok_or_else(|| RequiredSecretError::Missing {
		name: name.to_string(),
	})
}

fn read_var(name: &str) -> Result<Option<String>, SecretEnvError> {
	match env::var(name) {
		Ok(value) => Ok(Some(value)),
		Err(VarError::NotPresent) => Ok(None),
		Err(VarError::NotUnicode(_)) => Err(SecretEnvError::NotUnicode {
			name: name.to_string(),
		}),
	}
}
