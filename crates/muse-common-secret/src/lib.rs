// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights
// reserved. SPDX-License-Identifier: Proprietary

//! Secret wrapper type for Muse.
//!
//! [`Secret<T>`] holds a sensitive value (API key, token) and keeps it out
//! of `Debug`/`Display` output. The wrapped value is zeroized when the
//! secret is dropped. Access to the inner value is explicit via
//! [`Secret::expose`], so every place a secret crosses a boundary is
//! visible at the call site.

use std::fmt;

use zeroize::Zeroize;

/// Placeholder emitted wherever a secret would otherwise be printed.
pub const REDACTED: &str = "[REDACTED]";

/// A sensitive value that is redacted in `Debug`/`Display` output and
/// zeroized on drop.
pub struct Secret<T: Zeroize>(T);

/// A secret `String`, the common case for API keys and tokens.
pub type SecretString = Secret<String>;

impl<T: Zeroize> Secret<T> {
	/// Wraps a sensitive value.
	pub fn new(value: T) -> Self {
		Self(value)
	}

	/// Grants access to the underlying value.
	///
	/// Keep the exposure local to the call site; never store or log the
	/// returned reference's contents.
	pub fn expose(&self) -> &T {
		&self.0
	}
}

impl<T: Zeroize> Drop for Secret<T> {
	fn drop(&mut self) {
		self.0.zeroize();
	}
}

impl<T: Zeroize + Clone> Clone for Secret<T> {
	fn clone(&self) -> Self {
		Self(self.0.clone())
	}
}

impl<T: Zeroize> fmt::Debug for Secret<T> {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(REDACTED)
	}
}

impl<T: Zeroize> fmt::Display for Secret<T> {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(REDACTED)
	}
}

impl From<String> for SecretString {
	fn from(value: String) -> Self {
		Self::new(value)
	}
}

impl From<&str> for SecretString {
	fn from(value: &str) -> Self {
		Self::new(value.to_string())
	}
}

#[cfg(feature = "serde")]
impl<'de, T> serde::Deserialize<'de> for Secret<T>
where
	T: Zeroize + serde::Deserialize<'de>,
{
	fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
	where
		D: serde::Deserializer<'de>,
	{
		T::deserialize(deserializer).map(Secret::new)
	}
}

// Serialize is deliberately not implemented: a secret must never round-trip
// into logs, config dumps, or wire payloads by accident.

#[cfg(test)]
mod tests {
	use super::*;
	use proptest::prelude::*;

	#[test]
	fn test_expose_returns_inner_value() {
		let secret = SecretString::new("wskey-123".to_string());
		assert_eq!(secret.expose(), "wskey-123");
	}

	#[test]
	fn test_debug_is_redacted() {
		let secret = SecretString::new("wskey-123".to_string());
		assert_eq!(format!("{secret:?}"), REDACTED);
	}

	#[test]
	fn test_display_is_redacted() {
		let secret = SecretString::new("wskey-123".to_string());
		assert_eq!(format!("{secret}"), REDACTED);
	}

	#[test]
	fn test_clone_preserves_value() {
		let secret = SecretString::new("original".to_string());
		let cloned = secret.clone();
		assert_eq!(cloned.expose(), "original");
	}

	#[cfg(feature = "serde")]
	#[test]
	fn test_deserialize_wraps_value() {
		let secret: SecretString = serde_json::from_str("\"from-json\"").unwrap();
		assert_eq!(secret.expose(), "from-json");
	}

	proptest! {
		#[test]
		fn test_debug_never_leaks_contents(value in "[a-z0-9]{8,32}") {
			let secret = SecretString::new(value.clone());
			let printed = format!("{secret:?} {secret}");
			prop_assert!(!printed.contains(&value));
		}
	}
}
