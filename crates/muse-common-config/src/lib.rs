// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights
// reserved. SPDX-License-Identifier: Proprietary

//! Common configuration primitives for Muse.
//!
//! This crate provides shared helpers for configuration across all Muse
//! crates, including:
//!
//! - [`Secret<T>`]: A wrapper type that prevents accidental logging of
//!   sensitive values (re-exported from [`muse_common_secret`])
//! - [`load_secret_env`]: Helper for loading secrets from environment
//!   variables with `*_FILE` support

pub mod env;

// Re-export Secret types from muse-common-secret for convenience
pub use muse_common_secret::{Secret, SecretString, REDACTED};

pub use env::{load_secret_env, require_secret_env, RequiredSecretError, SecretEnvError};
