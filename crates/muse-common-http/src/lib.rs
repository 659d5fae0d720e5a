// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights
// reserved. SPDX-License-Identifier: Proprietary

//! Shared HTTP client construction for Muse crates.
//!
//! Every outbound client in the workspace is built through this crate so
//! requests carry a consistent `muse/{version}` User-Agent.

mod client;

pub use client::{builder, new_client, new_client_with_timeout, user_agent};
