// SPDX-FileCopyrightText: 2026 Dashwire Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Test utilities for Dashwire integration tests.
//!
//! Provides a scripted tool client and widget config builders for fast,
//! deterministic tests without external data sources.
//!
//! # Components
//!
//! - [`MockToolClient`] - scripted responses, call recording, and a gate that
//!   holds fetches in flight
//! - [`fixtures`] - widget, dashboard, and viewer builders

pub mod fixtures;
pub mod mock_tool;

pub use mock_tool::{MockCall, MockToolClient};
