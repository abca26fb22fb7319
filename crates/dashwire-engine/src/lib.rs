// SPDX-FileCopyrightText: 2026 Dashwire Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Widget runtime for Dashwire.
//!
//! [`WidgetEngine`] mounts widgets, fetches their data through a
//! [`ToolClient`](dashwire_core::ToolClient), caches responses with
//! stale-while-revalidate semantics, and keeps them fresh with per-widget
//! interval and focus timers. Updates are announced on an [`UpdateBus`].

pub mod bus;
pub mod cache;
pub mod engine;
pub mod inflight;
pub mod permission;
pub mod scheduler;
pub mod settings;

pub use bus::{Subscription, UpdateBus, UpdateKind, WidgetUpdate};
pub use cache::{CacheLookup, CacheSnapshot, CacheStatus, ResponseCache};
pub use engine::{MountChange, WidgetEngine};
pub use inflight::FetchOutcome;
pub use permission::{is_visible, resolve_dashboard};
pub use scheduler::{RefreshScheduler, RefreshTrigger, TriggerEvent};
pub use settings::EngineSettings;
