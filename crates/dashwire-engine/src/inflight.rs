// SPDX-FileCopyrightText: 2026 Dashwire Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! At most one fetch in flight per widget.
//!
//! A trigger that arrives while a fetch is pending joins it instead of
//! queueing behind it, and every joiner sees the same outcome.

use dashmap::DashMap;
use dashmap::mapref::entry::Entry;
use dashwire_core::WidgetId;
use futures::future::{BoxFuture, Shared};
use tracing::debug;

/// How a fetch settled.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchOutcome {
    /// New data is in the cache.
    Refreshed,
    /// The fetch failed; earlier data, if any, is still cached.
    Failed(String),
    /// The widget was unmounted or remounted while the fetch ran.
    Discarded,
}

pub type FetchFuture = Shared<BoxFuture<'static, FetchOutcome>>;

#[derive(Default)]
pub struct InFlight {
    fetches: DashMap<WidgetId, (u64, FetchFuture)>,
}

impl InFlight {
    pub fn new() -> Self {
        Self::default()
    }

    /// Join the pending fetch for `id` at `generation`, or register the one
    /// `start` builds. Returns the future and whether it was newly started.
    ///
    /// A pending fetch from an older generation is replaced.
    pub fn join_or_start(
        &self,
        id: &WidgetId,
        generation: u64,
        start: impl FnOnce() -> FetchFuture,
    ) -> (FetchFuture, bool) {
        match self.fetches.entry(id.clone()) {
            Entry::Occupied(entry) if entry.get().0 == generation => (entry.get().1.clone(), false),
            Entry::Occupied(mut entry) => {
                let fetch = start();
                let (replaced_generation, _replaced) = entry.insert((generation, fetch.clone()));
                debug!(
                    widget_id = %id,
                    replaced_generation,
                    generation,
                    "replacing pending fetch from an older generation"
                );
                (fetch, true)
            }
            Entry::Vacant(entry) => {
                let fetch = start();
                entry.insert((generation, fetch.clone()));
                (fetch, true)
            }
        }
    }

    /// Forget the fetch for `id` if it still belongs to `generation`.
    pub fn finish(&self, id: &WidgetId, generation: u64) {
        self.fetches.remove_if(id, |_, (g, _)| *g == generation);
    }

    /// Forget any fetch for `id`. Its result will be discarded on arrival.
    pub fn forget(&self, id: &WidgetId) -> bool {
        self.fetches.remove(id).is_some()
    }

    pub fn is_pending(&self, id: &WidgetId) -> bool {
        self.fetches.contains_key(id)
    }

    pub fn len(&self) -> usize {
        self.fetches.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fetches.is_empty()
    }
}
