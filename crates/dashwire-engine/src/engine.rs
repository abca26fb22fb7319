// SPDX-FileCopyrightText: 2026 Dashwire Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! The widget engine: mount lifecycle, cached rendering, and refresh.
//!
//! Mounting a widget assigns it a generation. Every fetch, cache write, and
//! timer event is tagged with the generation it started under, and results
//! for a generation that is no longer mounted are discarded. This is how
//! unmounts, dashboard switches, and source changes stay race-free without
//! a global lock.

use std::collections::HashSet;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Weak};

use dashmap::DashMap;
use dashmap::mapref::entry::Entry;
use dashwire_core::{
    CatalogEntry, DashboardConfig, DashwireError, FetchedPayload, ToolClient, Viewer,
    WidgetCatalog, WidgetConfig, WidgetDataResponse, WidgetId,
};
use dashwire_render::{RenderOptions, RenderOutcome, Renderer, SortSpec};
use futures::FutureExt;
use futures::future::join_all;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio::time::Instant;
use tracing::{debug, info, warn};

use crate::bus::{Subscription, UpdateBus, UpdateKind, WidgetUpdate};
use crate::cache::{CacheLookup, CacheSnapshot, CacheStatus, ResponseCache};
use crate::inflight::{FetchFuture, FetchOutcome, InFlight};
use crate::permission::resolve_dashboard;
use crate::scheduler::{RefreshScheduler, TriggerEvent};
use crate::settings::EngineSettings;

/// What [`WidgetEngine::mount`] did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MountChange {
    /// The widget was not mounted before.
    Mounted,
    /// The same configuration was already mounted.
    Unchanged,
    /// Presentation or refresh settings changed; cached data is kept.
    Updated,
    /// `dataSource`, `tool`, or `args` changed; cache and timers were reset.
    Remounted,
}

struct MountedWidget {
    config: Arc<WidgetConfig>,
    generation: u64,
}

struct EngineInner {
    client: Arc<dyn ToolClient>,
    settings: EngineSettings,
    renderer: Renderer,
    cache: ResponseCache,
    inflight: InFlight,
    mounted: DashMap<WidgetId, MountedWidget>,
    scheduler: RefreshScheduler,
    bus: UpdateBus,
    next_generation: AtomicU64,
}

/// Owns mounted widgets and everything that keeps them up to date.
///
/// Must be created inside a tokio runtime. A current-thread runtime is
/// enough: the engine never blocks and only suspends on tool client calls.
pub struct WidgetEngine {
    inner: Arc<EngineInner>,
    trigger_loop: JoinHandle<()>,
}

impl WidgetEngine {
    pub fn new(client: Arc<dyn ToolClient>, settings: EngineSettings, bus: UpdateBus) -> Self {
        let (scheduler, triggers) = RefreshScheduler::new();
        let inner = Arc::new(EngineInner {
            client,
            renderer: settings.renderer(),
            settings,
            cache: ResponseCache::new(),
            inflight: InFlight::new(),
            mounted: DashMap::new(),
            scheduler,
            bus,
            next_generation: AtomicU64::new(1),
        });
        let trigger_loop = tokio::spawn(run_triggers(Arc::downgrade(&inner), triggers));

        debug!(
            page_size = inner.settings.page_size,
            locale = %inner.settings.locale,
            fetch_timeout_secs = inner.settings.fetch_timeout.as_secs(),
            "widget engine started"
        );
        Self {
            inner,
            trigger_loop,
        }
    }

    pub fn settings(&self) -> &EngineSettings {
        &self.inner.settings
    }

    /// Mount a widget, or reconcile it with an already mounted one.
    pub fn mount(&self, config: Arc<WidgetConfig>) -> MountChange {
        let id = config.id.clone();
        let (change, generation, rearm) = match self.inner.mounted.entry(id.clone()) {
            Entry::Vacant(entry) => {
                let generation = self.inner.next_generation();
                entry.insert(MountedWidget {
                    config: Arc::clone(&config),
                    generation,
                });
                (MountChange::Mounted, generation, true)
            }
            Entry::Occupied(mut entry) => {
                let current = entry.get();
                if *current.config == *config {
                    return MountChange::Unchanged;
                }

                if current.config.source_key() == config.source_key() {
                    let generation = current.generation;
                    let rearm = current.config.refresh != config.refresh;
                    entry.get_mut().config = Arc::clone(&config);
                    (MountChange::Updated, generation, rearm)
                } else {
                    let generation = self.inner.next_generation();
                    entry.insert(MountedWidget {
                        config: Arc::clone(&config),
                        generation,
                    });
                    (MountChange::Remounted, generation, true)
                }
            }
        };

        if change == MountChange::Remounted {
            self.inner.inflight.forget(&id);
            self.inner.cache.evict(&id);
        }
        if rearm {
            self.inner.arm(&id, generation, &config);
        }

        info!(widget_id = %id, generation, change = ?change, "widget mounted");
        change
    }

    /// Tear a widget down: timers stop, its cache entry goes, and any fetch
    /// still in flight is discarded when it lands.
    pub fn unmount(&self, id: &WidgetId) -> bool {
        let Some((_, widget)) = self.inner.mounted.remove(id) else {
            return false;
        };
        self.inner.scheduler.disarm(id);
        self.inner.inflight.forget(id);
        self.inner.cache.evict(id);

        info!(widget_id = %id, generation = widget.generation, "widget unmounted");
        true
    }

    pub fn is_mounted(&self, id: &WidgetId) -> bool {
        self.inner.mounted.contains_key(id)
    }

    pub fn mounted_ids(&self) -> Vec<WidgetId> {
        self.inner.mounted.iter().map(|m| m.key().clone()).collect()
    }

    pub fn is_timer_armed(&self, id: &WidgetId) -> bool {
        self.inner.scheduler.is_armed(id)
    }

    pub async fn render(&self, id: &WidgetId) -> Result<RenderOutcome, DashwireError> {
        self.render_with(id, &RenderOptions::default()).await
    }

    /// Render with table rows sorted by a sortable column.
    pub async fn render_sorted(
        &self,
        id: &WidgetId,
        sort: SortSpec,
    ) -> Result<RenderOutcome, DashwireError> {
        self.render_with(id, &RenderOptions { sort: Some(sort) })
            .await
    }

    /// Render a mounted widget.
    ///
    /// With nothing cached the call waits for the first fetch. Expired data
    /// is returned immediately, marked stale, while one background fetch
    /// refreshes it.
    pub async fn render_with(
        &self,
        id: &WidgetId,
        options: &RenderOptions,
    ) -> Result<RenderOutcome, DashwireError> {
        let (config, generation) = self
            .inner
            .mounted_config(id)
            .ok_or_else(|| DashwireError::UnknownWidget(id.to_string()))?;

        let (snapshot, stale) = match self.inner.cache.lookup(id, Instant::now()) {
            CacheLookup::Fresh(snapshot) => (snapshot, false),
            CacheLookup::Stale(snapshot) => {
                debug!(widget_id = %id, "serving stale data, revalidating in background");
                let _ = self.inner.start_fetch(id, generation, Arc::clone(&config));
                (snapshot, true)
            }
            CacheLookup::Miss => {
                let outcome = self
                    .inner
                    .start_fetch(id, generation, Arc::clone(&config))
                    .await;
                if outcome == FetchOutcome::Discarded {
                    return Ok(RenderOutcome::Empty);
                }
                match self.inner.cache.lookup(id, Instant::now()) {
                    CacheLookup::Fresh(snapshot) | CacheLookup::Stale(snapshot) => {
                        (snapshot, false)
                    }
                    CacheLookup::Miss => return Ok(RenderOutcome::Empty),
                }
            }
        };

        Ok(self.inner.outcome_for(&config, &snapshot, stale, options))
    }

    /// Fetch now, joining a fetch already in flight.
    pub async fn refresh(&self, id: &WidgetId) -> Result<FetchOutcome, DashwireError> {
        let (config, generation) = self
            .inner
            .mounted_config(id)
            .ok_or_else(|| DashwireError::UnknownWidget(id.to_string()))?;
        Ok(self.inner.start_fetch(id, generation, config).await)
    }

    /// Mount the widgets of `dashboard` visible to `viewer`.
    ///
    /// Widgets mounted for a previous dashboard that are not part of this
    /// one are unmounted. Returns the visible entries in display order,
    /// including disabled ones.
    pub fn mount_dashboard(
        &self,
        dashboard: &DashboardConfig,
        catalog: &WidgetCatalog,
        viewer: &Viewer,
    ) -> Vec<CatalogEntry> {
        let entries = resolve_dashboard(
            dashboard,
            catalog,
            viewer,
            self.inner.settings.include_unpublished,
        );

        let keep: HashSet<&WidgetId> = entries
            .iter()
            .filter_map(|entry| entry.config().map(|config| &config.id))
            .collect();
        let leaving: Vec<WidgetId> = self
            .mounted_ids()
            .into_iter()
            .filter(|id| !keep.contains(id))
            .collect();
        for id in &leaving {
            self.unmount(id);
        }

        for config in entries.iter().filter_map(CatalogEntry::config) {
            self.mount(Arc::clone(config));
        }

        info!(
            dashboard_id = %dashboard.id,
            viewer_id = %viewer.id,
            visible = entries.len(),
            unmounted = leaving.len(),
            "dashboard mounted"
        );
        entries
    }

    /// Mount and render every visible widget of `dashboard` concurrently.
    ///
    /// Outcomes come back in display order. Disabled widgets render as a
    /// configuration error and are never fetched.
    pub async fn render_dashboard(
        &self,
        dashboard: &DashboardConfig,
        catalog: &WidgetCatalog,
        viewer: &Viewer,
    ) -> Vec<(WidgetId, RenderOutcome)> {
        let entries = self.mount_dashboard(dashboard, catalog, viewer);
        let renders = entries.iter().map(|entry| async move {
            let outcome = match entry {
                CatalogEntry::Ready(config) => self
                    .render(&config.id)
                    .await
                    .unwrap_or_else(|e| RenderOutcome::fetch_error(e.to_string())),
                CatalogEntry::Disabled(disabled) => {
                    RenderOutcome::config_error(disabled.reason.clone())
                }
            };
            (entry.id().clone(), outcome)
        });
        join_all(renders).await
    }

    /// Tell the engine whether the host view is visible.
    pub fn set_visible(&self, visible: bool) {
        if self.inner.scheduler.set_visible(visible) {
            info!(visible, "host visibility changed");
        }
    }

    pub fn cache_status(&self, id: &WidgetId) -> Option<CacheStatus> {
        self.inner.cache.status(id, Instant::now())
    }

    pub fn subscribe(&self) -> Subscription {
        self.inner.bus.subscribe()
    }

    /// Unmount everything and stop all timers. Timers cannot be re-armed
    /// afterwards.
    pub fn shutdown(&self) {
        for id in self.mounted_ids() {
            self.unmount(&id);
        }
        self.inner.scheduler.shutdown();
        self.trigger_loop.abort();
        info!("widget engine stopped");
    }
}

impl Drop for WidgetEngine {
    fn drop(&mut self) {
        self.inner.scheduler.shutdown();
        self.trigger_loop.abort();
    }
}

impl EngineInner {
    fn next_generation(&self) -> u64 {
        self.next_generation.fetch_add(1, Ordering::Relaxed)
    }

    fn mounted_config(&self, id: &WidgetId) -> Option<(Arc<WidgetConfig>, u64)> {
        self.mounted
            .get(id)
            .map(|m| (Arc::clone(&m.config), m.generation))
    }

    /// Arm the widget's timer, or disarm it when refresh is off.
    /// A disabled refresh also turns focus refresh off.
    fn arm(&self, id: &WidgetId, generation: u64, config: &WidgetConfig) {
        match config.refresh.as_ref().filter(|r| r.enabled) {
            Some(refresh) => self.scheduler.arm(
                id,
                generation,
                refresh.interval.as_duration(),
                refresh.on_focus,
            ),
            None => {
                self.scheduler.disarm(id);
            }
        }
    }

    /// Start a fetch, or join the one already in flight for this widget.
    ///
    /// The fetch runs on its own task, so it completes even if nobody
    /// awaits the returned future.
    fn start_fetch(
        self: &Arc<Self>,
        id: &WidgetId,
        generation: u64,
        config: Arc<WidgetConfig>,
    ) -> FetchFuture {
        let (fetch, started) = self.inflight.join_or_start(id, generation, || {
            let inner = Arc::clone(self);
            let id = id.clone();
            async move { inner.run_fetch(id, generation, config).await }
                .boxed()
                .shared()
        });

        if started {
            tokio::spawn(fetch.clone());
        } else {
            debug!(widget_id = %id, "joined in-flight fetch");
        }
        fetch
    }

    async fn run_fetch(
        self: Arc<Self>,
        id: WidgetId,
        generation: u64,
        config: Arc<WidgetConfig>,
    ) -> FetchOutcome {
        let key = config.source_key();
        debug!(
            widget_id = %id,
            data_source = %key.data_source,
            tool = %key.tool,
            "fetching widget data"
        );

        let timeout = self.settings.fetch_timeout;
        let invoke = self.client.invoke(key.data_source, key.tool, key.args);
        let result = match tokio::time::timeout(timeout, invoke).await {
            Ok(response) => response.and_then(WidgetDataResponse::into_payload),
            Err(_) => Err(DashwireError::Timeout { duration: timeout }),
        };

        let outcome = self.apply(&id, generation, &config, result);
        self.inflight.finish(&id, generation);
        self.bus.publish(WidgetUpdate {
            widget_id: id,
            kind: update_kind(&outcome),
        });
        outcome
    }

    /// Write a fetch result to the cache if its generation is still mounted.
    fn apply(
        &self,
        id: &WidgetId,
        generation: u64,
        config: &WidgetConfig,
        result: Result<FetchedPayload, DashwireError>,
    ) -> FetchOutcome {
        // Held until the write is done so an unmount cannot slip in between.
        let Some(mounted) = self.mounted.get(id) else {
            debug!(widget_id = %id, generation, "widget unmounted during fetch, discarding result");
            return FetchOutcome::Discarded;
        };
        if mounted.generation != generation {
            debug!(
                widget_id = %id,
                generation,
                mounted_generation = mounted.generation,
                "widget remounted during fetch, discarding result"
            );
            return FetchOutcome::Discarded;
        }

        match result {
            Ok(payload) => {
                let fresh_for = payload
                    .refresh_in
                    .or_else(|| config.refresh_period())
                    .unwrap_or(self.settings.default_stale_after);
                self.cache.store(id, payload, fresh_for, Instant::now());
                debug!(widget_id = %id, fresh_secs = fresh_for.as_secs(), "widget data refreshed");
                FetchOutcome::Refreshed
            }
            Err(e) => {
                let message = e.to_string();
                warn!(widget_id = %id, error = %message, "widget fetch failed");
                self.cache.record_failure(id, message.clone());
                FetchOutcome::Failed(message)
            }
        }
    }

    fn outcome_for(
        &self,
        config: &WidgetConfig,
        snapshot: &CacheSnapshot,
        stale: bool,
        options: &RenderOptions,
    ) -> RenderOutcome {
        if !snapshot.has_payload() {
            let message = snapshot
                .last_error
                .clone()
                .unwrap_or_else(|| "no data received".to_string());
            return RenderOutcome::fetch_error(message);
        }

        self.renderer
            .render_with(config, snapshot.data(), options)
            .with_cache_state(stale, snapshot.last_error.clone())
    }
}

fn update_kind(outcome: &FetchOutcome) -> UpdateKind {
    match outcome {
        FetchOutcome::Refreshed => UpdateKind::Refreshed,
        FetchOutcome::Failed(message) => UpdateKind::Failed {
            message: message.clone(),
        },
        FetchOutcome::Discarded => UpdateKind::Discarded,
    }
}

/// Turn timer events into fetches for widgets that are still mounted.
async fn run_triggers(
    inner: Weak<EngineInner>,
    mut triggers: mpsc::UnboundedReceiver<TriggerEvent>,
) {
    while let Some(event) = triggers.recv().await {
        let Some(inner) = inner.upgrade() else {
            break;
        };
        let Some((config, generation)) = inner.mounted_config(&event.widget_id) else {
            debug!(widget_id = %event.widget_id, "trigger for unmounted widget ignored");
            continue;
        };
        if generation != event.generation {
            debug!(widget_id = %event.widget_id, "trigger from previous mount ignored");
            continue;
        }

        debug!(widget_id = %event.widget_id, trigger = ?event.trigger, "refresh triggered");
        let _ = inner.start_fetch(&event.widget_id, generation, config);
    }
}
