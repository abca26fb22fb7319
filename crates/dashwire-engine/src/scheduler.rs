// SPDX-FileCopyrightText: 2026 Dashwire Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Refresh timers with an explicit arm/disarm lifecycle.
//!
//! Every armed widget owns one timer task, cancelled through its own
//! [`CancellationToken`]. Timers never fetch: they send a [`TriggerEvent`]
//! down a channel and the engine decides what to do with it. Events carry
//! the mount generation they were armed for, so the engine can drop events
//! that outlived a remount.

use std::time::Duration;

use dashmap::DashMap;
use dashwire_core::WidgetId;
use tokio::sync::{mpsc, watch};
use tokio::task::JoinHandle;
use tokio::time::{Instant, MissedTickBehavior};
use tokio_util::sync::CancellationToken;
use tracing::{debug, trace};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RefreshTrigger {
    /// The periodic interval elapsed.
    Interval,
    /// The host view went from hidden to visible.
    Focus,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TriggerEvent {
    pub widget_id: WidgetId,
    pub generation: u64,
    pub trigger: RefreshTrigger,
}

struct ArmedTimer {
    generation: u64,
    on_focus: bool,
    token: CancellationToken,
    handle: JoinHandle<()>,
}

pub struct RefreshScheduler {
    timers: DashMap<WidgetId, ArmedTimer>,
    visibility: watch::Sender<bool>,
    triggers: mpsc::UnboundedSender<TriggerEvent>,
    root: CancellationToken,
}

impl RefreshScheduler {
    /// Create a scheduler and the receiving end of its trigger channel.
    pub fn new() -> (Self, mpsc::UnboundedReceiver<TriggerEvent>) {
        let (triggers, receiver) = mpsc::unbounded_channel();
        let (visibility, _) = watch::channel(true);
        let scheduler = Self {
            timers: DashMap::new(),
            visibility,
            triggers,
            root: CancellationToken::new(),
        };
        (scheduler, receiver)
    }

    /// Arm a periodic timer for `id`, replacing any existing one.
    ///
    /// Must be called from within a tokio runtime.
    pub fn arm(&self, id: &WidgetId, generation: u64, period: Duration, on_focus: bool) {
        self.disarm(id);

        let token = self.root.child_token();
        let handle = tokio::spawn(run_timer(
            id.clone(),
            generation,
            period,
            self.visibility.subscribe(),
            self.triggers.clone(),
            token.clone(),
        ));

        debug!(widget_id = %id, generation, period_secs = period.as_secs(), on_focus, "refresh timer armed");
        self.timers.insert(
            id.clone(),
            ArmedTimer {
                generation,
                on_focus,
                token,
                handle,
            },
        );
    }

    /// Cancel the timer for `id`. Returns whether one was armed.
    pub fn disarm(&self, id: &WidgetId) -> bool {
        match self.timers.remove(id) {
            Some((_, timer)) => {
                timer.token.cancel();
                debug!(widget_id = %id, generation = timer.generation, "refresh timer disarmed");
                true
            }
            None => false,
        }
    }

    pub fn is_armed(&self, id: &WidgetId) -> bool {
        self.timers
            .get(id)
            .is_some_and(|timer| !timer.handle.is_finished())
    }

    pub fn armed_count(&self) -> usize {
        self.timers.len()
    }

    /// Record host visibility. Periodic ticks are skipped while hidden.
    ///
    /// A hidden-to-visible transition triggers one immediate refresh for
    /// every armed widget with focus refresh. Returns whether the
    /// visibility changed.
    pub fn set_visible(&self, visible: bool) -> bool {
        let changed = self.visibility.send_if_modified(|current| {
            let changed = *current != visible;
            *current = visible;
            changed
        });

        if changed && visible {
            for timer in self.timers.iter().filter(|t| t.on_focus) {
                trace!(widget_id = %timer.key(), "focus refresh");
                let _ = self.triggers.send(TriggerEvent {
                    widget_id: timer.key().clone(),
                    generation: timer.generation,
                    trigger: RefreshTrigger::Focus,
                });
            }
        }
        changed
    }

    pub fn is_visible(&self) -> bool {
        *self.visibility.borrow()
    }

    /// Cancel every timer.
    pub fn shutdown(&self) {
        self.root.cancel();
        self.timers.clear();
    }
}

impl Drop for RefreshScheduler {
    fn drop(&mut self) {
        self.root.cancel();
    }
}

async fn run_timer(
    id: WidgetId,
    generation: u64,
    period: Duration,
    visibility: watch::Receiver<bool>,
    triggers: mpsc::UnboundedSender<TriggerEvent>,
    token: CancellationToken,
) {
    let mut ticker = tokio::time::interval_at(Instant::now() + period, period);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

    loop {
        tokio::select! {
            biased;
            _ = token.cancelled() => break,
            _ = ticker.tick() => {
                if !*visibility.borrow() {
                    trace!(widget_id = %id, "host hidden, skipping periodic refresh");
                    continue;
                }
                let event = TriggerEvent {
                    widget_id: id.clone(),
                    generation,
                    trigger: RefreshTrigger::Interval,
                };
                if triggers.send(event).is_err() {
                    break;
                }
            }
        }
    }

    trace!(widget_id = %id, "refresh timer stopped");
}
