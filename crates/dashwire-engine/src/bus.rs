// SPDX-FileCopyrightText: 2026 Dashwire Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Widget update notifications backed by a `tokio::sync::broadcast` channel.
//!
//! The bus is built and owned by the caller and handed to the engine.
//! [`UpdateBus::subscribe`] returns a [`Subscription`]; dropping it
//! unsubscribes.

use dashwire_core::WidgetId;
use tokio::sync::broadcast::{self, error::RecvError, error::TryRecvError};
use tracing::warn;

/// Default buffer capacity for the broadcast channel.
const DEFAULT_CAPACITY: usize = 256;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UpdateKind {
    /// Fresh data is cached; re-render to show it.
    Refreshed,
    /// The fetch failed; the widget shows an error badge or placeholder.
    Failed { message: String },
    /// The result arrived after the widget was torn down.
    Discarded,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WidgetUpdate {
    pub widget_id: WidgetId,
    pub kind: UpdateKind,
}

/// In-process fan-out of [`WidgetUpdate`]s.
#[derive(Debug, Clone)]
pub struct UpdateBus {
    sender: broadcast::Sender<WidgetUpdate>,
}

impl UpdateBus {
    /// Create a bus with a specific channel capacity.
    ///
    /// Slow subscribers lose the oldest updates once the buffer is full.
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity.max(1));
        Self { sender }
    }

    /// Publish to all current subscribers. Dropped when there are none.
    pub fn publish(&self, update: WidgetUpdate) {
        let _ = self.sender.send(update);
    }

    pub fn subscribe(&self) -> Subscription {
        Subscription {
            receiver: self.sender.subscribe(),
        }
    }

    pub fn subscriber_count(&self) -> usize {
        self.sender.receiver_count()
    }
}

impl Default for UpdateBus {
    fn default() -> Self {
        Self::new(DEFAULT_CAPACITY)
    }
}

/// A live subscription to an [`UpdateBus`].
#[derive(Debug)]
pub struct Subscription {
    receiver: broadcast::Receiver<WidgetUpdate>,
}

impl Subscription {
    /// Wait for the next update. `None` once the bus is gone.
    pub async fn recv(&mut self) -> Option<WidgetUpdate> {
        loop {
            match self.receiver.recv().await {
                Ok(update) => return Some(update),
                Err(RecvError::Lagged(skipped)) => {
                    warn!(skipped, "update subscriber lagged, oldest updates dropped");
                }
                Err(RecvError::Closed) => return None,
            }
        }
    }

    /// The next buffered update, without waiting.
    pub fn try_recv(&mut self) -> Option<WidgetUpdate> {
        loop {
            match self.receiver.try_recv() {
                Ok(update) => return Some(update),
                Err(TryRecvError::Lagged(skipped)) => {
                    warn!(skipped, "update subscriber lagged, oldest updates dropped");
                }
                Err(TryRecvError::Empty | TryRecvError::Closed) => return None,
            }
        }
    }
}
