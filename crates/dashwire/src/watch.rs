// SPDX-FileCopyrightText: 2026 Dashwire Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! `dashwire watch`: keep a dashboard mounted and print its updates.
//!
//! Prints the initial render as one JSON line per widget, then one line per
//! refresh or failure until SIGINT/SIGTERM.

use dashwire_config::DashwireConfig;
use dashwire_core::{DashwireError, WidgetId};
use dashwire_engine::{Subscription, UpdateKind, WidgetEngine, WidgetUpdate};
use dashwire_render::RenderOutcome;
use serde::Serialize;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info};

use crate::DashboardArgs;
use crate::session::DashboardSession;
use crate::shutdown;

#[derive(Debug, Serialize)]
#[serde(tag = "event", rename_all = "lowercase")]
enum WatchEvent {
    Rendered {
        #[serde(rename = "widgetId")]
        widget_id: WidgetId,
        outcome: RenderOutcome,
    },
    Failed {
        #[serde(rename = "widgetId")]
        widget_id: WidgetId,
        message: String,
    },
}

pub async fn run_watch(config: &DashwireConfig, args: &DashboardArgs) -> Result<(), DashwireError> {
    let cancel = shutdown::install_signal_handler();
    let session = DashboardSession::open(config, args)?;
    let mut updates = session.engine.subscribe();

    for rendered in session.render_all().await {
        emit(&WatchEvent::Rendered {
            widget_id: rendered.widget_id,
            outcome: rendered.outcome,
        })?;
    }
    info!(
        dashboard_id = %session.dashboard.id,
        widgets = session.engine.mounted_ids().len(),
        "watching dashboard, Ctrl+C to stop"
    );

    let result = watch_loop(&session.engine, &mut updates, &cancel).await;
    session.engine.shutdown();
    result
}

async fn watch_loop(
    engine: &WidgetEngine,
    updates: &mut Subscription,
    cancel: &CancellationToken,
) -> Result<(), DashwireError> {
    loop {
        let update = tokio::select! {
            _ = cancel.cancelled() => return Ok(()),
            update = updates.recv() => update,
        };
        let Some(update) = update else {
            return Ok(());
        };
        if let Some(event) = event_for(engine, update).await {
            emit(&event)?;
        }
    }
}

/// Re-render after a refresh. Failures are reported as-is: rendering would
/// serve the stale entry and start another fetch.
async fn event_for(engine: &WidgetEngine, update: WidgetUpdate) -> Option<WatchEvent> {
    match update.kind {
        UpdateKind::Refreshed => match engine.render(&update.widget_id).await {
            Ok(outcome) => Some(WatchEvent::Rendered {
                widget_id: update.widget_id,
                outcome,
            }),
            Err(e) => {
                debug!(widget_id = %update.widget_id, error = %e, "refreshed widget no longer mounted");
                None
            }
        },
        UpdateKind::Failed { message } => Some(WatchEvent::Failed {
            widget_id: update.widget_id,
            message,
        }),
        UpdateKind::Discarded => None,
    }
}

fn emit(event: &WatchEvent) -> Result<(), DashwireError> {
    println!("{}", serde_json::to_string(event)?);
    Ok(())
}
