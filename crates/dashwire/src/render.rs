// SPDX-FileCopyrightText: 2026 Dashwire Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! `dashwire render`: render a dashboard once and print JSON.

use dashwire_config::DashwireConfig;
use dashwire_core::DashwireError;

use crate::DashboardArgs;
use crate::session::DashboardSession;

pub async fn run_render(config: &DashwireConfig, args: &DashboardArgs) -> Result<(), DashwireError> {
    let session = DashboardSession::open(config, args)?;
    let rendered = session.render_all().await;
    session.engine.shutdown();

    println!("{}", serde_json::to_string_pretty(&rendered)?);
    Ok(())
}
