// SPDX-FileCopyrightText: 2026 Dashwire Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Dashwire - bind dashboard widgets to tool data and render them.
//!
//! This is the binary entry point for the Dashwire CLI.

mod check;
mod fixtures;
mod render;
mod session;
mod shutdown;
mod watch;

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use dashwire_config::DashwireConfig;

/// Dashwire - bind dashboard widgets to tool data and render them.
#[derive(Parser, Debug)]
#[command(name = "dashwire", version, about, long_about = None)]
struct Cli {
    /// Settings file to use instead of the standard lookup.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

/// Available subcommands.
#[derive(Subcommand, Debug)]
enum Commands {
    /// Validate settings and a widget catalog.
    Check {
        /// Catalog file. Defaults to `catalog.path` from the settings.
        #[arg(long)]
        catalog: Option<PathBuf>,
    },
    /// Render a dashboard once and print the outcomes as JSON.
    Render(DashboardArgs),
    /// Render a dashboard and print every refresh until interrupted.
    Watch(DashboardArgs),
}

/// Flags shared by `render` and `watch`.
#[derive(Args, Debug, Clone)]
pub struct DashboardArgs {
    /// Catalog file. Defaults to `catalog.path` from the settings.
    #[arg(long)]
    pub catalog: Option<PathBuf>,

    /// Directory of `<dataSource>/<tool>.json` response files.
    #[arg(long)]
    pub fixtures: PathBuf,

    /// Dashboard id. Defaults to the catalog's default dashboard.
    #[arg(long)]
    pub dashboard: Option<String>,

    /// Viewer id used for permission checks.
    #[arg(long, default_value = "anonymous")]
    pub viewer: String,

    /// Viewer role; repeat for several.
    #[arg(long = "role")]
    pub roles: Vec<String>,
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let config = match load_settings(cli.config.as_deref()) {
        Ok(config) => config,
        Err(errors) => {
            dashwire_config::render_errors(&errors);
            std::process::exit(1);
        }
    };
    init_tracing(&config.engine.log_level);

    let result = match cli.command {
        Commands::Check { catalog } => check::run_check(&config, catalog.as_deref()),
        Commands::Render(args) => render::run_render(&config, &args).await,
        Commands::Watch(args) => watch::run_watch(&config, &args).await,
    };

    if let Err(e) = result {
        eprintln!("dashwire: {e}");
        std::process::exit(1);
    }
}

fn load_settings(
    path: Option<&std::path::Path>,
) -> Result<DashwireConfig, Vec<dashwire_config::ConfigError>> {
    match path {
        Some(path) => dashwire_config::load_and_validate_path(path),
        None => dashwire_config::load_and_validate(),
    }
}

/// Logs go to stderr so `render` and `watch` output stays parseable.
fn init_tracing(log_level: &str) {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("dashwire={log_level},warn")));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_thread_names(false)
        .init();
}
