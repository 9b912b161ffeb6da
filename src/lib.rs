//! rtracker library root.
//! Exposes the CLI parser, the high-level run() function, and the modules
//! behind them: gateway client, credential store, router, dashboards.

pub mod api;
pub mod app;
pub mod auth;
pub mod cli;
pub mod config;
pub mod core;
pub mod errors;
pub mod logging;
pub mod models;
pub mod ui;
pub mod utils;

use app::App;
use clap::Parser;
use cli::commands;
use cli::parser::{Cli, Commands};
use errors::AppResult;

/// Central command dispatcher
pub async fn dispatch(cli: &Cli, app: &App) -> AppResult<()> {
    match &cli.command {
        Commands::Init => commands::init::handle(cli, app),
        Commands::Config { .. } => commands::config::handle(&cli.command, app),
        Commands::Login { .. } => commands::login::handle(&cli.command, app).await,
        Commands::Logout => commands::logout::handle(app),
        Commands::Whoami => commands::whoami::handle(app).await,
        Commands::Start { .. } => commands::start::handle(&cli.command, app).await,
        Commands::Stop => commands::stop::handle(app).await,
        Commands::Status { .. } => commands::status::handle(&cli.command, app).await,
        Commands::Dashboard { .. } => commands::dashboard::handle(&cli.command, app).await,
        Commands::History => commands::history::handle(app).await,
    }
}

/// Entry point used by main.rs
pub async fn run() -> AppResult<()> {
    let cli = Cli::parse();
    run_with(cli).await
}

pub async fn run_with(cli: Cli) -> AppResult<()> {
    let app = App::from_cli(&cli)?;
    logging::init(cli.verbose, &app.cfg.log_level);
    tracing::debug!(api = %app.cfg.base_url(), "starting");

    dispatch(&cli, &app).await
}
