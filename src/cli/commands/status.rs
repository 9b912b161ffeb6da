use super::dashboard;
use crate::app::App;
use crate::cli::parser::Commands;
use crate::core::admin::AdminPanel;
use crate::core::dashboard::DashboardPage;
use crate::core::ticker::Ticker;
use crate::errors::{AppError, AppResult};
use crate::models::Route;
use crate::ui::messages;
use crate::ui::render::{clock_line, render_admin};
use std::io::{self, Write};
use std::sync::Arc;

pub async fn handle(cmd: &Commands, app: &App) -> AppResult<()> {
    if let Commands::Status { watch } = cmd {
        match app.enter(Route::Admin)? {
            Route::Admin => show(app, *watch).await?,
            Route::Client => dashboard::show(app).await?,
            Route::Login => return Err(AppError::NotLoggedIn),
        }
    }
    Ok(())
}

async fn show(app: &App, watch: bool) -> AppResult<()> {
    let page = DashboardPage::new(Arc::clone(&app.api));
    page.refresh().await?;

    let state = page.state().await;
    let panel = AdminPanel::new(state.active.clone());
    println!("{}", render_admin(&panel, &state, app.clock.now()));

    if !watch {
        return Ok(());
    }
    if !panel.is_active() {
        messages::info("No timer running, nothing to watch");
        return Ok(());
    }

    // the clock is derived from the server start time, so no refetch is needed per tick
    let panel = Arc::new(panel);
    let clock = Arc::clone(&app.clock);
    let ticker = Ticker::start(app.cfg.clock_tick(), move |_| {
        print!("\r{}  ", clock_line(&panel, clock.now()));
        let _ = io::stdout().flush();
        async {}
    });

    tokio::signal::ctrl_c().await?;
    ticker.stop().await;
    page.unmount();
    println!();
    Ok(())
}
