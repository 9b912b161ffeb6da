use crate::app::App;
use crate::cli::parser::Commands;
use crate::core::client_view::ClientView;
use crate::core::dashboard::DashboardPage;
use crate::core::ticker::Ticker;
use crate::errors::{AppError, AppResult};
use crate::models::Route;
use crate::ui::messages;
use crate::ui::render::render_client;
use chrono::Local;
use std::io::{self, Write};
use std::sync::Arc;
use tokio::sync::Mutex;

const CLEAR_SCREEN: &str = "\x1b[2J\x1b[H";

pub async fn handle(cmd: &Commands, app: &App) -> AppResult<()> {
    if let Commands::Dashboard { watch } = cmd {
        if app.enter(Route::Client)? == Route::Login {
            return Err(AppError::NotLoggedIn);
        }
        if *watch {
            return watch_dashboard(app).await;
        }
        return show(app).await;
    }
    Ok(())
}

/// Fetch once and print the client view.
pub async fn show(app: &App) -> AppResult<()> {
    let page = DashboardPage::new(Arc::clone(&app.api));
    page.refresh().await?;

    let state = page.state().await;
    let mut view = ClientView::new(state.sessions, state.active, state.stats);
    println!("{}", render_client(&mut view, &Local::now()));
    Ok(())
}

/// Refetch every `refresh_interval_secs` and redraw until Ctrl-C or a 401.
async fn watch_dashboard(app: &App) -> AppResult<()> {
    let page = DashboardPage::new(Arc::clone(&app.api));
    let view = Arc::new(Mutex::new(ClientView::default()));

    let secs = app.cfg.refresh_interval_secs;
    let ticker = {
        let page = page.clone();
        Ticker::start(app.cfg.refresh_interval(), move |_| {
            let page = page.clone();
            let view = Arc::clone(&view);
            async move {
                if let Err(e) = page.refresh().await {
                    if e.is_unauthorized() {
                        page.unmount();
                    } else {
                        messages::error(format!("{} (retrying on next refresh)", e));
                    }
                    return;
                }
                if !page.mount().is_mounted() {
                    return;
                }

                let state = page.state().await;
                let mut view = view.lock().await;
                view.update(&state.sessions, state.active.as_ref(), state.stats.as_ref());

                print!("{CLEAR_SCREEN}");
                println!("{}", render_client(&mut view, &Local::now()));
                println!("(refreshing every {}s, Ctrl-C to quit)", secs);
                let _ = io::stdout().flush();
            }
        })
    };

    tokio::select! {
        res = tokio::signal::ctrl_c() => res?,
        _ = page.mount().unmounted() => {}
    }

    page.unmount();
    ticker.stop().await;

    if app.navigator.current() == Route::Login {
        return Err(AppError::Unauthorized);
    }
    Ok(())
}
