use crate::app::App;
use crate::core::client_view::ClientView;
use crate::core::dashboard::DashboardPage;
use crate::errors::{AppError, AppResult};
use crate::models::Route;
use crate::ui::render::render_history;
use chrono::Local;
use std::sync::Arc;

pub async fn handle(app: &App) -> AppResult<()> {
    if app.enter(Route::Client)? == Route::Login {
        return Err(AppError::NotLoggedIn);
    }

    let page = DashboardPage::new(Arc::clone(&app.api));
    page.refresh().await?;
    let state = page.state().await;

    let mut view = ClientView::new(state.sessions, state.active, state.stats);
    let now = Local::now();
    let groups = view.groups(&now);
    print!("{}", render_history(groups, &Local));
    Ok(())
}
