use super::dashboard;
use crate::app::App;
use crate::cli::parser::Commands;
use crate::core::admin::AdminPanel;
use crate::core::dashboard::DashboardPage;
use crate::errors::{AppError, AppResult};
use crate::models::Route;
use crate::ui::messages;
use crate::utils::time::to_local;
use std::sync::Arc;

pub async fn handle(cmd: &Commands, app: &App) -> AppResult<()> {
    if let Commands::Start { description } = cmd {
        let description = description.join(" ");

        // checked before anything touches the network
        AdminPanel::validate_description(&description)?;

        match app.enter(Route::Admin)? {
            Route::Admin => {}
            Route::Client => return dashboard::show(app).await,
            Route::Login => return Err(AppError::NotLoggedIn),
        }

        let page = DashboardPage::new(Arc::clone(&app.api));
        let active = app.api.get_active_session().await?;
        let mut panel = AdminPanel::new(active);

        match page.start(&mut panel, &description).await {
            Ok(session) => {
                messages::success(format!("Timer started: {}", session.description));
                println!(
                    "   started at {} (session #{})",
                    to_local(session.start_time).format("%H:%M:%S"),
                    session.id
                );
            }
            Err(e) => {
                if let Some(inline) = panel.error() {
                    messages::warning(inline);
                }
                return Err(e);
            }
        }
    }

    Ok(())
}
