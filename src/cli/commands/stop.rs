use super::dashboard;
use crate::app::App;
use crate::core::admin::AdminPanel;
use crate::core::dashboard::DashboardPage;
use crate::errors::{AppError, AppResult};
use crate::models::Route;
use crate::models::stats::progress_percentage;
use crate::ui::messages;
use crate::utils::formatting::{format_duration, format_hours, format_percentage};
use std::sync::Arc;

pub async fn handle(app: &App) -> AppResult<()> {
    match app.enter(Route::Admin)? {
        Route::Admin => {}
        Route::Client => return dashboard::show(app).await,
        Route::Login => return Err(AppError::NotLoggedIn),
    }

    let page = DashboardPage::new(Arc::clone(&app.api));
    page.refresh().await?;
    let mut panel = AdminPanel::new(page.state().await.active);

    match page.stop(&mut panel).await {
        Ok(session) => {
            messages::success(format!(
                "Timer stopped: {} ({})",
                session.description,
                format_duration(&session)
            ));

            let state = page.state().await;
            if let Some(stats) = &state.stats {
                println!(
                    "   total {} of {} ({})",
                    format_hours(stats.total_hours_worked),
                    format_hours(stats.contracted_hours),
                    format_percentage(progress_percentage(Some(stats)))
                );
            }
            Ok(())
        }
        Err(e) => {
            if let Some(inline) = panel.error() {
                messages::warning(inline);
            }
            Err(e)
        }
    }
}
