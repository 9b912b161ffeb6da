use crate::app::App;
use crate::auth::token::token_username;
use crate::core::router::resolve_home;
use crate::errors::{AppError, AppResult};

pub async fn handle(app: &App) -> AppResult<()> {
    let Some(cached) = app.session()? else {
        return Err(AppError::NotLoggedIn);
    };

    tracing::debug!(
        cached_user = token_username(&cached.token).as_deref().unwrap_or("?"),
        "validating cached credential"
    );
    let user = app.api.whoami().await?;

    println!("👤 User : {}", user.username);
    println!("🎭 Role : {}", user.role);
    println!("🏠 Home : {}", resolve_home(Some(user.role)));
    println!("🌐 API  : {}", app.api.base_url());
    Ok(())
}
