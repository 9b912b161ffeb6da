use crate::app::App;
use crate::errors::AppResult;
use crate::ui::messages;

pub fn handle(app: &App) -> AppResult<()> {
    let was_logged_in = app.store.is_authenticated();
    app.api.logout()?;

    if was_logged_in {
        messages::success("Logged out");
    } else {
        messages::info("Not logged in");
    }
    Ok(())
}
