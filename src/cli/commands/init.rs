use crate::app::App;
use crate::config::Config;
use crate::errors::AppResult;
use crate::ui::messages;

use crate::cli::parser::Cli;

/// Handle the `init` command
///
/// Writes the default configuration file (unless running in test mode) and
/// reports where the credential cache will live.
pub fn handle(cli: &Cli, app: &App) -> AppResult<()> {
    println!("⚙️  Initializing rtracker…");

    if cli.test {
        messages::info("Test mode: configuration file not written");
    } else if app.config_path.exists() {
        messages::warning(format!(
            "Configuration already present at {}, leaving it untouched",
            app.config_path.display()
        ));
    } else {
        Config::init_at(&app.config_path)?;
        messages::success(format!("Config file: {}", app.config_path.display()));
    }

    println!("🌐 API         : {}", app.cfg.base_url());
    println!("🔑 Credentials : {}", app.cfg.credentials_file_path().display());

    println!("🎉 rtracker initialization completed! Next: `rtracker login -u <user>`");
    Ok(())
}
