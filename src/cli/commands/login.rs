use crate::app::App;
use crate::cli::parser::Commands;
use crate::errors::{AppError, AppResult};
use crate::ui::messages;
use std::io::{self, BufRead, Write};

pub async fn handle(cmd: &Commands, app: &App) -> AppResult<()> {
    if let Commands::Login { username, password } = cmd {
        let username = username.trim();
        if username.is_empty() {
            return Err(AppError::Validation("Username is required".into()));
        }

        let password = match password {
            Some(p) => p.clone(),
            None => prompt_password()?,
        };

        let user = app.api.login(username, &password).await?;

        messages::success(format!("Logged in as {} ({})", user.username, user.role));
        messages::redirect(format!("Home: {}", app.navigator.current()));
    }

    Ok(())
}

fn prompt_password() -> AppResult<String> {
    print!("Password: ");
    io::stdout().flush()?;

    let mut line = String::new();
    io::stdin().lock().read_line(&mut line)?;
    Ok(line.trim_end_matches(['\r', '\n']).to_string())
}
