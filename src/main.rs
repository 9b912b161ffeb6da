//! rtracker main entrypoint.

use rtracker::errors::AppError;
use rtracker::run;
use rtracker::ui::messages;

#[tokio::main]
async fn main() {
    if let Err(e) = run().await {
        messages::error(&e);
        match e {
            AppError::Unauthorized | AppError::NotLoggedIn => {
                eprintln!("   → rtracker login -u <username>");
            }
            ref err if err.is_retryable() => {
                eprintln!("   The request can be retried.");
            }
            _ => {}
        }
        std::process::exit(1);
    }
}
