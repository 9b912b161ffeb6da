use base64::Engine;
use base64::engine::general_purpose::STANDARD;

/// `base64("username:password")`, the value replayed after `Basic `.
pub fn basic_token(username: &str, password: &str) -> String {
    STANDARD.encode(format!("{}:{}", username, password))
}

/// Username part of a cached token, for display only.
pub fn token_username(token: &str) -> Option<String> {
    let raw = STANDARD.decode(token).ok()?;
    let text = String::from_utf8(raw).ok()?;
    text.split_once(':').map(|(user, _)| user.to_string())
}
