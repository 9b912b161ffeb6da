#![allow(dead_code)]
use assert_cmd::{Command, cargo_bin_cmd};
use chrono::{DateTime, TimeZone, Utc};
use rtracker::models::WorkSession;
use std::env;
use std::fs;
use std::path::PathBuf;

pub fn rti() -> Command {
    cargo_bin_cmd!("rtracker")
}

/// Isolated config + credential paths inside the system temp dir.
pub struct Sandbox {
    pub dir: PathBuf,
    pub config: String,
    pub credentials: String,
}

pub fn setup_sandbox(name: &str) -> Sandbox {
    let mut dir: PathBuf = env::temp_dir();
    dir.push(format!("{}_rtracker", name));
    fs::remove_dir_all(&dir).ok();
    fs::create_dir_all(&dir).expect("create sandbox dir");

    Sandbox {
        config: dir.join("rtracker.conf").to_string_lossy().to_string(),
        credentials: dir.join("credentials.yaml").to_string_lossy().to_string(),
        dir,
    }
}

impl Sandbox {
    /// `rtracker --config .. --credentials .. [--api-url ..]`
    pub fn cmd(&self, api_url: Option<&str>) -> Command {
        let mut cmd = rti();
        cmd.env_remove("RTRACKER_API_URL")
            .env_remove("RTRACKER_PASSWORD")
            .env_remove("RUST_LOG")
            .args(["--config", &self.config, "--credentials", &self.credentials]);
        if let Some(url) = api_url {
            cmd.args(["--api-url", url]);
        }
        cmd
    }

    /// Write a cached credential as if `login` had succeeded.
    pub fn cache_credential(&self, token: &str, role: &str) {
        fs::write(
            &self.credentials,
            format!("token: {}\nrole: {}\n", token, role),
        )
        .expect("write credentials");
    }
}

pub fn at(y: i32, mo: u32, d: u32, h: u32, mi: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(y, mo, d, h, mi, 0).unwrap()
}

pub fn completed(id: i64, description: &str, start: DateTime<Utc>, minutes: i64) -> WorkSession {
    WorkSession {
        id,
        description: description.to_string(),
        start_time: start,
        end_time: Some(start + chrono::Duration::minutes(minutes)),
    }
}

pub fn running(id: i64, description: &str, start: DateTime<Utc>) -> WorkSession {
    WorkSession {
        id,
        description: description.to_string(),
        start_time: start,
        end_time: None,
    }
}
