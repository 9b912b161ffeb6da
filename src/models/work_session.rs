use crate::utils::time::{parse_timestamp, parse_optional_timestamp};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

/// A work session as returned by the backend.
///
/// `end_time == None` means the timer is still running. The client never
/// edits a session: every copy it holds comes straight from a server response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkSession {
    pub id: i64,
    pub description: String,
    #[serde(deserialize_with = "de_timestamp")]
    pub start_time: DateTime<Utc>,
    #[serde(default, deserialize_with = "de_optional_timestamp")]
    pub end_time: Option<DateTime<Utc>>,
}

impl WorkSession {
    pub fn is_active(&self) -> bool {
        self.end_time.is_none()
    }

    pub fn is_completed(&self) -> bool {
        self.end_time.is_some()
    }

    /// Worked minutes (floored). `None` while the session is still open.
    pub fn duration_minutes(&self) -> Option<i64> {
        self.end_time
            .map(|end| (end - self.start_time).num_minutes().max(0))
    }
}

/// Body of `POST /sessions/start`.
#[derive(Debug, Clone, Serialize)]
pub struct StartSessionRequest<'a> {
    pub description: &'a str,
}

fn de_timestamp<'de, D>(deserializer: D) -> Result<DateTime<Utc>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    parse_timestamp(&raw).map_err(serde::de::Error::custom)
}

fn de_optional_timestamp<'de, D>(deserializer: D) -> Result<Option<DateTime<Utc>>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<String>::deserialize(deserializer)?;
    parse_optional_timestamp(raw.as_deref()).map_err(serde::de::Error::custom)
}
