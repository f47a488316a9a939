use super::error::NotifyError;
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use std::str::FromStr;

pub const STATUS_OK: u16 = 200;

/// The read/unread toggle. Also the value stored in `data-mark-action`,
/// which names the action the next click performs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MarkAction {
    Read,
    Unread,
}

impl MarkAction {
    pub fn as_str(&self) -> &'static str {
        match self {
            MarkAction::Read => "read",
            MarkAction::Unread => "unread",
        }
    }

    pub fn opposite(&self) -> Self {
        match self {
            MarkAction::Read => MarkAction::Unread,
            MarkAction::Unread => MarkAction::Read,
        }
    }

    /// Resolves the action echoed by the server, falling back to the one
    /// that was requested when the echo is missing or unrecognised.
    pub fn from_echo(echo: Option<&str>, requested: MarkAction) -> Self {
        echo.and_then(|a| a.parse().ok()).unwrap_or(requested)
    }
}

impl fmt::Display for MarkAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MarkAction {
    type Err = NotifyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "read" => Ok(MarkAction::Read),
            "unread" => Ok(MarkAction::Unread),
            other => Err(NotifyError::InvalidAction(other.to_string())),
        }
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum NumberOrText {
    Number(i64),
    Text(String),
}

fn deserialize_status<'de, D>(deserializer: D) -> Result<u16, D::Error>
where
    D: Deserializer<'de>,
{
    match NumberOrText::deserialize(deserializer)? {
        NumberOrText::Number(n) => u16::try_from(n).map_err(serde::de::Error::custom),
        NumberOrText::Text(s) => s.trim().parse().map_err(serde::de::Error::custom),
    }
}

fn deserialize_id<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match NumberOrText::deserialize(deserializer)? {
        NumberOrText::Number(n) => n.to_string(),
        NumberOrText::Text(s) => s,
    })
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct MarkResponse {
    #[serde(deserialize_with = "deserialize_status")]
    pub status: u16,
    #[serde(default)]
    pub action: Option<String>,
    #[serde(default)]
    pub msg: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ItemStatus {
    #[serde(deserialize_with = "deserialize_status")]
    pub status: u16,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct MarkAllResponse {
    #[serde(deserialize_with = "deserialize_status")]
    pub status: u16,
    #[serde(default)]
    pub action: Option<String>,
    #[serde(default)]
    pub responses: Vec<ItemStatus>,
    #[serde(default)]
    pub msg: Option<String>,
}

impl MarkAllResponse {
    pub fn succeeded(&self) -> i64 {
        self.responses
            .iter()
            .filter(|r| r.status == STATUS_OK)
            .count() as i64
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct DeleteResponse {
    #[serde(deserialize_with = "deserialize_status")]
    pub status: u16,
    /// Number of unread notifications among the deleted ones.
    #[serde(default)]
    pub read: i64,
    #[serde(default)]
    pub msg: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct NotificationPayload {
    #[serde(deserialize_with = "deserialize_id")]
    pub id: String,
    #[serde(default)]
    pub html: String,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct UpdateResponse {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub msg: Option<String>,
    #[serde(default)]
    pub retrieved: usize,
    #[serde(default)]
    pub unread_count: Option<i64>,
    #[serde(default)]
    pub notifications: Vec<NotificationPayload>,
}

/// Decodes a JSON body. Bodies without a `status` field inherit the HTTP
/// status code of the response that carried them.
pub fn decode_body<T>(http_status: u16, body: &str) -> Result<T, NotifyError>
where
    T: for<'de> Deserialize<'de>,
{
    let mut value: serde_json::Value = serde_json::from_str(body)
        .map_err(|e| NotifyError::decode(format!("Invalid JSON body: {e}")))?;

    if let Some(object) = value.as_object_mut() {
        object
            .entry("status")
            .or_insert_with(|| serde_json::Value::from(http_status));
    }

    serde_json::from_value(value)
        .map_err(|e| NotifyError::decode(format!("Unexpected response shape: {e}")))
}
