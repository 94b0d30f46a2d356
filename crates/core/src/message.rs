//! Conversation turn types.
//!
//! Callers supply history as loosely-shaped JSON. It is validated once at the
//! boundary ([`Turn::from_raw`]) and everything downstream works on [`Turn`].
//! Malformed entries are skipped, never fatal.

use serde::{Deserialize, Serialize};

/// The speaker of a turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// The prospective student
    User,
    /// The enrollment assistant
    Assistant,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::User => "user",
            Self::Assistant => "assistant",
        }
    }

    /// Parse a role name, case-insensitively. Anything else is `None`.
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "user" => Some(Self::User),
            "assistant" => Some(Self::Assistant),
            _ => None,
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single message in a conversation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Turn {
    /// Who sent this turn
    pub role: Role,

    /// The text content
    pub text: String,

    /// Caller-supplied timestamp, passed through untouched
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<String>,
}

impl Turn {
    /// Create a user turn.
    pub fn user(text: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            text: text.into(),
            timestamp: None,
        }
    }

    /// Create an assistant turn.
    pub fn assistant(text: impl Into<String>) -> Self {
        Self {
            role: Role::Assistant,
            text: text.into(),
            timestamp: None,
        }
    }

    pub fn is_user(&self) -> bool {
        self.role == Role::User
    }

    /// `true` when the text is empty or whitespace only.
    pub fn is_blank(&self) -> bool {
        self.text.trim().is_empty()
    }

    /// Validate a raw history entry.
    ///
    /// Accepts `content` as a plain string or as a list of `{ "text": ... }`
    /// parts (joined with newlines), and falls back to a top-level `text`
    /// key. Returns `None` for unknown roles and blank or missing text.
    pub fn from_raw(raw: &RawTurn) -> Option<Self> {
        let obj = raw.0.as_object()?;
        let role = Role::parse(obj.get("role")?.as_str()?)?;

        let text = match obj.get("content") {
            Some(serde_json::Value::String(s)) => s.clone(),
            Some(serde_json::Value::Array(parts)) => parts
                .iter()
                .filter_map(|p| match p {
                    serde_json::Value::String(s) => Some(s.as_str()),
                    other => other.get("text").and_then(|t| t.as_str()),
                })
                .collect::<Vec<_>>()
                .join("\n"),
            _ => obj
                .get("text")
                .and_then(|t| t.as_str())
                .unwrap_or_default()
                .to_string(),
        };

        if text.trim().is_empty() {
            return None;
        }

        let timestamp = obj
            .get("timestamp")
            .and_then(|t| t.as_str())
            .map(str::to_string);

        Some(Self {
            role,
            text,
            timestamp,
        })
    }
}

/// An unvalidated history entry as received from the caller.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RawTurn(pub serde_json::Value);

impl From<serde_json::Value> for RawTurn {
    fn from(value: serde_json::Value) -> Self {
        Self(value)
    }
}

/// Validate raw history, dropping malformed entries, and keep the last
/// `max_turns` valid turns.
pub fn ingest_history(raw: &[RawTurn], max_turns: usize) -> Vec<Turn> {
    let mut turns: Vec<Turn> = Vec::with_capacity(raw.len());
    for (index, entry) in raw.iter().enumerate() {
        match Turn::from_raw(entry) {
            Some(turn) => turns.push(turn),
            None => tracing::debug!(index, "Ignoring malformed history entry"),
        }
    }

    if turns.len() > max_turns {
        turns.drain(..turns.len() - max_turns);
    }
    turns
}

/// Join the text of the given turns with single spaces.
pub fn joined_text<'a>(turns: impl IntoIterator<Item = &'a Turn>) -> String {
    turns
        .into_iter()
        .map(|t| t.text.as_str())
        .collect::<Vec<_>>()
        .join(" ")
}
