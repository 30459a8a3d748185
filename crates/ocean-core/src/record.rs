//! Temporal record types.
//!
//! A [`Record`] is one calendar day of user data: either a chat
//! [`Conversation`] or a [`SearchHistory`] of search entries. Records are
//! immutable once constructed and ordered by date. The payload kind is a
//! closed set of variants selected by an explicit [`RecordKind`] tag — never
//! by runtime type inspection.

use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::errors::CoreError;

/// The kind of records a run operates on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RecordKind {
    /// Chat conversation records.
    Conversations,
    /// Search-history records.
    Searches,
}

impl RecordKind {
    /// Stable lowercase name, used for artifact paths and prompt selection.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Conversations => "conversations",
            Self::Searches => "searches",
        }
    }
}

impl fmt::Display for RecordKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RecordKind {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "conversations" => Ok(Self::Conversations),
            "searches" => Ok(Self::Searches),
            other => Err(CoreError::UnsupportedKind(other.to_string())),
        }
    }
}

/// A single chat message within a [`Conversation`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    /// Display name of the sender.
    pub sender: String,
    /// Message body.
    pub content: String,
    /// Wall-clock time of day the message was sent (free-form, e.g. `14:03`).
    pub time: String,
}

/// One day of chat between a fixed set of participants.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Conversation {
    /// Calendar day of the conversation (no time component).
    pub date: NaiveDate,
    /// Messages in send order.
    pub messages: Vec<ChatMessage>,
    /// Participant identifiers. A `BTreeSet` keeps them sorted, which makes
    /// the canonical sort key stable across ingestion order.
    pub participants: BTreeSet<String>,
}

/// A single search-history entry within a [`SearchHistory`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchEntry {
    /// Hour of day the search happened (free-form, e.g. `09`).
    pub hour: String,
    /// Title of the search or visited page.
    pub title: String,
}

/// One day of search history.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchHistory {
    /// Calendar day of the entries.
    pub date: NaiveDate,
    /// Entries in recorded order.
    pub entries: Vec<SearchEntry>,
}

/// A dated record of user activity — the unit the pipeline scores.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Record {
    /// A chat conversation.
    Conversation(Conversation),
    /// A day of search history.
    SearchHistory(SearchHistory),
}

impl Record {
    /// Calendar day this record belongs to.
    #[must_use]
    pub fn date(&self) -> NaiveDate {
        match self {
            Self::Conversation(c) => c.date,
            Self::SearchHistory(s) => s.date,
        }
    }

    /// The kind tag matching this record's variant.
    #[must_use]
    pub fn kind(&self) -> RecordKind {
        match self {
            Self::Conversation(_) => RecordKind::Conversations,
            Self::SearchHistory(_) => RecordKind::Searches,
        }
    }

    /// Canonical ordering key used to make chunk contents reproducible
    /// independent of ingestion order.
    ///
    /// Conversations sort by their comma-joined (already sorted) participant
    /// set; search histories keep their date order and return an empty key.
    #[must_use]
    pub fn sort_key(&self) -> String {
        match self {
            Self::Conversation(c) => {
                let names: Vec<&str> = c.participants.iter().map(String::as_str).collect();
                names.join(",")
            }
            Self::SearchHistory(_) => String::new(),
        }
    }

    /// Render the record to the text form sent to the oracle.
    ///
    /// Only the fields with trait signal survive: sender and content for
    /// chat, title and hour for searches.
    #[must_use]
    pub fn render(&self) -> String {
        match self {
            Self::Conversation(c) => {
                let mut out = format!("Chat between {} on {}\n", c.sort_key_names(), c.date);
                for msg in &c.messages {
                    out.push_str(&format!("{}: {}: {}\n", msg.time, msg.sender, msg.content));
                }
                out
            }
            Self::SearchHistory(s) => {
                let mut out = format!("On {}, user searched:\n", s.date);
                for entry in &s.entries {
                    out.push_str(&format!("{} at {}\n", entry.title, entry.hour));
                }
                out
            }
        }
    }
}

impl Conversation {
    fn sort_key_names(&self) -> String {
        let names: Vec<&str> = self.participants.iter().map(String::as_str).collect();
        names.join(", ")
    }
}

impl From<Conversation> for Record {
    fn from(value: Conversation) -> Self {
        Self::Conversation(value)
    }
}

impl From<SearchHistory> for Record {
    fn from(value: SearchHistory) -> Self {
        Self::SearchHistory(value)
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
