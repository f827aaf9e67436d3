use crate::error::{AppError, ConversationError};
use crate::scraper::{FieldSet, ReplyState};
use serde::Serialize;
use std::fmt;
use std::str::FromStr;

/// Id of the root post of a conversation. Always positive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct ThreadId(u64);

impl ThreadId {
    pub fn new(id: u64) -> Option<Self> {
        (id > 0).then_some(Self(id))
    }

    pub fn get(self) -> u64 {
        self.0
    }
}

impl FromStr for ThreadId {
    type Err = ConversationError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed.is_empty() || !trimmed.bytes().all(|b| b.is_ascii_digit()) {
            return Err(ConversationError::InvalidIdentifier(s.to_string()));
        }
        trimmed
            .parse::<u64>()
            .ok()
            .and_then(Self::new)
            .ok_or_else(|| ConversationError::InvalidIdentifier(s.to_string()))
    }
}

impl fmt::Display for ThreadId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Which side of the root post the caller wants replies from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Before,
    After,
    #[default]
    Both,
}

impl Direction {
    pub(crate) fn admits(self, state: ReplyState) -> bool {
        match self {
            Direction::Before => state == ReplyState::Before,
            Direction::After => state == ReplyState::After,
            Direction::Both => true,
        }
    }

    /// Replies arrive oldest first, so a `before` request is complete once
    /// the first `after` reply shows up.
    pub(crate) fn stops_at(self, state: ReplyState) -> bool {
        self == Direction::Before && state == ReplyState::After
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReplyRecord {
    pub id: u64,
    pub state: ReplyState,
    #[serde(flatten)]
    pub fields: Option<FieldSet>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tweet: Option<serde_json::Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Conversation {
    pub thread_id: ThreadId,
    pub tweets: Vec<ReplyRecord>,
}

/// Flat `{ error, message, tweets }` rendering of a conversation result.
#[derive(Debug, Serialize)]
pub struct ConversationResponse {
    pub error: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    pub tweets: Vec<ReplyRecord>,
}

impl From<std::result::Result<Conversation, AppError>> for ConversationResponse {
    fn from(result: std::result::Result<Conversation, AppError>) -> Self {
        match result {
            Ok(conversation) => Self {
                error: false,
                message: None,
                tweets: conversation.tweets,
            },
            Err(err) => Self {
                error: true,
                message: Some(match err {
                    AppError::Conversation(e) => e.to_string(),
                    other => other.to_string(),
                }),
                tweets: Vec::new(),
            },
        }
    }
}
