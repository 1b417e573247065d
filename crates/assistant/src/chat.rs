//! Caller-owned chat transcript.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use marketlens_core::SessionId;

/// One question/answer exchange.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatTurn {
    pub question: String,
    pub answer: String,
    pub asked_at: DateTime<Utc>,
}

/// Append-only transcript for one session.
///
/// The derivation layer never truncates it; showing only the most recent
/// turns is a display concern (`recent` exists for exactly that). The log
/// is owned by the caller and passed around explicitly, which keeps the
/// router stateless and independently testable. Not persisted across
/// process restarts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatLog {
    session_id: SessionId,
    turns: Vec<ChatTurn>,
}

impl ChatLog {
    /// Start an empty transcript with a fresh session id.
    pub fn new() -> Self {
        Self {
            session_id: SessionId::new(),
            turns: Vec::new(),
        }
    }

    pub fn session_id(&self) -> SessionId {
        self.session_id
    }

    /// Append one exchange, stamped with the current time.
    pub fn push(&mut self, question: impl Into<String>, answer: impl Into<String>) {
        self.turns.push(ChatTurn {
            question: question.into(),
            answer: answer.into(),
            asked_at: Utc::now(),
        });
    }

    /// The most recent `n` turns, newest first.
    pub fn recent(&self, n: usize) -> impl Iterator<Item = &ChatTurn> {
        self.turns.iter().rev().take(n)
    }

    /// Full transcript in chronological order.
    pub fn turns(&self) -> &[ChatTurn] {
        &self.turns
    }

    pub fn len(&self) -> usize {
        self.turns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.turns.is_empty()
    }

    /// JSON transcript export for the presentation layer.
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

impl Default for ChatLog {
    fn default() -> Self {
        Self::new()
    }
}
