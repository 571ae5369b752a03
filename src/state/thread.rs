//! Question Thread
//!
//! Follow-up questions about the current analysis, in submission order.
//! Answers are matched back to their entry by [`QuestionId`], so two
//! questions with the same text never steal each other's answer.

use serde::Serialize;
use std::fmt;
use uuid::Uuid;

use crate::format::format_analysis_text;

/// Identifier assigned to a question when it is submitted
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct QuestionId(Uuid);

impl QuestionId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for QuestionId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for QuestionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum Answer {
    Pending,
    Answered { text: String, html: String },
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct QuestionEntry {
    pub id: QuestionId,
    pub question: String,
    pub answer: Answer,
}

impl QuestionEntry {
    pub fn is_pending(&self) -> bool {
        matches!(self.answer, Answer::Pending)
    }
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct QuestionThread {
    entries: Vec<QuestionEntry>,
    /// Question currently awaiting its answer; input is disabled while set
    asking: Option<QuestionId>,
}

impl QuestionThread {
    /// Append a pending entry and mark it as the one being asked
    pub fn push(&mut self, question: impl Into<String>) -> QuestionId {
        let id = QuestionId::new();
        self.entries.push(QuestionEntry {
            id,
            question: question.into(),
            answer: Answer::Pending,
        });
        self.asking = Some(id);
        id
    }

    /// Fill in the answer of entry `id`; false when the entry is gone
    pub fn resolve(&mut self, id: QuestionId, text: &str) -> bool {
        match self.entries.iter_mut().find(|entry| entry.id == id) {
            Some(entry) => {
                entry.answer = Answer::Answered {
                    text: text.to_string(),
                    html: format_analysis_text(text),
                };
                true
            }
            None => false,
        }
    }

    /// Re-enable input if `id` is the question being asked
    pub fn finish(&mut self, id: QuestionId) {
        if self.asking == Some(id) {
            self.asking = None;
        }
    }

    pub fn clear(&mut self) {
        self.entries.clear();
        self.asking = None;
    }

    pub fn entries(&self) -> &[QuestionEntry] {
        &self.entries
    }

    pub fn get(&self, id: QuestionId) -> Option<&QuestionEntry> {
        self.entries.iter().find(|entry| entry.id == id)
    }

    pub fn is_asking(&self) -> bool {
        self.asking.is_some()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
