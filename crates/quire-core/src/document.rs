use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One stored document: extracted text plus the questions surfaced from it
/// and any answers generated so far. Last writer wins; no versioning.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Document {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub filename: String,
    #[serde(default)]
    pub text: String,
    #[serde(default)]
    pub questions: Vec<String>,
    #[serde(default)]
    pub answers: HashMap<String, String>,
    #[serde(
        default,
        rename = "uploadedAt",
        skip_serializing_if = "Option::is_none"
    )]
    pub uploaded_at: Option<DateTime<Utc>>,
}

impl Document {
    /// Stored answer for a question, empty string if none yet.
    pub fn answer_for(&self, question: &str) -> String {
        self.answers.get(question).cloned().unwrap_or_default()
    }
}

/// Which document fields a search scans.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SearchScope {
    Questions,
    Answers,
    #[default]
    Both,
}

impl SearchScope {
    pub fn includes_questions(self) -> bool {
        matches!(self, SearchScope::Questions | SearchScope::Both)
    }

    pub fn includes_answers(self) -> bool {
        matches!(self, SearchScope::Answers | SearchScope::Both)
    }
}

/// A single search match, tagged by what matched and annotated with the
/// owning document.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum SearchResult {
    /// A question matched; carries the stored answer (empty if unanswered).
    #[serde(rename_all = "camelCase")]
    Question {
        content: String,
        document_id: String,
        filename: String,
        answer: String,
    },
    /// An answer matched; carries the question it belongs to.
    #[serde(rename_all = "camelCase")]
    Answer {
        content: String,
        question: String,
        document_id: String,
        filename: String,
    },
    /// The document's filename matched.
    #[serde(rename_all = "camelCase")]
    Document {
        content: String,
        document_id: String,
        filename: String,
    },
}
