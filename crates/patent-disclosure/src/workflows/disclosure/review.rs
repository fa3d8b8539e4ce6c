//! Payloads exchanged with an external draft/review generator.
//!
//! The generator's scores are a separate rubric from [`super::quality`] and
//! are never merged into a `CheckReport`.

use super::domain::DocumentRecord;
use super::draft::{render_draft, DraftStatus};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReviewOperation {
    Draft,
    Review,
    Polish,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReviewRequest {
    pub operation: ReviewOperation,
    pub document: String,
}

impl ReviewRequest {
    pub fn for_record(
        operation: ReviewOperation,
        record: &DocumentRecord,
        today: NaiveDate,
    ) -> Self {
        Self {
            operation,
            document: render_draft(record, DraftStatus::Draft, today),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IssueLevel {
    Error,
    Warning,
    Suggestion,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReviewIssue {
    pub level: IssueLevel,
    pub category: String,
    pub message: String,
    #[serde(default)]
    pub suggestion: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReviewResult {
    pub total_score: u8,
    #[serde(default)]
    pub scores: BTreeMap<String, u8>,
    #[serde(default)]
    pub issues: Vec<ReviewIssue>,
}

impl ReviewResult {
    /// Extracts the JSON object embedded in free-form model output.
    pub fn from_response_text(text: &str) -> Result<Self, ReviewError> {
        let start = text.find('{').ok_or(ReviewError::MissingPayload)?;
        let end = text.rfind('}').ok_or(ReviewError::MissingPayload)?;
        if end < start {
            return Err(ReviewError::MissingPayload);
        }

        let result: ReviewResult = serde_json::from_str(&text[start..=end])?;
        if result.total_score > 100 {
            return Err(ReviewError::ScoreOutOfRange(result.total_score));
        }
        Ok(result)
    }

    pub fn issues_at(&self, level: IssueLevel) -> impl Iterator<Item = &ReviewIssue> {
        self.issues.iter().filter(move |issue| issue.level == level)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ReviewError {
    #[error("review response does not contain a JSON object")]
    MissingPayload,
    #[error("review payload is malformed: {0}")]
    Malformed(#[from] serde_json::Error),
    #[error("review total score {0} exceeds 100")]
    ScoreOutOfRange(u8),
}
