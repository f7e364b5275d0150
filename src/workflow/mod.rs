//! Document-request status workflow.
//!
//! A request moves `en attente` -> `en cours` -> `accepté`, and may be
//! `refusé` from either of the first two states. `accepté` and `refusé`
//! are terminal. Each state owns one progress step; entering a state marks
//! its step completed, earlier steps are never rolled back.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum WorkflowError {
    #[error("invalid status transition from '{from}' to '{to}'")]
    InvalidTransition { from: String, to: String },

    #[error("unknown status: {0}")]
    UnknownStatus(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DocumentStatus {
    #[serde(rename = "en attente")]
    Pending,
    #[serde(rename = "en cours")]
    InProgress,
    #[serde(rename = "accepté")]
    Accepted,
    #[serde(rename = "refusé")]
    Refused,
}

impl DocumentStatus {
    /// Workflow order; also the order of the progress steps.
    pub const ALL: [DocumentStatus; 4] = [
        DocumentStatus::Pending,
        DocumentStatus::InProgress,
        DocumentStatus::Accepted,
        DocumentStatus::Refused,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            DocumentStatus::Pending => "en attente",
            DocumentStatus::InProgress => "en cours",
            DocumentStatus::Accepted => "accepté",
            DocumentStatus::Refused => "refusé",
        }
    }

    pub fn parse(value: &str) -> Result<Self, WorkflowError> {
        Self::ALL
            .into_iter()
            .find(|status| status.as_str() == value)
            .ok_or_else(|| WorkflowError::UnknownStatus(value.to_string()))
    }

    pub fn can_transition_to(&self, next: DocumentStatus) -> bool {
        matches!(
            (self, next),
            (DocumentStatus::Pending, DocumentStatus::InProgress)
                | (DocumentStatus::Pending, DocumentStatus::Refused)
                | (DocumentStatus::InProgress, DocumentStatus::Accepted)
                | (DocumentStatus::InProgress, DocumentStatus::Refused)
        )
    }
}

impl std::fmt::Display for DocumentStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Checks a requested status name against the transition table. A name
/// outside the four known statuses is an unknown status, not a transition.
pub fn validate_transition(current: DocumentStatus, requested: &str) -> Result<DocumentStatus, WorkflowError> {
    let next = DocumentStatus::parse(requested.trim())?;
    if current.can_transition_to(next) {
        Ok(next)
    } else {
        Err(WorkflowError::InvalidTransition {
            from: current.as_str().to_string(),
            to: next.as_str().to_string(),
        })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProgressStep {
    pub step: DocumentStatus,
    pub date: Option<DateTime<Utc>>,
    pub completed: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatusTrack {
    pub current: DocumentStatus,
    pub progress: Vec<ProgressStep>,
}

impl StatusTrack {
    /// Fresh track for a request submitted at `submitted_at`: all four steps
    /// present, only the first one completed.
    pub fn new(submitted_at: DateTime<Utc>) -> Self {
        let progress = DocumentStatus::ALL
            .into_iter()
            .map(|step| {
                let initial = step == DocumentStatus::Pending;
                ProgressStep {
                    step,
                    date: initial.then_some(submitted_at),
                    completed: initial,
                }
            })
            .collect();

        Self {
            current: DocumentStatus::Pending,
            progress,
        }
    }

    /// Moves to `requested` and completes its step. On error nothing changes.
    pub fn transition(&mut self, requested: &str, at: DateTime<Utc>) -> Result<DocumentStatus, WorkflowError> {
        let next = validate_transition(self.current, requested)?;

        self.current = next;
        if let Some(step) = self.progress.iter_mut().find(|s| s.step == next) {
            step.completed = true;
            step.date = Some(at);
        }
        Ok(next)
    }

    pub fn step(&self, status: DocumentStatus) -> Option<&ProgressStep> {
        self.progress.iter().find(|s| s.step == status)
    }
}
