//! Per-turn record of outbound relay attempts.

use crate::domain::foundation::UpstreamError;

use super::outbound::{DropReason, PlatformAction};

/// Result of relaying one directive or platform call.
#[derive(Debug, Clone, PartialEq)]
pub enum RelayOutcome {
    Sent,
    Dropped(DropReason),
    Failed(UpstreamError),
}

#[derive(Debug, Clone, PartialEq)]
pub struct RelayAttempt {
    /// Short description of what was attempted, for logs.
    pub description: String,
    pub outcome: RelayOutcome,
}

/// Outcomes of every outbound attempt made while handling one inbound event.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RelayReport {
    pub attempts: Vec<RelayAttempt>,
}

impl RelayReport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, description: impl Into<String>, outcome: RelayOutcome) {
        self.attempts.push(RelayAttempt {
            description: description.into(),
            outcome,
        });
    }

    pub fn sent(&self) -> usize {
        self.count(|o| matches!(o, RelayOutcome::Sent))
    }

    pub fn dropped(&self) -> usize {
        self.count(|o| matches!(o, RelayOutcome::Dropped(_)))
    }

    pub fn failed(&self) -> usize {
        self.count(|o| matches!(o, RelayOutcome::Failed(_)))
    }

    pub fn is_clean(&self) -> bool {
        self.failed() == 0
    }

    pub fn merge(&mut self, other: RelayReport) {
        self.attempts.extend(other.attempts);
    }

    fn count(&self, predicate: impl Fn(&RelayOutcome) -> bool) -> usize {
        self.attempts.iter().filter(|a| predicate(&a.outcome)).count()
    }
}

/// Log label for a platform call.
pub fn describe(action: &PlatformAction) -> String {
    match action {
        PlatformAction::Send(message) => match &message.content_type {
            Some(content_type) => format!("send {} message", content_type),
            None => "send text message".to_string(),
        },
        PlatformAction::Typing => "toggle typing".to_string(),
    }
}
