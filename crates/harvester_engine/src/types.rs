use std::fmt;
use std::time::Duration;

use harvester_core::{FinishReason, PageReport, ResumeKey};

/// Observable progress of a harvest run. Not part of the result.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HarvestEvent {
    PageMerged(PageReport),
    RetryScheduled {
        after: Duration,
        timeouts: u32,
        resume_key: Option<ResumeKey>,
    },
    Finished {
        reason: FinishReason,
        total_unique: usize,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{kind}: {message}")]
pub struct FetchError {
    pub kind: FailureKind,
    pub message: String,
}

impl FetchError {
    pub fn new(kind: FailureKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }

    /// Only timeouts are worth retrying with the same cursor.
    pub fn is_transient(&self) -> bool {
        self.kind == FailureKind::Timeout
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FailureKind {
    InvalidUrl,
    HttpStatus(u16),
    Timeout,
    TooLarge { max_bytes: u64, actual: Option<u64> },
    Decode,
    Network,
}

impl fmt::Display for FailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FailureKind::InvalidUrl => write!(f, "invalid url"),
            FailureKind::HttpStatus(code) => write!(f, "http status {code}"),
            FailureKind::Timeout => write!(f, "timeout"),
            FailureKind::TooLarge { max_bytes, actual } => {
                write!(f, "response too large (max {max_bytes}, actual {actual:?})")
            }
            FailureKind::Decode => write!(f, "malformed response body"),
            FailureKind::Network => write!(f, "network error"),
        }
    }
}
