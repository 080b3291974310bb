use std::time::Duration;

use crate::{CdxQuery, ResumeKey};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    Fetch(CdxQuery),
    Wait {
        after: Duration,
        timeouts: u32,
        resume_key: Option<ResumeKey>,
    },
    Report(PageReport),
    Finish(FinishReason),
}

/// Progress after one merged page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageReport {
    pub page: usize,
    pub fetched: usize,
    pub added: usize,
    pub total_unique: usize,
    pub next_resume_key: Option<ResumeKey>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FinishReason {
    /// The index returned a page with no data rows.
    Exhausted,
    /// The last page carried no resume key.
    Completed,
    Aborted { message: String },
    RetriesExhausted { timeouts: u32 },
}

impl FinishReason {
    /// True when every page was retrieved.
    pub fn is_complete(&self) -> bool {
        matches!(self, FinishReason::Exhausted | FinishReason::Completed)
    }
}
