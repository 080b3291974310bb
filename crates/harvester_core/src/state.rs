use crate::{CdxQuery, Domain, FinishReason, ResultSet, ResumeKey, RetryPolicy};

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Phase {
    #[default]
    Idle,
    Fetching,
    Finished(FinishReason),
}

/// Everything one harvest run knows: the accumulated URLs and the cursor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HarvestState {
    domain: Domain,
    page_size: u32,
    collapse: bool,
    retry: RetryPolicy,
    results: ResultSet,
    resume_key: Option<ResumeKey>,
    pages: usize,
    consecutive_timeouts: u32,
    phase: Phase,
}

impl HarvestState {
    pub fn new(domain: Domain, page_size: u32, collapse: bool, retry: RetryPolicy) -> Self {
        Self {
            domain,
            page_size,
            collapse,
            retry,
            results: ResultSet::new(),
            resume_key: None,
            pages: 0,
            consecutive_timeouts: 0,
            phase: Phase::Idle,
        }
    }

    pub fn results(&self) -> &ResultSet {
        &self.results
    }

    pub fn into_results(self) -> ResultSet {
        self.results
    }

    pub fn resume_key(&self) -> Option<&ResumeKey> {
        self.resume_key.as_ref()
    }

    /// Pages merged so far.
    pub fn pages(&self) -> usize {
        self.pages
    }

    pub fn phase(&self) -> &Phase {
        &self.phase
    }

    pub fn is_finished(&self) -> bool {
        matches!(self.phase, Phase::Finished(_))
    }

    /// The request for the current cursor position.
    pub fn current_query(&self) -> CdxQuery {
        CdxQuery::new(
            self.domain.clone(),
            self.page_size,
            self.collapse,
            self.resume_key.clone(),
        )
    }

    pub(crate) fn retry_policy(&self) -> &RetryPolicy {
        &self.retry
    }

    pub(crate) fn begin(&mut self) {
        self.phase = Phase::Fetching;
    }

    pub(crate) fn finish(&mut self, reason: FinishReason) {
        self.phase = Phase::Finished(reason);
    }

    /// Merge a page and move the cursor. Returns the number of new URLs.
    pub(crate) fn accept_page(&mut self, records: Vec<String>, next: Option<ResumeKey>) -> usize {
        self.pages += 1;
        self.consecutive_timeouts = 0;
        self.resume_key = next;
        self.results.merge(records)
    }

    pub(crate) fn record_timeout(&mut self) -> u32 {
        self.consecutive_timeouts += 1;
        self.consecutive_timeouts
    }
}
