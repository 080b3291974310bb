use std::time::Duration;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RetryDecision {
    Retry { after: Duration },
    GiveUp,
}

/// Fixed-delay retry for timed out page requests.
///
/// `max_retries: None` retries forever, which is the default.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    pub delay: Duration,
    pub max_retries: Option<u32>,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            delay: Duration::from_secs(5),
            max_retries: None,
        }
    }
}

impl RetryPolicy {
    /// Decide what to do after `consecutive_timeouts` timeouts in a row on one page.
    pub fn next(&self, consecutive_timeouts: u32) -> RetryDecision {
        match self.max_retries {
            Some(max) if consecutive_timeouts > max => RetryDecision::GiveUp,
            _ => RetryDecision::Retry { after: self.delay },
        }
    }
}
