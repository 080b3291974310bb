use std::collections::VecDeque;

use engine_logging::{engine_debug, engine_error, engine_info, engine_warn};
use harvester_core::{
    update, Domain, Effect, FinishReason, HarvestState, Msg, Phase, ResultSet, RetryPolicy,
    DEFAULT_PAGE_SIZE,
};

use crate::{HarvestEvent, IndexClient};

#[derive(Debug, Clone)]
pub struct HarvestConfig {
    pub page_size: u32,
    pub collapse: bool,
    pub retry: RetryPolicy,
}

impl Default for HarvestConfig {
    fn default() -> Self {
        Self {
            page_size: DEFAULT_PAGE_SIZE,
            collapse: true,
            retry: RetryPolicy::default(),
        }
    }
}

pub trait ProgressSink: Send + Sync {
    fn emit(&self, event: HarvestEvent);
}

/// Reports progress through the global logger.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogProgressSink;

impl ProgressSink for LogProgressSink {
    fn emit(&self, event: HarvestEvent) {
        match event {
            HarvestEvent::PageMerged(report) => {
                let next = report
                    .next_resume_key
                    .as_ref()
                    .map(|key| key.as_str())
                    .unwrap_or("none");
                engine_info!(
                    "Page {}: fetched {} records, total unique so far: {}, next resumeKey={}",
                    report.page,
                    report.fetched,
                    report.total_unique,
                    next
                );
            }
            HarvestEvent::RetryScheduled {
                after,
                timeouts,
                resume_key,
            } => {
                let key = resume_key
                    .as_ref()
                    .map(|key| key.as_str())
                    .unwrap_or("none");
                engine_warn!(
                    "Timeout #{} for resumeKey={}, retrying in {:?}",
                    timeouts,
                    key,
                    after
                );
            }
            HarvestEvent::Finished {
                reason,
                total_unique,
            } => match reason {
                FinishReason::Exhausted | FinishReason::Completed => {
                    engine_info!("Harvest complete: {} unique URLs", total_unique);
                }
                FinishReason::Aborted { message } => {
                    engine_error!(
                        "Error fetching CDX data: {}, stopping harvest with {} unique URLs",
                        message,
                        total_unique
                    );
                }
                FinishReason::RetriesExhausted { timeouts } => {
                    engine_error!(
                        "Gave up after {} consecutive timeouts, stopping harvest with {} unique URLs",
                        timeouts,
                        total_unique
                    );
                }
            },
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HarvestReport {
    pub results: ResultSet,
    pub reason: FinishReason,
    /// Pages merged into `results`.
    pub pages: usize,
    /// Requests issued, retries included.
    pub requests: usize,
}

/// Drives the pagination state machine against an [`IndexClient`].
pub struct Harvester<C> {
    client: C,
    config: HarvestConfig,
}

impl<C: IndexClient> Harvester<C> {
    pub fn new(client: C, config: HarvestConfig) -> Self {
        Self { client, config }
    }

    pub fn client(&self) -> &C {
        &self.client
    }

    /// Fetch every page for `domain`.
    ///
    /// Never fails: whatever was merged before an unrecoverable error is returned
    /// together with the reason the run stopped.
    pub async fn run(&self, domain: &Domain, sink: &dyn ProgressSink) -> HarvestReport {
        let mut state = HarvestState::new(
            domain.clone(),
            self.config.page_size,
            self.config.collapse,
            self.config.retry,
        );
        let mut inbox = VecDeque::from([Msg::Start]);
        let mut requests = 0;

        while let Some(msg) = inbox.pop_front() {
            let (next, effects) = update(state, msg);
            state = next;

            for effect in effects {
                match effect {
                    Effect::Fetch(query) => {
                        requests += 1;
                        engine_debug!(
                            "request #{} resumeKey={:?}",
                            requests,
                            query.resume_key.as_ref().map(|key| key.as_str())
                        );
                        let reply = match self.client.fetch_page(&query).await {
                            Ok(rows) => Msg::PageFetched(rows),
                            Err(err) if err.is_transient() => Msg::TimedOut,
                            Err(err) => Msg::Failed(err.to_string()),
                        };
                        inbox.push_back(reply);
                    }
                    Effect::Wait {
                        after,
                        timeouts,
                        resume_key,
                    } => {
                        sink.emit(HarvestEvent::RetryScheduled {
                            after,
                            timeouts,
                            resume_key,
                        });
                        tokio::time::sleep(after).await;
                    }
                    Effect::Report(report) => sink.emit(HarvestEvent::PageMerged(report)),
                    Effect::Finish(reason) => sink.emit(HarvestEvent::Finished {
                        reason,
                        total_unique: state.results().len(),
                    }),
                }
            }
        }

        let reason = match state.phase() {
            Phase::Finished(reason) => reason.clone(),
            Phase::Idle | Phase::Fetching => FinishReason::Aborted {
                message: "harvest stopped without a result".to_string(),
            },
        };
        let pages = state.pages();

        HarvestReport {
            results: state.into_results(),
            reason,
            pages,
            requests,
        }
    }
}
