use crate::{
    Effect, FinishReason, HarvestState, Msg, Page, PageOutcome, PageReport, Phase, RetryDecision,
};

/// Pure update function: applies a message to state and returns any effects.
pub fn update(mut state: HarvestState, msg: Msg) -> (HarvestState, Vec<Effect>) {
    let effects = match (state.phase().clone(), msg) {
        (Phase::Idle, Msg::Start) => {
            state.begin();
            vec![Effect::Fetch(state.current_query())]
        }
        (Phase::Fetching, Msg::PageFetched(raw)) => match Page::from_rows(raw) {
            PageOutcome::Exhausted => finish(&mut state, FinishReason::Exhausted),
            PageOutcome::Batch(page) => {
                let fetched = page.records.len();
                let added = state.accept_page(page.records, page.resume_key);
                let report = PageReport {
                    page: state.pages(),
                    fetched,
                    added,
                    total_unique: state.results().len(),
                    next_resume_key: state.resume_key().cloned(),
                };

                let mut effects = vec![Effect::Report(report)];
                if state.resume_key().is_some() {
                    effects.push(Effect::Fetch(state.current_query()));
                } else {
                    effects.extend(finish(&mut state, FinishReason::Completed));
                }
                effects
            }
        },
        (Phase::Fetching, Msg::TimedOut) => {
            // The cursor stays put: the last merged page is the only safe checkpoint.
            let timeouts = state.record_timeout();
            match state.retry_policy().next(timeouts) {
                RetryDecision::Retry { after } => vec![
                    Effect::Wait {
                        after,
                        timeouts,
                        resume_key: state.resume_key().cloned(),
                    },
                    Effect::Fetch(state.current_query()),
                ],
                RetryDecision::GiveUp => {
                    finish(&mut state, FinishReason::RetriesExhausted { timeouts })
                }
            }
        }
        (Phase::Fetching, Msg::Failed(message)) => {
            finish(&mut state, FinishReason::Aborted { message })
        }
        _ => Vec::new(),
    };

    (state, effects)
}

fn finish(state: &mut HarvestState, reason: FinishReason) -> Vec<Effect> {
    state.finish(reason.clone());
    vec![Effect::Finish(reason)]
}
