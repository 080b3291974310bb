//! Harvester core: pure pagination state machine and CDX page parsing.
mod domain;
mod effect;
mod msg;
mod query;
mod result_set;
mod retry;
mod row;
mod state;
mod update;

pub use domain::{Domain, DomainError};
pub use effect::{Effect, FinishReason, PageReport};
pub use msg::Msg;
pub use query::{CdxQuery, ResumeKey, DEFAULT_PAGE_SIZE};
pub use result_set::ResultSet;
pub use retry::{RetryDecision, RetryPolicy};
pub use row::{classify_rows, Page, PageOutcome, RawRow, Row};
pub use state::{HarvestState, Phase};
pub use update::update;
