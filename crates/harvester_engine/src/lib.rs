//! Harvester engine: CDX index client, harvest driver and output sink.
mod fetch;
mod filename;
mod harvest;
mod output;
mod persist;
mod types;

pub use fetch::{FetchSettings, IndexClient, ReqwestIndexClient};
pub use filename::output_filename;
pub use harvest::{HarvestConfig, HarvestReport, Harvester, LogProgressSink, ProgressSink};
pub use output::{render_url_list, write_url_list};
pub use persist::{ensure_output_dir, AtomicFileWriter, PersistError};
pub use types::{FailureKind, FetchError, HarvestEvent};
