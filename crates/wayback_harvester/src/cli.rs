use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;
use harvester_core::RetryPolicy;
use harvester_engine::{FetchSettings, HarvestConfig};

use crate::logging::LogDestination;

/// Fetch every archived URL the Wayback Machine CDX index knows for a domain
/// and save the deduplicated, sorted list to `<domain>_urls.txt`.
///
/// Whatever was collected is written out even if the harvest stops early.
#[derive(Debug, Parser)]
#[command(name = "wayback_harvester", version)]
pub struct Cli {
    /// Domain to harvest, e.g. example.com. Prompted for when omitted.
    pub domain: Option<String>,

    /// Directory for the URL list. Defaults to the current directory.
    #[arg(long)]
    pub output_dir: Option<PathBuf>,

    /// Records requested per page. The response size cap grows with it.
    #[arg(long, value_parser = clap::value_parser!(u32).range(1..))]
    pub page_size: Option<u32>,

    /// Seconds a single read from the index may stay idle before the page is retried.
    #[arg(long)]
    pub timeout_secs: Option<u64>,

    /// Seconds to wait before retrying a timed out page.
    #[arg(long)]
    pub retry_delay_secs: Option<u64>,

    /// Give up after this many consecutive timeouts on one page. Unlimited by default.
    #[arg(long)]
    pub max_retries: Option<u32>,

    /// CDX endpoint to query.
    #[arg(long)]
    pub endpoint: Option<String>,

    /// Do not ask the index to collapse identical URLs.
    #[arg(long)]
    pub no_collapse: bool,

    /// Where log output goes.
    #[arg(long, value_enum, default_value_t = LogDestination::Terminal)]
    pub log: LogDestination,

    /// Enable debug logging.
    #[arg(short, long)]
    pub verbose: bool,
}

impl Cli {
    pub fn fetch_settings(&self) -> FetchSettings {
        let mut settings = FetchSettings::default();
        if let Some(endpoint) = &self.endpoint {
            settings.endpoint = endpoint.clone();
        }
        if let Some(secs) = self.timeout_secs {
            settings.read_timeout = Duration::from_secs(secs);
        }
        settings.sized_for_page(self.harvest_config().page_size)
    }

    pub fn harvest_config(&self) -> HarvestConfig {
        let defaults = HarvestConfig::default();
        let retry = RetryPolicy {
            delay: self
                .retry_delay_secs
                .map(Duration::from_secs)
                .unwrap_or(defaults.retry.delay),
            max_retries: self.max_retries.or(defaults.retry.max_retries),
        };
        HarvestConfig {
            page_size: self.page_size.unwrap_or(defaults.page_size),
            collapse: !self.no_collapse,
            retry,
        }
    }
}
