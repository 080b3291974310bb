//! `wayback_harvester`: collect every archived URL for a domain from the
//! Wayback Machine CDX index.
//!
//! ```bash
//! wayback_harvester example.com
//! wayback_harvester example.com --page-size 1000 --max-retries 20 --log both
//! ```

mod cli;
mod logging;

use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use engine_logging::{engine_info, engine_warn};
use harvester_core::Domain;
use harvester_engine::{write_url_list, Harvester, LogProgressSink, ReqwestIndexClient};

use crate::cli::Cli;

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    logging::initialize(cli.log, cli.verbose);

    let stdin = io::stdin();
    let (path, count) = run(&cli, stdin.lock(), io::stdout()).await?;
    println!("\nDone. {} unique URLs saved to {}", count, path.display());
    Ok(())
}

/// Resolve the domain, harvest it, and write the list. Returns the output path
/// and the number of URLs written.
async fn run<R: BufRead, W: Write>(cli: &Cli, input: R, prompt: W) -> Result<(PathBuf, usize)> {
    let domain = resolve_domain(cli.domain.as_deref(), input, prompt)?;
    let output_dir = match &cli.output_dir {
        Some(dir) => dir.clone(),
        None => std::env::current_dir().context("failed to resolve current directory")?,
    };

    let client =
        ReqwestIndexClient::new(cli.fetch_settings()).context("failed to build CDX client")?;
    let harvester = Harvester::new(client, cli.harvest_config());

    engine_info!("Harvesting unique archived URLs for {}", domain);
    let report = harvester.run(&domain, &LogProgressSink).await;
    if !report.reason.is_complete() {
        engine_warn!(
            "Harvest incomplete after {} pages, saving {} URLs collected so far",
            report.pages,
            report.results.len()
        );
    }

    let path = write_url_list(&output_dir, &domain, &report.results)
        .with_context(|| format!("failed to write URL list to {}", output_dir.display()))?;
    Ok((path, report.results.len()))
}

/// Use the positional argument, or ask for a domain on `prompt` and read one line.
fn resolve_domain<R: BufRead, W: Write>(
    arg: Option<&str>,
    mut input: R,
    mut prompt: W,
) -> Result<Domain> {
    let raw = match arg {
        Some(arg) => arg.to_string(),
        None => {
            write!(prompt, "Enter domain (e.g. example.com): ")?;
            prompt.flush()?;
            let mut line = String::new();
            input.read_line(&mut line).context("failed to read domain")?;
            line.trim().to_string()
        }
    };
    Domain::parse(&raw).context("No domain entered, exiting.")
}

#[cfg(test)]
mod tests {
    use super::*;
    use harvester_core::DomainError;
    use std::io::Cursor;

    #[test]
    fn positional_argument_skips_the_prompt() {
        let mut prompt = Vec::new();
        let domain = resolve_domain(Some("example.com"), Cursor::new(""), &mut prompt).unwrap();
        assert_eq!(domain.as_str(), "example.com");
        assert!(prompt.is_empty());
    }

    #[test]
    fn positional_argument_is_used_verbatim() {
        let domain = resolve_domain(Some(" example.com"), Cursor::new(""), Vec::new()).unwrap();
        assert_eq!(domain.as_str(), " example.com");

        let err = resolve_domain(Some(""), Cursor::new("example.com\n"), Vec::new()).unwrap_err();
        assert_eq!(err.downcast_ref::<DomainError>(), Some(&DomainError::Empty));
    }

    #[test]
    fn prompt_reads_one_trimmed_line() {
        let mut prompt = Vec::new();
        let domain =
            resolve_domain(None, Cursor::new("  example.org \nignored\n"), &mut prompt).unwrap();
        assert_eq!(domain.as_str(), "example.org");
        assert_eq!(
            String::from_utf8(prompt).unwrap(),
            "Enter domain (e.g. example.com): "
        );
    }

    #[test]
    fn empty_answer_is_an_error() {
        let err = resolve_domain(None, Cursor::new("\n"), Vec::new()).unwrap_err();
        assert_eq!(err.downcast_ref::<DomainError>(), Some(&DomainError::Empty));

        let err = resolve_domain(None, Cursor::new(""), Vec::new()).unwrap_err();
        assert!(err.to_string().contains("No domain entered"));
    }

    #[tokio::test]
    async fn missing_domain_writes_nothing() {
        let temp = tempfile::TempDir::new().unwrap();
        let cli = Cli::try_parse_from([
            "wayback_harvester",
            "--output-dir",
            temp.path().to_str().unwrap(),
            // Unroutable so an accidental request fails fast.
            "--endpoint",
            "http://127.0.0.1:9/cdx",
        ])
        .unwrap();

        let result = run(&cli, Cursor::new("   \n"), Vec::new()).await;

        assert!(result.is_err());
        assert_eq!(std::fs::read_dir(temp.path()).unwrap().count(), 0);
    }

    #[test]
    fn flags_override_defaults() {
        let cli = Cli::try_parse_from([
            "wayback_harvester",
            "example.com",
            "--page-size",
            "250",
            "--timeout-secs",
            "15",
            "--retry-delay-secs",
            "0",
            "--max-retries",
            "3",
            "--no-collapse",
        ])
        .unwrap();

        let config = cli.harvest_config();
        assert_eq!(config.page_size, 250);
        assert!(!config.collapse);
        assert_eq!(config.retry.delay, std::time::Duration::ZERO);
        assert_eq!(config.retry.max_retries, Some(3));
        assert_eq!(
            cli.fetch_settings().read_timeout,
            std::time::Duration::from_secs(15)
        );
    }

    #[test]
    fn defaults_apply_when_flags_are_absent() {
        let cli = Cli::try_parse_from(["wayback_harvester", "example.com"]).unwrap();
        let config = cli.harvest_config();
        assert_eq!(config.page_size, 5000);
        assert!(config.collapse);
        assert_eq!(config.retry.delay, std::time::Duration::from_secs(5));
        assert_eq!(config.retry.max_retries, None);
        assert_eq!(
            cli.fetch_settings().read_timeout,
            std::time::Duration::from_secs(120)
        );
        assert_eq!(
            cli.fetch_settings().max_bytes,
            5000 * harvester_engine::FetchSettings::BYTES_PER_RECORD
        );
        assert!(Cli::try_parse_from(["wayback_harvester", "x.com", "--page-size", "0"]).is_err());
    }
}
