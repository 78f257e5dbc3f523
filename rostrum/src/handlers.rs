use anyhow::{Context, anyhow};
use clap::ArgMatches;
use colored::Colorize;
use rostrum_core::StageError;
use rostrum_core::crawl::{UpdateOptions, execute_update};
use rostrum_core::extract::{ExtractOptions, execute_extract};
use rostrum_core::report::{
    describe_status, generate_extract_report, generate_retrieve_report, generate_update_report,
};
use rostrum_core::retrieve::{RetrieveOptions, execute_retrieve, parse_keywords};
use std::path::PathBuf;
use tracing::debug;
use tracing_subscriber::EnvFilter;
use url::Url;

/// Exit status for a required input file that does not exist (sysexits EX_NOINPUT)
pub const EXIT_MISSING_INPUT: i32 = 66;
pub const EXIT_FAILURE: i32 = 1;

/// Install the stderr log subscriber. `RUST_LOG` overrides the verbosity flag.
pub fn init_logging(verbosity: u8) {
    let default_level = match verbosity {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    // try_init so repeated calls (tests) don't panic
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

/// Expand a leading `~` in a user supplied path
pub fn expand_path(raw: &str) -> PathBuf {
    PathBuf::from(shellexpand::tilde(raw).as_ref())
}

pub fn exit_code_for(error: &anyhow::Error) -> i32 {
    match error.downcast_ref::<StageError>() {
        Some(stage_error) if stage_error.is_missing_input() => EXIT_MISSING_INPUT,
        _ => EXIT_FAILURE,
    }
}

pub fn print_error(error: &anyhow::Error) {
    eprintln!("{} {:#}", "error:".red().bold(), error);
}

fn required_path(args: &ArgMatches, id: &str) -> anyhow::Result<PathBuf> {
    args.get_one::<String>(id)
        .map(|raw| expand_path(raw))
        .ok_or_else(|| anyhow!("missing required argument {}", id))
}

fn optional_path(args: &ArgMatches, id: &str) -> Option<PathBuf> {
    args.get_one::<String>(id).map(|raw| expand_path(raw))
}

fn timeout_secs(args: &ArgMatches) -> u64 {
    args.get_one::<u64>("timeout").copied().unwrap_or(30)
}

pub async fn handle_update(args: &ArgMatches) -> anyhow::Result<()> {
    let start_url = args
        .get_one::<Url>("START_URL")
        .ok_or_else(|| anyhow!("missing required argument START_URL"))?;
    let candidate_list = required_path(args, "CANDIDATE_LIST")?;
    let quiet = args.get_flag("quiet");

    let mut options = UpdateOptions::new(start_url.as_str(), candidate_list);
    options.page_cache = optional_path(args, "page-cache");
    options.page_limit = args.get_one::<usize>("limit").copied();
    options.from_scratch = args.get_flag("from-scratch");
    options.strict = args.get_flag("strict");
    options.timeout_secs = timeout_secs(args);
    options.show_progress_bars = !quiet;

    debug!("update options: {:?}", options);
    let summary = execute_update(options)
        .await
        .context("failed to update the candidate list")?;

    if !quiet {
        println!("{}", generate_update_report(&summary));
    }
    if !summary.status.is_completed() {
        eprintln!(
            "{} crawl {}; rerun to resume",
            "warning:".yellow().bold(),
            describe_status(&summary.status)
        );
    }

    Ok(())
}

pub async fn handle_retrieve(args: &ArgMatches) -> anyhow::Result<()> {
    let candidate_list = required_path(args, "CANDIDATE_LIST")?;
    let raw_articles = required_path(args, "RAW_ARTICLES")?;
    let keywords = args
        .get_one::<String>("KEYWORDS")
        .map(|raw| parse_keywords(raw))
        .unwrap_or_default();
    let quiet = args.get_flag("quiet");

    let mut options = RetrieveOptions::new(candidate_list, keywords, raw_articles);
    options.strict = args.get_flag("strict");
    options.timeout_secs = timeout_secs(args);
    options.show_progress_bars = !quiet;

    let summary = execute_retrieve(options)
        .await
        .context("failed to retrieve articles")?;

    if !quiet {
        println!("{}", generate_retrieve_report(&summary));
    }

    Ok(())
}

pub fn handle_extract(args: &ArgMatches) -> anyhow::Result<()> {
    let raw_articles = required_path(args, "RAW_ARTICLES")?;
    let corpus = required_path(args, "SPEECH_CORPUS")?;
    let quiet = args.get_flag("quiet");

    let mut options = ExtractOptions::new(raw_articles, corpus);
    options.articles_out = optional_path(args, "articles-out");
    options.transcripts_only = args.get_flag("transcripts-only");

    let summary = execute_extract(options).context("failed to extract speeches")?;

    if !quiet {
        println!("{}", generate_extract_report(&summary));
    }

    Ok(())
}
