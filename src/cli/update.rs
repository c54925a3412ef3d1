use indicatif::{ProgressBar, ProgressStyle};
use modfeed::config::FeedConfig;
use modfeed::core::{ModfeedError, ModfeedResult};
use modfeed::github::GitHubClient;
use modfeed::publish::FeedWriter;
use modfeed::updater::{RunReport, UpdateOptions, Updater};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::debug;

/// Options for the update command
pub struct UpdateArgs {
    pub config: PathBuf,
    pub output: Option<PathBuf>,
    pub raw_base_url: Option<String>,
    pub api_url: Option<String>,
    pub only: Vec<String>,
    pub dry_run: bool,
}

pub async fn run(args: UpdateArgs) -> ModfeedResult<()> {
    let mut config = FeedConfig::load(&args.config)?;

    // Command-line flags win over the config file
    if let Some(output) = args.output {
        config.output_dir = output;
    }
    if let Some(raw_base_url) = args.raw_base_url {
        config.raw_base_url = raw_base_url;
    }
    if let Some(api_url) = args.api_url {
        config.api_url = api_url;
    }

    if config.repositories.is_empty() {
        println!("No repositories configured in {}", args.config.display());
        return Ok(());
    }

    let github = GitHubClient::from_env(&config.api_url)?;
    if !github.has_token() {
        debug!("no GH_TOKEN or GITHUB_TOKEN set, using the unauthenticated rate limit");
    }

    let writer = FeedWriter::new(&config.output_dir, &config.raw_base_url);
    let updater = Updater::new(Arc::new(github), writer, &config.required_entry).with_options(
        UpdateOptions {
            dry_run: args.dry_run,
            only: args.only,
        },
    );

    let selected = updater.selected(&config.repositories);
    if selected.is_empty() {
        println!("No configured repository matches the --only filter");
        return Ok(());
    }

    if args.dry_run {
        println!("Dry run: nothing will be downloaded or written");
    }
    println!("Checking {} repositories...", selected.len());

    let pb = ProgressBar::new(selected.len() as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("[{elapsed_precise}] {bar:40.cyan/blue} {pos}/{len} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_bar())
            .progress_chars("#>-"),
    );

    let mut report = RunReport::default();
    for repo in selected {
        pb.set_message(repo.url.clone());
        report.push(updater.process(repo).await);
        pb.inc(1);
    }
    pb.finish_and_clear();

    for repo_report in &report.repos {
        println!("  {}", repo_report);
    }
    println!("\n{}", report);

    if report.has_failures() {
        return Err(ModfeedError::UpdateFailed(report.failed()));
    }

    Ok(())
}
