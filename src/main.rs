use clap::{Parser, Subcommand};
use modfeed::config::DEFAULT_CONFIG_FILE;
use modfeed::core::ModfeedError;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

mod cli;

#[derive(Parser)]
#[command(name = "modfeed")]
#[command(about = "Mirror upstream GitHub releases into a module update feed")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Publish update.json and changelog.md for every configured repository
    Update {
        /// Feed configuration file (.json, .yaml or .yml)
        #[arg(short, long, default_value = DEFAULT_CONFIG_FILE)]
        config: PathBuf,
        /// Output directory (overrides output_dir from the config)
        #[arg(short, long)]
        output: Option<PathBuf>,
        /// Public base URL of the output directory (overrides raw_base_url)
        #[arg(long)]
        raw_base_url: Option<String>,
        /// GitHub API base URL (overrides api_url)
        #[arg(long)]
        api_url: Option<String>,
        /// Only update these repositories (by name, repeatable)
        #[arg(long)]
        only: Vec<String>,
        /// Resolve releases without downloading or writing anything
        #[arg(long)]
        dry_run: bool,
    },
    /// Re-encode a local zip archive with every entry stored uncompressed
    Repack {
        /// Archive to read
        input: PathBuf,
        /// Archive to write (may equal the input)
        output: PathBuf,
        /// Entry the archive is expected to contain
        #[arg(long, default_value = "module.prop")]
        required_entry: String,
    },
    /// Print the version code derived from a release tag
    VersionCode {
        /// Release tag, e.g. v1.2.3
        tag: String,
    },
}

#[tokio::main]
async fn main() -> ExitCode {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Update {
            config,
            output,
            raw_base_url,
            api_url,
            only,
            dry_run,
        } => {
            cli::update::run(cli::update::UpdateArgs {
                config,
                output,
                raw_base_url,
                api_url,
                only,
                dry_run,
            })
            .await
        }
        Commands::Repack {
            input,
            output,
            required_entry,
        } => cli::repack::run(&input, &output, &required_entry),
        Commands::VersionCode { tag } => cli::version_code::run(&tag),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            match &e {
                // Per-repository errors were already reported in the summary
                ModfeedError::UpdateFailed(_) => eprintln!("\n❌ {}", e),
                _ => eprintln!("\nError: {}", e),
            }
            ExitCode::FAILURE
        }
    }
}
