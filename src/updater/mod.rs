//! The feed update pipeline
//!
//! For every configured repository, in order: look up the latest release,
//! pick the zip asset, derive the version code, optionally repack the archive
//! into the feed, then publish the changelog and `update.json`.

pub mod report;

use crate::config::RepositoryConfig;
use crate::core::{ModfeedError, ModfeedResult};
use crate::di::GitHubProvider;
use crate::package::repacker::repack_archive;
use crate::publish::{FeedWriter, UpdateManifest};
use crate::release::{select_asset, version_code};
use std::sync::Arc;
use tracing::{info, warn};

pub use report::{RepoOutcome, RepoReport, RunReport};

/// Knobs for a single run
#[derive(Debug, Clone, Default)]
pub struct UpdateOptions {
    /// Resolve releases but write and download nothing
    pub dry_run: bool,
    /// Only process repositories with these names (all when empty)
    pub only: Vec<String>,
}

/// Runs the pipeline against a [`GitHubProvider`] and a [`FeedWriter`]
pub struct Updater {
    github: Arc<dyn GitHubProvider>,
    writer: FeedWriter,
    required_entry: String,
    options: UpdateOptions,
}

impl Updater {
    pub fn new(github: Arc<dyn GitHubProvider>, writer: FeedWriter, required_entry: &str) -> Self {
        Self {
            github,
            writer,
            required_entry: required_entry.to_string(),
            options: UpdateOptions::default(),
        }
    }

    pub fn with_options(mut self, options: UpdateOptions) -> Self {
        self.options = options;
        self
    }

    /// Repositories this run will process, in configuration order
    ///
    /// Entries whose URL cannot be parsed are kept so they surface as failures.
    pub fn selected<'a>(&self, repos: &'a [RepositoryConfig]) -> Vec<&'a RepositoryConfig> {
        repos
            .iter()
            .filter(|repo| {
                self.options.only.is_empty()
                    || repo
                        .name()
                        .map(|name| self.options.only.iter().any(|o| o == &name))
                        .unwrap_or(false)
            })
            .collect()
    }

    /// Process every selected repository sequentially
    ///
    /// A failing repository is recorded and the run moves on.
    pub async fn run(&self, repos: &[RepositoryConfig]) -> RunReport {
        let mut report = RunReport::default();
        for repo in self.selected(repos) {
            report.push(self.process(repo).await);
        }
        report
    }

    /// Process one repository and turn any error into a report entry
    pub async fn process(&self, repo: &RepositoryConfig) -> RepoReport {
        let name = repo.name().unwrap_or_else(|_| repo.url.clone());

        let outcome = match self.update_repository(repo).await {
            Ok(outcome) => outcome,
            Err(ModfeedError::NotFound(_)) => {
                info!(repo = %name, "no published release");
                RepoOutcome::Skipped {
                    reason: "no published release".to_string(),
                }
            }
            Err(e) => {
                warn!(repo = %name, error = %e, "update failed");
                RepoOutcome::Failed {
                    error: e.to_string(),
                }
            }
        };

        RepoReport { name, outcome }
    }

    /// Run the pipeline for one repository
    pub async fn update_repository(&self, repo: &RepositoryConfig) -> ModfeedResult<RepoOutcome> {
        let (owner, name) = repo.repo_slug()?;
        info!(repo = %name, owner = %owner, "checking latest release");

        let release = self.github.get_latest_release(&owner, &name).await?;

        let Some(asset) = select_asset(&release, repo.keyword.as_deref()) else {
            let reason = match repo.keyword.as_deref() {
                Some(keyword) => format!("no .zip asset matching '{}' in {}", keyword, release.tag_name),
                None => format!("no .zip asset in {}", release.tag_name),
            };
            info!(repo = %name, %reason, "skipping");
            return Ok(RepoOutcome::Skipped { reason });
        };

        let code = version_code(&release.tag_name);
        let zip_url = if repo.repack {
            self.writer.module_zip_url(&name)
        } else {
            asset.browser_download_url.clone()
        };

        if self.options.dry_run {
            return Ok(RepoOutcome::DryRun(UpdateManifest {
                version: release.tag_name.clone(),
                version_code: code,
                zip_url,
                changelog: self.writer.changelog_url(&name),
            }));
        }

        if repo.repack {
            let data = self.github.download_asset(&asset.browser_download_url).await?;
            let dest = self.writer.module_zip_path(&name);
            let repacked = repack_archive(&data, &dest, &self.required_entry)?;
            info!(
                repo = %name,
                asset = %asset.name,
                entries = repacked.entries.len(),
                "mirrored repacked archive"
            );
        }

        let changelog = self.writer.write_changelog(&name, release.changelog())?;
        let manifest = UpdateManifest {
            version: release.tag_name.clone(),
            version_code: code,
            zip_url,
            changelog,
        };
        self.writer.write_manifest(&name, &manifest)?;

        info!(repo = %name, version = %manifest.version, version_code = code, "published update");
        Ok(RepoOutcome::Updated(manifest))
    }
}
