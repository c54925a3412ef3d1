use crate::publish::UpdateManifest;
use std::fmt;

/// What happened to one repository
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RepoOutcome {
    /// Manifest and changelog were published
    Updated(UpdateManifest),
    /// Dry run: the manifest that would have been published
    DryRun(UpdateManifest),
    /// Nothing to publish (no release, no matching asset)
    Skipped { reason: String },
    Failed { error: String },
}

#[derive(Debug, Clone)]
pub struct RepoReport {
    pub name: String,
    pub outcome: RepoOutcome,
}

/// Per-repository outcomes of one run, in processing order
#[derive(Debug, Clone, Default)]
pub struct RunReport {
    pub repos: Vec<RepoReport>,
}

impl RunReport {
    pub fn push(&mut self, report: RepoReport) {
        self.repos.push(report);
    }

    pub fn updated(&self) -> usize {
        self.count(|o| matches!(o, RepoOutcome::Updated(_) | RepoOutcome::DryRun(_)))
    }

    pub fn skipped(&self) -> usize {
        self.count(|o| matches!(o, RepoOutcome::Skipped { .. }))
    }

    pub fn failed(&self) -> usize {
        self.count(|o| matches!(o, RepoOutcome::Failed { .. }))
    }

    pub fn has_failures(&self) -> bool {
        self.failed() > 0
    }

    fn count(&self, pred: impl Fn(&RepoOutcome) -> bool) -> usize {
        self.repos.iter().filter(|r| pred(&r.outcome)).count()
    }
}

impl fmt::Display for RepoReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.outcome {
            RepoOutcome::Updated(m) => write!(
                f,
                "✓ {}: {} (versionCode {})",
                self.name, m.version, m.version_code
            ),
            RepoOutcome::DryRun(m) => write!(
                f,
                "• {}: would publish {} (versionCode {}) -> {}",
                self.name, m.version, m.version_code, m.zip_url
            ),
            RepoOutcome::Skipped { reason } => write!(f, "- {}: skipped ({})", self.name, reason),
            RepoOutcome::Failed { error } => write!(f, "✗ {}: {}", self.name, error),
        }
    }
}

impl fmt::Display for RunReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} updated, {} skipped, {} failed",
            self.updated(),
            self.skipped(),
            self.failed()
        )
    }
}
