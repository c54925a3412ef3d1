use crate::core::{ModfeedError, ModfeedResult};
use serde::{Deserialize, Deserializer, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Default configuration file, relative to the working directory
pub const DEFAULT_CONFIG_FILE: &str = "config.json";

/// A single upstream repository mirrored into the feed
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RepositoryConfig {
    /// Repository URL, e.g. `https://github.com/owner/repo`
    pub url: String,

    /// Only pick zip assets whose lowercased name contains this keyword
    #[serde(
        default,
        deserialize_with = "deserialize_keyword",
        skip_serializing_if = "Option::is_none"
    )]
    pub keyword: Option<String>,

    /// Re-encode the release archive and publish the mirrored copy
    #[serde(default)]
    pub repack: bool,
}

/// Feed configuration loaded once per run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FeedConfig {
    pub repositories: Vec<RepositoryConfig>,

    /// Public base URL the output tree is served from
    #[serde(default = "default_raw_base_url")]
    pub raw_base_url: String,

    /// Local directory the feed is written into
    #[serde(default = "default_output_dir")]
    pub output_dir: PathBuf,

    /// GitHub API base URL
    #[serde(default = "default_api_url")]
    pub api_url: String,

    /// Entry every repacked archive is expected to contain
    #[serde(default = "default_required_entry")]
    pub required_entry: String,
}

fn default_raw_base_url() -> String {
    "https://raw.githubusercontent.com/misak10/mmrl-update/main/src".to_string()
}

fn default_output_dir() -> PathBuf {
    PathBuf::from("src")
}

fn default_api_url() -> String {
    "https://api.github.com".to_string()
}

fn default_required_entry() -> String {
    "module.prop".to_string()
}

/// Treat a missing, null or empty keyword as "no keyword"
fn deserialize_keyword<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let keyword: Option<String> = Option::deserialize(deserializer)?;
    Ok(keyword.filter(|k| !k.is_empty()))
}

impl Default for FeedConfig {
    fn default() -> Self {
        Self {
            repositories: Vec::new(),
            raw_base_url: default_raw_base_url(),
            output_dir: default_output_dir(),
            api_url: default_api_url(),
            required_entry: default_required_entry(),
        }
    }
}

impl FeedConfig {
    /// Load the feed configuration from a file
    ///
    /// `.yaml` / `.yml` files are parsed as YAML, everything else as JSON.
    pub fn load(path: &Path) -> ModfeedResult<Self> {
        if !path.exists() {
            return Err(ModfeedError::Config(format!(
                "Config file not found: {}",
                path.display()
            )));
        }

        let content = fs::read_to_string(path)?;
        let is_yaml = matches!(
            path.extension().and_then(|e| e.to_str()),
            Some("yaml") | Some("yml")
        );

        let parsed = if is_yaml {
            Self::from_yaml(&content)
        } else {
            Self::from_json(&content)
        };

        parsed.map_err(|e| ModfeedError::Config(format!("Failed to parse {}: {}", path.display(), e)))
    }

    pub fn from_json(content: &str) -> ModfeedResult<Self> {
        Ok(serde_json::from_str(content)?)
    }

    pub fn from_yaml(content: &str) -> ModfeedResult<Self> {
        Ok(serde_yaml::from_str(content)?)
    }
}

impl RepositoryConfig {
    /// Parse `(owner, repo)` out of the repository URL
    ///
    /// Accepts a trailing slash and a `.git` suffix.
    pub fn repo_slug(&self) -> ModfeedResult<(String, String)> {
        let trimmed = self.url.trim().trim_end_matches('/');
        let without_scheme = trimmed
            .split_once("://")
            .map(|(_, rest)| rest)
            .unwrap_or(trimmed);

        let segments: Vec<&str> = without_scheme
            .split('/')
            .filter(|s| !s.is_empty())
            .collect();

        // host/owner/repo at minimum
        if segments.len() < 3 {
            return Err(ModfeedError::Config(format!(
                "Invalid repository URL '{}': expected https://github.com/<owner>/<repo>",
                self.url
            )));
        }

        let owner = segments[segments.len() - 2];
        let repo = segments[segments.len() - 1];
        let repo = repo.strip_suffix(".git").unwrap_or(repo);
        if repo.is_empty() {
            return Err(ModfeedError::Config(format!(
                "Invalid repository URL '{}': empty repository name",
                self.url
            )));
        }
        if repo == "." || repo == ".." {
            return Err(ModfeedError::Config(format!(
                "Invalid repository URL '{}': '{}' is not a repository name",
                self.url, repo
            )));
        }

        Ok((owner.to_string(), repo.to_string()))
    }

    /// Repository name used for the output directory
    pub fn name(&self) -> ModfeedResult<String> {
        self.repo_slug().map(|(_, repo)| repo)
    }
}
