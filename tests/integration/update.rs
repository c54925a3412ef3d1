//! Tests for `modfeed update` against a mocked GitHub API

use super::common::{modfeed_command, module_zip, MODULE_PROP};
use assert_cmd::assert::OutputAssertExt;
use predicates::prelude::*;
use std::fs::{self, File};
use std::path::{Path, PathBuf};
use tempfile::TempDir;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};
use zip::{CompressionMethod, ZipArchive};

const RAW_BASE: &str = "https://raw.example.com/feed/main/src";

fn write_config(dir: &Path, api_url: &str, repositories: serde_json::Value) -> PathBuf {
    let config_path = dir.join("config.json");
    let config = serde_json::json!({
        "repositories": repositories,
        "raw_base_url": RAW_BASE,
        "output_dir": dir.join("out"),
        "api_url": api_url,
    });
    fs::write(&config_path, serde_json::to_string_pretty(&config).unwrap()).unwrap();
    config_path
}

async fn mount_release(server: &MockServer, repo: &str, tag: &str, body: Option<&str>) {
    Mock::given(method("GET"))
        .and(path(format!("/repos/owner/{}/releases/latest", repo)))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "tag_name": tag,
            "body": body,
            "assets": [
                {
                    "name": format!("{}-{}-full.zip", repo, tag),
                    "browser_download_url": format!("{}/dl/{}-full.zip", server.uri(), repo)
                },
                {
                    "name": format!("{}-{}-lite.zip", repo, tag),
                    "browser_download_url": format!("{}/dl/{}-lite.zip", server.uri(), repo)
                }
            ]
        })))
        .mount(server)
        .await;
}

/// Run the binary off the async runtime so the mock server keeps serving
async fn run_update(config: PathBuf, extra: &[&str]) -> assert_cmd::assert::Assert {
    let extra: Vec<String> = extra.iter().map(|s| s.to_string()).collect();
    let output = tokio::task::spawn_blocking(move || {
        modfeed_command()
            .arg("update")
            .arg("--config")
            .arg(&config)
            .args(&extra)
            .output()
            .unwrap()
    })
    .await
    .unwrap();
    output.assert()
}

#[tokio::test(flavor = "multi_thread")]
async fn test_update_publishes_manifest_and_mirror() {
    let server = MockServer::start().await;
    mount_release(&server, "example", "v1.4.0", Some("* faster boot")).await;
    Mock::given(method("GET"))
        .and(path("/dl/example-lite.zip"))
        .respond_with(ResponseTemplate::new(200).set_body_bytes(module_zip()))
        .expect(1)
        .mount(&server)
        .await;

    let temp = TempDir::new().unwrap();
    let config = write_config(
        temp.path(),
        &server.uri(),
        serde_json::json!([
            {"url": "https://github.com/owner/example", "keyword": "lite", "repack": true}
        ]),
    );

    run_update(config, &[])
        .await
        .success()
        .stdout(predicate::str::contains("1 updated, 0 skipped, 0 failed"));

    let out = temp.path().join("out").join("example");
    let manifest: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(out.join("update.json")).unwrap()).unwrap();
    assert_eq!(
        manifest,
        serde_json::json!({
            "version": "v1.4.0",
            "versionCode": 140,
            "zipUrl": format!("{}/example/module.zip", RAW_BASE),
            "changelog": format!("{}/example/changelog.md", RAW_BASE),
        })
    );
    assert_eq!(
        fs::read_to_string(out.join("changelog.md")).unwrap(),
        "* faster boot"
    );

    let mut archive = ZipArchive::new(File::open(out.join("module.zip")).unwrap()).unwrap();
    let mut prop = archive.by_name("module.prop").unwrap();
    assert_eq!(prop.compression(), CompressionMethod::Stored);
    let mut content = String::new();
    std::io::Read::read_to_string(&mut prop, &mut content).unwrap();
    assert_eq!(content, MODULE_PROP);
}

#[tokio::test(flavor = "multi_thread")]
async fn test_update_without_repack_links_upstream_asset() {
    let server = MockServer::start().await;
    mount_release(&server, "example", "v2.0", None).await;

    let temp = TempDir::new().unwrap();
    let config = write_config(
        temp.path(),
        &server.uri(),
        serde_json::json!([{"url": "https://github.com/owner/example"}]),
    );

    run_update(config, &[]).await.success();

    let out = temp.path().join("out").join("example");
    let manifest: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(out.join("update.json")).unwrap()).unwrap();
    assert_eq!(manifest["versionCode"], 20);
    assert_eq!(
        manifest["zipUrl"],
        format!("{}/dl/example-full.zip", server.uri())
    );
    assert_eq!(fs::read_to_string(out.join("changelog.md")).unwrap(), "none");
    assert!(!out.join("module.zip").exists());
}

#[tokio::test(flavor = "multi_thread")]
async fn test_update_failure_sets_exit_code_but_continues() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/repos/owner/broken/releases/latest"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;
    mount_release(&server, "example", "v3", None).await;

    let temp = TempDir::new().unwrap();
    let config = write_config(
        temp.path(),
        &server.uri(),
        serde_json::json!([
            {"url": "https://github.com/owner/broken"},
            {"url": "https://github.com/owner/example"}
        ]),
    );

    run_update(config, &[])
        .await
        .failure()
        .stdout(predicate::str::contains("1 updated, 0 skipped, 1 failed"))
        .stderr(predicate::str::contains("1 repositories failed to update"));

    assert!(temp.path().join("out/example/update.json").exists());
    assert!(!temp.path().join("out/broken").exists());
}

#[tokio::test(flavor = "multi_thread")]
async fn test_update_missing_release_is_skipped() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/repos/owner/norelease/releases/latest"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let temp = TempDir::new().unwrap();
    let config = write_config(
        temp.path(),
        &server.uri(),
        serde_json::json!([{"url": "https://github.com/owner/norelease"}]),
    );

    run_update(config, &[])
        .await
        .success()
        .stdout(predicate::str::contains("0 updated, 1 skipped, 0 failed"));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_update_dry_run_writes_nothing() {
    let server = MockServer::start().await;
    mount_release(&server, "example", "v1.0.1", None).await;

    let temp = TempDir::new().unwrap();
    let config = write_config(
        temp.path(),
        &server.uri(),
        serde_json::json!([
            {"url": "https://github.com/owner/example", "keyword": "lite", "repack": true}
        ]),
    );

    run_update(config, &["--dry-run"])
        .await
        .success()
        .stdout(predicate::str::contains("would publish v1.0.1 (versionCode 101)"));

    assert!(!temp.path().join("out").exists());
}

#[tokio::test(flavor = "multi_thread")]
async fn test_update_output_override() {
    let server = MockServer::start().await;
    mount_release(&server, "example", "v9", None).await;

    let temp = TempDir::new().unwrap();
    let config = write_config(
        temp.path(),
        &server.uri(),
        serde_json::json!([{"url": "https://github.com/owner/example"}]),
    );
    let elsewhere = temp.path().join("public");

    run_update(
        config,
        &["--output", elsewhere.to_str().unwrap(), "--raw-base-url", "https://cdn.example.com/feed"],
    )
    .await
    .success();

    let manifest: serde_json::Value = serde_json::from_str(
        &fs::read_to_string(elsewhere.join("example/update.json")).unwrap(),
    )
    .unwrap();
    assert_eq!(
        manifest["changelog"],
        "https://cdn.example.com/feed/example/changelog.md"
    );
    assert!(!temp.path().join("out").exists());
}

#[test]
fn test_update_missing_config() {
    let temp = TempDir::new().unwrap();

    modfeed_command()
        .arg("update")
        .current_dir(temp.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("Config file not found: config.json"));
}

#[test]
fn test_update_empty_repository_list() {
    let temp = TempDir::new().unwrap();
    fs::write(temp.path().join("config.yaml"), "repositories: []\n").unwrap();

    modfeed_command()
        .args(["update", "--config", "config.yaml"])
        .current_dir(temp.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("No repositories configured"));
}
