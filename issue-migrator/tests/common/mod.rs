#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};

use issue_migrator::{Credentials, Runner, RunnerConfig};
use wiremock::MockServer;

pub fn fixtures_root() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures")
}

pub fn tracking_file(dir: &Path) -> PathBuf {
    dir.join("migrated_issues.txt")
}

/// Writes `fixture` into `dir`, pointing every API at `server`.
pub fn write_settings(dir: &Path, fixture: &str, server: &MockServer, granularity: &str) -> PathBuf {
    let template = fs::read_to_string(fixtures_root().join(fixture)).unwrap();
    let contents = template
        .replace("{server}", &server.uri())
        .replace("{tracking}", &tracking_file(dir).display().to_string())
        .replace("{granularity}", granularity);

    let path = dir.join("migration.toml");
    fs::write(&path, contents).unwrap();
    path
}

pub fn jira_runner(settings: PathBuf, dry_run: bool) -> Runner {
    let credentials = Credentials::new("gitlab-token").with_jira_password(Some("jira-token".into()));
    Runner::new(RunnerConfig::new(settings, credentials, dry_run)).unwrap()
}

pub fn aha_runner(settings: PathBuf, dry_run: bool) -> Runner {
    let credentials = Credentials::new("gitlab-token").with_aha_token(Some("aha-token".into()));
    Runner::new(RunnerConfig::new(settings, credentials, dry_run)).unwrap()
}

pub fn read_tracking(dir: &Path) -> Vec<String> {
    fs::read_to_string(tracking_file(dir))
        .map(|contents| contents.lines().map(str::to_string).collect())
        .unwrap_or_default()
}
