use crate::error::Result;
use crate::model::{CommitFilesRow, CommitRow, FileChange, Repository};
use chrono::{DateTime, SecondsFormat, Utc};
use std::collections::HashMap;

pub const API_BASE: &str = "https://api.github.com";
pub const PER_PAGE: usize = 100;

/// Read-only slice of the GitHub REST API the pipeline consumes. Kept as a
/// trait so aggregation and classification can run against a scripted
/// client in tests.
pub trait GithubApi {
    fn repos_page(&self, user: &str, page: u32) -> Result<Vec<Repository>>;

    fn commits_page(
        &self,
        owner: &str,
        repo: &str,
        author: &str,
        since: DateTime<Utc>,
        page: u32,
    ) -> Result<Vec<CommitRow>>;

    fn commit_files(&self, owner: &str, repo: &str, sha: &str) -> Result<Vec<FileChange>>;

    fn languages(&self, owner: &str, repo: &str) -> Result<HashMap<String, u64>>;
}

/// Blocking client with bearer auth. One request at a time, no retries.
pub struct HttpClient {
    agent: ureq::Agent,
    token: String,
}

impl HttpClient {
    pub fn new(token: impl Into<String>) -> Self {
        Self {
            agent: ureq::agent(),
            token: token.into(),
        }
    }

    fn get(&self, url: &str) -> ureq::Request {
        self.agent
            .get(url)
            .set("Authorization", &format!("Bearer {}", self.token))
            .set("Accept", "application/vnd.github+json")
            .set("User-Agent", concat!("gitpulse/", env!("CARGO_PKG_VERSION")))
    }
}

impl GithubApi for HttpClient {
    fn repos_page(&self, user: &str, page: u32) -> Result<Vec<Repository>> {
        let url = format!("{API_BASE}/users/{user}/repos");
        let resp = self
            .get(&url)
            .query("per_page", &PER_PAGE.to_string())
            .query("page", &page.to_string())
            .query("sort", "updated")
            .call()?;
        Ok(resp.into_json()?)
    }

    fn commits_page(
        &self,
        owner: &str,
        repo: &str,
        author: &str,
        since: DateTime<Utc>,
        page: u32,
    ) -> Result<Vec<CommitRow>> {
        let url = format!("{API_BASE}/repos/{owner}/{repo}/commits");
        let resp = self
            .get(&url)
            .query("author", author)
            .query("since", &since.to_rfc3339_opts(SecondsFormat::Secs, true))
            .query("per_page", &PER_PAGE.to_string())
            .query("page", &page.to_string())
            .call()?;
        Ok(resp.into_json()?)
    }

    fn commit_files(&self, owner: &str, repo: &str, sha: &str) -> Result<Vec<FileChange>> {
        let url = format!("{API_BASE}/repos/{owner}/{repo}/commits/{sha}");
        let resp = self.get(&url).call()?;
        let row: CommitFilesRow = resp.into_json()?;
        Ok(row.files)
    }

    fn languages(&self, owner: &str, repo: &str) -> Result<HashMap<String, u64>> {
        let url = format!("{API_BASE}/repos/{owner}/{repo}/languages");
        let resp = self.get(&url).call()?;
        Ok(resp.into_json()?)
    }
}

/// Split an `owner/name` pair. Rows with no slash are malformed and skipped
/// by callers.
pub fn split_full_name(full_name: &str) -> Option<(&str, &str)> {
    full_name.split_once('/')
}
