use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// A repository as reported by the listing endpoint. Read-only input.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Repository {
    pub name: String,
    pub full_name: String,
    pub owner: RepoOwner,
    #[serde(default)]
    pub language: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RepoOwner {
    pub login: String,
}

/// One authored commit, flattened from the API row and tagged with the
/// repository it was fetched from.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CommitRecord {
    pub sha: String,
    pub repo_full_name: String,
    pub timestamp: DateTime<Utc>,
}

/// Wire shape of a commit listing row.
#[derive(Debug, Clone, Deserialize)]
pub struct CommitRow {
    pub sha: String,
    pub commit: CommitDetail,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CommitDetail {
    pub author: CommitAuthor,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CommitAuthor {
    pub date: DateTime<Utc>,
}

/// Wire shape of a single-commit response; only the file list matters here.
#[derive(Debug, Clone, Deserialize)]
pub struct CommitFilesRow {
    #[serde(default)]
    pub files: Vec<FileChange>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FileChange {
    pub filename: String,
    #[serde(default)]
    pub additions: u32,
    #[serde(default)]
    pub deletions: u32,
}

/// Per-language accumulator. Counters only ever grow within a run.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LanguageStat {
    pub bytes: u64,
    pub commits: u32,
    pub additions: u64,
    pub deletions: u64,
}

impl LanguageStat {
    pub fn add_file(&mut self, change: &FileChange, estimated_bytes: u64) {
        self.additions += change.additions as u64;
        self.deletions += change.deletions as u64;
        self.commits += 1;
        self.bytes += estimated_bytes;
    }

    pub fn add_estimate(&mut self, estimated_bytes: u64, commit_count: u32) {
        self.bytes += estimated_bytes;
        self.commits += commit_count;
    }
}

pub type LanguageStats = HashMap<String, LanguageStat>;

/// One calendar date with at least one commit.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DaySample {
    pub date: NaiveDate,
    pub commits: usize,
    pub active_seconds: u64,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UsageReport {
    pub total_seconds: u64,
    pub days: Vec<DaySample>,
}
