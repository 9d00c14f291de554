#![allow(dead_code)]

use chrono::{DateTime, Utc};
use gitpulse::error::{PulseError, Result};
use gitpulse::github::{GithubApi, PER_PAGE};
use gitpulse::model::{
    CommitAuthor, CommitDetail, CommitRecord, CommitRow, FileChange, RepoOwner, Repository,
};
use std::collections::{HashMap, HashSet};

/// Scripted stand-in for the GitHub API. Pages are served by slicing the
/// configured rows, so pagination behaves like the real endpoints.
#[derive(Default)]
pub struct ScriptedApi {
    pub repos: Vec<Repository>,
    pub commits: HashMap<String, Vec<CommitRow>>,
    pub files: HashMap<String, Vec<FileChange>>,
    pub languages: HashMap<String, HashMap<String, u64>>,
    pub failing_repos: HashSet<String>,
    pub empty_repos: HashSet<String>,
}

impl ScriptedApi {
    pub fn with_repo(mut self, full_name: &str) -> Self {
        self.repos.push(repo(full_name));
        self
    }

    pub fn with_commits(mut self, full_name: &str, rows: Vec<CommitRow>) -> Self {
        self.commits.insert(full_name.to_string(), rows);
        self
    }
}

impl GithubApi for ScriptedApi {
    fn repos_page(&self, _user: &str, page: u32) -> Result<Vec<Repository>> {
        Ok(page_of(&self.repos, page))
    }

    fn commits_page(
        &self,
        owner: &str,
        name: &str,
        _author: &str,
        _since: DateTime<Utc>,
        page: u32,
    ) -> Result<Vec<CommitRow>> {
        let full_name = format!("{owner}/{name}");
        if self.empty_repos.contains(&full_name) {
            return Err(PulseError::EmptyRepository);
        }
        if self.failing_repos.contains(&full_name) {
            return Err(PulseError::Api {
                status: 500,
                message: "scripted failure".to_string(),
            });
        }
        let rows = self.commits.get(&full_name).cloned().unwrap_or_default();
        Ok(page_of(&rows, page))
    }

    fn commit_files(&self, _owner: &str, _name: &str, sha: &str) -> Result<Vec<FileChange>> {
        match self.files.get(sha) {
            Some(files) => Ok(files.clone()),
            None => Err(PulseError::Api {
                status: 404,
                message: "no such commit".to_string(),
            }),
        }
    }

    fn languages(&self, owner: &str, name: &str) -> Result<HashMap<String, u64>> {
        Ok(self
            .languages
            .get(&format!("{owner}/{name}"))
            .cloned()
            .unwrap_or_default())
    }
}

fn page_of<T: Clone>(rows: &[T], page: u32) -> Vec<T> {
    let start = (page as usize - 1) * PER_PAGE;
    let end = (start + PER_PAGE).min(rows.len());
    if start >= rows.len() {
        Vec::new()
    } else {
        rows[start..end].to_vec()
    }
}

pub fn repo(full_name: &str) -> Repository {
    let (owner, name) = full_name.split_once('/').unwrap();
    Repository {
        name: name.to_string(),
        full_name: full_name.to_string(),
        owner: RepoOwner {
            login: owner.to_string(),
        },
        language: None,
    }
}

pub fn commit_row(sha: &str, timestamp: &str) -> CommitRow {
    CommitRow {
        sha: sha.to_string(),
        commit: CommitDetail {
            author: CommitAuthor {
                date: ts(timestamp),
            },
        },
    }
}

pub fn record(sha: &str, repo: &str, timestamp: &str) -> CommitRecord {
    CommitRecord {
        sha: sha.to_string(),
        repo_full_name: repo.to_string(),
        timestamp: ts(timestamp),
    }
}

pub fn ts(timestamp: &str) -> DateTime<Utc> {
    timestamp.parse().unwrap()
}
