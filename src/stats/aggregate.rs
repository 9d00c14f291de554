use crate::error::PulseError;
use crate::github::{split_full_name, GithubApi, PER_PAGE};
use crate::model::{CommitRecord, Repository};
use chrono::{DateTime, Utc};
use indicatif::{ProgressBar, ProgressStyle};
use tracing::warn;

/// Result of a cross-repository commit sweep. Never an error: repositories
/// that failed to enumerate are listed so the caller can tell a complete
/// run from a partial one.
#[derive(Debug, Default)]
pub struct Aggregation {
    pub commits: Vec<CommitRecord>,
    pub repos_scanned: usize,
    pub failed_repos: Vec<String>,
}

impl Aggregation {
    pub fn is_partial(&self) -> bool {
        !self.failed_repos.is_empty()
    }
}

/// Collect every commit authored by `user` since `since`, across all of the
/// user's repositories. One failed repository contributes zero commits and
/// the sweep moves on.
pub fn collect_commits(
    api: &dyn GithubApi,
    user: &str,
    since: DateTime<Utc>,
    progress: bool,
) -> Aggregation {
    let repos = list_all_repos(api, user);

    let pb = if progress {
        let pb = ProgressBar::new(repos.len() as u64);
        pb.set_style(
            ProgressStyle::default_bar()
                .template("{spinner:.green} [{bar:30}] {pos}/{len} {msg}")
                .unwrap_or_else(|_| ProgressStyle::default_bar()),
        );
        pb.set_message("Fetching commits...");
        Some(pb)
    } else {
        None
    };

    let mut agg = Aggregation {
        repos_scanned: repos.len(),
        ..Aggregation::default()
    };

    for repo in &repos {
        if let Some(pb) = &pb {
            pb.set_message(repo.full_name.clone());
            pb.inc(1);
        }
        let (commits, failure) = fetch_repo_commits(api, repo, user, since);
        agg.commits.extend(commits);
        if let Some(err) = failure {
            warn!(repo = %repo.full_name, %err, "failed to list commits");
            agg.failed_repos.push(repo.full_name.clone());
        }
    }

    if let Some(pb) = &pb {
        pb.finish_with_message(format!("{} commits", agg.commits.len()));
    }

    agg
}

fn list_all_repos(api: &dyn GithubApi, user: &str) -> Vec<Repository> {
    let mut repos = Vec::new();
    let mut page = 1u32;
    loop {
        match api.repos_page(user, page) {
            Ok(rows) => {
                let short = rows.len() < PER_PAGE;
                repos.extend(rows);
                if short {
                    break;
                }
                page += 1;
            }
            Err(err) => {
                warn!(%err, "failed to list repositories");
                break;
            }
        }
    }
    repos
}

/// Paginate one repository. A failed page halts only this repository's
/// pagination; commits from earlier pages are kept.
fn fetch_repo_commits(
    api: &dyn GithubApi,
    repo: &Repository,
    author: &str,
    since: DateTime<Utc>,
) -> (Vec<CommitRecord>, Option<PulseError>) {
    let Some((owner, name)) = split_full_name(&repo.full_name) else {
        return (Vec::new(), None);
    };

    let mut commits = Vec::new();
    let mut page = 1u32;
    loop {
        match api.commits_page(owner, name, author, since, page) {
            Ok(rows) => {
                let short = rows.len() < PER_PAGE;
                commits.extend(rows.into_iter().map(|row| CommitRecord {
                    sha: row.sha,
                    repo_full_name: repo.full_name.clone(),
                    timestamp: row.commit.author.date,
                }));
                if short {
                    break;
                }
                page += 1;
            }
            // An empty repository is not a failure, just no commits.
            Err(PulseError::EmptyRepository) => break,
            Err(err) => return (commits, Some(err)),
        }
    }
    (commits, None)
}
