use crate::github::{split_full_name, GithubApi};
use crate::model::{CommitRecord, LanguageStat, LanguageStats};
use std::collections::HashMap;
use tracing::warn;

/// Estimated bytes per changed line. An undocumented heuristic, kept as a
/// named constant rather than reinterpreted.
pub const BYTES_PER_LINE: u64 = 50;

/// Tier-2 per-commit weight divisor: each commit is assumed to touch
/// roughly 1% of a repository's code.
pub const TIER2_COMMIT_DIVISOR: u64 = 100;

/// How many commits get the exact per-file treatment before falling back
/// to repository-level estimation.
pub const EXACT_TIER_COMMIT_LIMIT: usize = 50;

pub const FALLBACK_LANGUAGE: &str = "Other";

/// Map a file path to a language label via its lowercased extension.
/// Unknown or missing extensions land in "Other".
pub fn language_for_path(path: &str) -> &'static str {
    let ext = path.rsplit('.').next().unwrap_or("").to_lowercase();
    match ext.as_str() {
        "js" | "jsx" | "mjs" | "cjs" => "JavaScript",
        "ts" | "tsx" => "TypeScript",
        "py" | "pyw" => "Python",
        "java" => "Java",
        "cpp" | "cc" | "cxx" | "hpp" | "h" => "C++",
        "c" => "C",
        "go" => "Go",
        "rs" => "Rust",
        "php" => "PHP",
        "rb" => "Ruby",
        "swift" => "Swift",
        "kt" | "kts" => "Kotlin",
        "dart" => "Dart",
        "html" | "htm" => "HTML",
        "css" => "CSS",
        "scss" | "sass" => "SCSS",
        "less" => "Less",
        "vue" => "Vue",
        "md" => "Markdown",
        "json" => "JSON",
        "yaml" | "yml" => "YAML",
        "sh" | "bash" => "Shell",
        "ps1" => "PowerShell",
        "dockerfile" => "Dockerfile",
        "cmake" => "CMake",
        "makefile" => "Makefile",
        _ => FALLBACK_LANGUAGE,
    }
}

/// Attribution precision of a classification stage.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Precision {
    /// Per-file diff inspection.
    Exact,
    /// Repository-proportional estimation.
    Estimated,
}

#[derive(Debug, Default)]
pub struct LanguageBreakdown {
    pub stats: LanguageStats,
    pub estimated_loc: u64,
}

/// First stage: inspect the changed files of a bounded commit prefix and
/// attribute exact line counts per language.
pub struct ExactTier {
    pub limit: usize,
}

impl ExactTier {
    pub fn precision(&self) -> Precision {
        Precision::Exact
    }

    /// Returns how many commits were consumed by this tier. A failed file
    /// fetch contributes nothing but still counts as consumed.
    pub fn accumulate(
        &self,
        api: &dyn GithubApi,
        commits: &[CommitRecord],
        stats: &mut LanguageStats,
    ) -> usize {
        let prefix = &commits[..commits.len().min(self.limit)];
        for commit in prefix {
            let Some((owner, name)) = split_full_name(&commit.repo_full_name) else {
                continue;
            };
            let files = match api.commit_files(owner, name, &commit.sha) {
                Ok(files) => files,
                Err(err) => {
                    warn!(sha = %commit.sha, %err, "failed to fetch commit files");
                    continue;
                }
            };
            for file in &files {
                let lang = language_for_path(&file.filename);
                let estimated = file.additions as u64 * BYTES_PER_LINE;
                stats.entry(lang.to_string()).or_default().add_file(file, estimated);
            }
        }
        prefix.len()
    }
}

/// Second stage: for commits not individually inspected, distribute bytes
/// according to each repository's language-byte ratio, weighted by commit
/// count. Commit totals are added to every touched language, so they
/// double-count across languages by design.
pub struct EstimatedTier;

impl EstimatedTier {
    pub fn precision(&self) -> Precision {
        Precision::Estimated
    }

    pub fn accumulate(
        &self,
        api: &dyn GithubApi,
        commits: &[CommitRecord],
        stats: &mut LanguageStats,
    ) {
        let mut by_repo: HashMap<&str, u32> = HashMap::new();
        for commit in commits {
            *by_repo.entry(commit.repo_full_name.as_str()).or_insert(0) += 1;
        }

        for (full_name, commit_count) in by_repo {
            let Some((owner, name)) = split_full_name(full_name) else {
                continue;
            };
            let languages = match api.languages(owner, name) {
                Ok(languages) => languages,
                Err(err) => {
                    warn!(repo = %full_name, %err, "failed to fetch language breakdown");
                    continue;
                }
            };
            let total_bytes: u64 = languages.values().sum();
            if total_bytes == 0 {
                continue;
            }
            for (lang, bytes) in languages {
                let estimated = bytes * commit_count as u64 / TIER2_COMMIT_DIVISOR;
                stats.entry(lang).or_default().add_estimate(estimated, commit_count);
            }
        }
    }
}

/// Two-tier language attribution over a commit list: an exact stage over a
/// bounded prefix, then repository-proportional estimation for the rest.
pub struct Classifier<'a> {
    api: &'a dyn GithubApi,
    exact: ExactTier,
    estimated: EstimatedTier,
}

impl<'a> Classifier<'a> {
    pub fn new(api: &'a dyn GithubApi) -> Self {
        Self {
            api,
            exact: ExactTier {
                limit: EXACT_TIER_COMMIT_LIMIT,
            },
            estimated: EstimatedTier,
        }
    }

    pub fn with_exact_limit(api: &'a dyn GithubApi, limit: usize) -> Self {
        Self {
            api,
            exact: ExactTier { limit },
            estimated: EstimatedTier,
        }
    }

    pub fn classify(&self, commits: &[CommitRecord]) -> LanguageBreakdown {
        let mut stats = LanguageStats::new();
        let consumed = self.exact.accumulate(self.api, commits, &mut stats);
        self.estimated.accumulate(self.api, &commits[consumed..], &mut stats);

        let estimated_loc = estimated_loc(&stats);
        LanguageBreakdown {
            stats,
            estimated_loc,
        }
    }
}

/// Total estimated lines of code: exact additions where known, otherwise
/// derived from estimated bytes.
pub fn estimated_loc(stats: &LanguageStats) -> u64 {
    stats
        .values()
        .map(|s| {
            if s.additions > 0 {
                s.additions
            } else {
                s.bytes / BYTES_PER_LINE
            }
        })
        .sum()
}

/// Languages ranked by estimated bytes, descending, capped at `limit`.
pub fn top_languages(stats: &LanguageStats, limit: usize) -> Vec<(String, LanguageStat)> {
    let mut entries: Vec<_> = stats
        .iter()
        .filter(|(_, s)| s.bytes > 0)
        .map(|(lang, s)| (lang.clone(), s.clone()))
        .collect();
    entries.sort_by(|a, b| b.1.bytes.cmp(&a.1.bytes).then_with(|| a.0.cmp(&b.0)));
    entries.truncate(limit);
    entries
}
