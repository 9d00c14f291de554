use crate::model::{CommitRecord, DaySample, UsageReport};
use chrono::NaiveDate;
use std::collections::BTreeMap;

/// Floor for a day with any activity at all.
pub const MIN_DAY_SECONDS: u64 = 30 * 60;
/// Ceiling for a single day, no matter how many commits landed in it.
pub const MAX_DAY_SECONDS: u64 = 12 * 3600;
/// Assumed interval preceding each commit in a multi-commit day.
pub const PER_COMMIT_PAD_SECONDS: u64 = 5 * 60;

/// Estimate active seconds from commit timestamps, one sample per UTC
/// calendar date with at least one commit. The estimate is the first-to-last
/// span plus a per-commit pad, clamped to [30 min, 12 h]. A proxy, not a
/// measurement.
pub fn estimate_usage(commits: &[CommitRecord]) -> UsageReport {
    let mut by_date: BTreeMap<NaiveDate, Vec<&CommitRecord>> = BTreeMap::new();
    for commit in commits {
        by_date
            .entry(commit.timestamp.date_naive())
            .or_default()
            .push(commit);
    }

    let mut report = UsageReport::default();
    for (date, mut day_commits) in by_date {
        day_commits.sort_by_key(|c| c.timestamp);

        let first = day_commits[0].timestamp;
        let last = day_commits[day_commits.len() - 1].timestamp;
        let span = (last - first).num_seconds().max(0) as u64;

        let pad = if day_commits.len() == 1 {
            MIN_DAY_SECONDS
        } else {
            day_commits.len() as u64 * PER_COMMIT_PAD_SECONDS
        };

        let active_seconds = (span + pad).clamp(MIN_DAY_SECONDS, MAX_DAY_SECONDS);
        report.total_seconds += active_seconds;
        report.days.push(DaySample {
            date,
            commits: day_commits.len(),
            active_seconds,
        });
    }

    report
}
