mod common;

use common::record;
use gitpulse::stats::estimate_usage;
use gitpulse::stats::usage::{MAX_DAY_SECONDS, MIN_DAY_SECONDS};
use pretty_assertions::assert_eq;

#[test]
fn single_commit_day_gets_the_floor() {
    let commits = vec![record("a", "me/repo", "2026-08-03T10:00:00Z")];
    let report = estimate_usage(&commits);

    assert_eq!(report.days.len(), 1);
    assert_eq!(report.days[0].active_seconds, MIN_DAY_SECONDS);
    assert_eq!(report.total_seconds, MIN_DAY_SECONDS);
}

#[test]
fn span_plus_pad_within_bounds() {
    // Two commits an hour apart: 3600s span + 2 * 300s pad.
    let commits = vec![
        record("a", "me/repo", "2026-08-03T10:00:00Z"),
        record("b", "me/repo", "2026-08-03T11:00:00Z"),
    ];
    let report = estimate_usage(&commits);

    assert_eq!(report.days[0].active_seconds, 3600 + 600);
}

#[test]
fn short_raw_estimate_is_floored() {
    // Two commits a minute apart: 60 + 600 = 660s, below the 1800s floor.
    let commits = vec![
        record("a", "me/repo", "2026-08-03T10:00:00Z"),
        record("b", "me/repo", "2026-08-03T10:01:00Z"),
    ];
    let report = estimate_usage(&commits);

    assert_eq!(report.days[0].active_seconds, MIN_DAY_SECONDS);
}

#[test]
fn heavy_day_clamps_to_twelve_hours() {
    // 500 commits: pad alone is 150_000s, far over the ceiling.
    let commits: Vec<_> = (0..500)
        .map(|i| {
            record(
                &format!("sha{i}"),
                "me/repo",
                &format!("2026-08-03T{:02}:{:02}:00Z", 8 + i / 60, i % 60),
            )
        })
        .collect();
    let report = estimate_usage(&commits);

    assert_eq!(report.days.len(), 1);
    assert_eq!(report.days[0].active_seconds, MAX_DAY_SECONDS);
}

#[test]
fn days_are_grouped_by_utc_date() {
    let commits = vec![
        record("a", "me/repo", "2026-08-03T23:30:00Z"),
        record("b", "me/repo", "2026-08-04T00:30:00Z"),
    ];
    let report = estimate_usage(&commits);

    assert_eq!(report.days.len(), 2);
    assert_eq!(report.days[0].commits, 1);
    assert_eq!(report.days[1].commits, 1);
    assert_eq!(report.total_seconds, 2 * MIN_DAY_SECONDS);
}

#[test]
fn out_of_order_timestamps_never_go_negative() {
    let commits = vec![
        record("b", "me/repo", "2026-08-03T18:00:00Z"),
        record("a", "me/repo", "2026-08-03T09:00:00Z"),
    ];
    let report = estimate_usage(&commits);

    // Span is 9h regardless of input order, plus 600s pad.
    assert_eq!(report.days[0].active_seconds, 9 * 3600 + 600);
}

#[test]
fn empty_input_yields_empty_report() {
    let report = estimate_usage(&[]);
    assert_eq!(report.total_seconds, 0);
    assert!(report.days.is_empty());
}
