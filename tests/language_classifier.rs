mod common;

use common::{record, ScriptedApi};
use gitpulse::model::FileChange;
use gitpulse::stats::language::{
    estimated_loc, language_for_path, top_languages, Classifier, EstimatedTier, ExactTier,
    Precision, BYTES_PER_LINE,
};
use pretty_assertions::assert_eq;
use std::collections::HashMap;

fn change(filename: &str, additions: u32, deletions: u32) -> FileChange {
    FileChange {
        filename: filename.to_string(),
        additions,
        deletions,
    }
}

#[test]
fn extension_lookup_matches_table() {
    assert_eq!(language_for_path("main.cpp"), "C++");
    assert_eq!(language_for_path("notes.txt"), "Other");
    assert_eq!(language_for_path("src/lib.rs"), "Rust");
    assert_eq!(language_for_path("Widget.TSX"), "TypeScript");
    assert_eq!(language_for_path("include/api.h"), "C++");
    assert_eq!(language_for_path("deploy.yml"), "YAML");
    assert_eq!(language_for_path("no_extension"), "Other");
}

#[test]
fn tiers_declare_their_precision() {
    assert_eq!(ExactTier { limit: 50 }.precision(), Precision::Exact);
    assert_eq!(EstimatedTier.precision(), Precision::Estimated);
}

#[test]
fn exact_tier_accumulates_per_file() {
    let mut api = ScriptedApi::default();
    api.files.insert(
        "sha1".to_string(),
        vec![change("main.cpp", 100, 20), change("util.cpp", 10, 0)],
    );

    let commits = vec![record("sha1", "me/app", "2026-08-03T10:00:00Z")];
    let breakdown = Classifier::new(&api).classify(&commits);

    let cpp = &breakdown.stats["C++"];
    assert_eq!(cpp.additions, 110);
    assert_eq!(cpp.deletions, 20);
    assert_eq!(cpp.commits, 2); // one increment per touched file
    assert_eq!(cpp.bytes, 110 * BYTES_PER_LINE);
    assert_eq!(breakdown.estimated_loc, 110);
}

#[test]
fn estimated_tier_distributes_repo_bytes() {
    let mut api = ScriptedApi::default();
    api.files.insert("sha1".to_string(), vec![change("a.rs", 10, 0)]);
    api.languages.insert(
        "me/app".to_string(),
        HashMap::from([("Rust".to_string(), 8000u64), ("TOML".to_string(), 2000u64)]),
    );

    // Exact tier takes the first commit only; the remaining two fall back
    // to the repository's language distribution.
    let commits = vec![
        record("sha1", "me/app", "2026-08-03T10:00:00Z"),
        record("sha2", "me/app", "2026-08-03T11:00:00Z"),
        record("sha3", "me/app", "2026-08-03T12:00:00Z"),
    ];
    let breakdown = Classifier::with_exact_limit(&api, 1).classify(&commits);

    let rust = &breakdown.stats["Rust"];
    // Tier 1: 10 additions * 50 bytes; Tier 2: 8000 * 2 / 100 = 160.
    assert_eq!(rust.bytes, 10 * BYTES_PER_LINE + 160);
    assert_eq!(rust.commits, 1 + 2);

    let toml = &breakdown.stats["TOML"];
    assert_eq!(toml.bytes, 2000 * 2 / 100);
    assert_eq!(toml.commits, 2);
}

#[test]
fn failed_file_fetch_contributes_nothing_but_stays_exact() {
    // No files scripted for sha1, so the detail fetch fails; the commit is
    // still consumed by the exact tier and never double-counted by tier 2.
    let mut api = ScriptedApi::default();
    api.languages.insert(
        "me/app".to_string(),
        HashMap::from([("Go".to_string(), 1000u64)]),
    );

    let commits = vec![record("sha1", "me/app", "2026-08-03T10:00:00Z")];
    let breakdown = Classifier::new(&api).classify(&commits);

    assert!(breakdown.stats.is_empty());
    assert_eq!(breakdown.estimated_loc, 0);
}

#[test]
fn loc_falls_back_to_bytes_when_no_additions() {
    let mut api = ScriptedApi::default();
    api.languages.insert(
        "me/app".to_string(),
        HashMap::from([("Python".to_string(), 50_000u64)]),
    );

    let commits = vec![
        record("sha1", "me/app", "2026-08-03T10:00:00Z"),
        record("sha2", "me/app", "2026-08-03T11:00:00Z"),
    ];
    // Exact tier disabled: everything estimated.
    let breakdown = Classifier::with_exact_limit(&api, 0).classify(&commits);

    let python = &breakdown.stats["Python"];
    assert_eq!(python.additions, 0);
    assert_eq!(python.bytes, 50_000 * 2 / 100);
    assert_eq!(breakdown.estimated_loc, python.bytes / BYTES_PER_LINE);
}

#[test]
fn counters_never_negative_and_shares_bounded() {
    let mut api = ScriptedApi::default();
    api.files.insert(
        "sha1".to_string(),
        vec![change("a.rs", 10, 5), change("b.py", 30, 1), change("c.txt", 2, 0)],
    );
    api.languages.insert(
        "me/app".to_string(),
        HashMap::from([("Rust".to_string(), 4000u64), ("Python".to_string(), 6000u64)]),
    );

    let commits = vec![
        record("sha1", "me/app", "2026-08-03T10:00:00Z"),
        record("sha2", "me/app", "2026-08-03T11:00:00Z"),
    ];
    let breakdown = Classifier::with_exact_limit(&api, 1).classify(&commits);

    let total_bytes: u64 = breakdown.stats.values().map(|s| s.bytes).sum();
    let share_sum: f64 = breakdown
        .stats
        .values()
        .map(|s| s.bytes as f64 / total_bytes as f64 * 100.0)
        .sum();
    assert!(share_sum <= 100.1);

    let top = top_languages(&breakdown.stats, 10);
    assert!(top.len() <= 10);
    assert!(top.windows(2).all(|w| w[0].1.bytes >= w[1].1.bytes));
    assert_eq!(estimated_loc(&breakdown.stats), breakdown.estimated_loc);
}
