use crate::chart::raster::{sweep_old_charts, write_chart, RETAINED_CHARTS};
use crate::chart::{self, ChartSpec, RingSpec, Slice, Theme, TrendSeries, TrendSpec};
use crate::compose::{self, ChartEmbeds, StatsInput, ThemedImage};
use crate::config::Config;
use crate::github::{GithubApi, HttpClient};
use crate::model::{CommitRecord, LanguageStats};
use crate::readme;
use crate::stats::{collect_commits, estimate_usage, Classifier, LanguageBreakdown};
use crate::window;
use anyhow::Context;
use chrono::{DateTime, Datelike, Duration, FixedOffset, Utc};
use console::style;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use tracing::warn;

const TREND_DAYS: i64 = 30;
const TREND_MAX_REPOS: usize = 8;
const RING_MAX_LANGUAGES: usize = 10;

pub fn exec(config: Config) -> anyhow::Result<()> {
    let api = HttpClient::new(config.token.clone());
    run(&api, &config, Utc::now(), true)
}

/// The full pipeline against an injected client and clock: fetch both
/// windows, aggregate, render charts, compose, splice into the README.
pub fn run(
    api: &dyn GithubApi,
    config: &Config,
    now: DateTime<Utc>,
    progress: bool,
) -> anyhow::Result<()> {
    println!(
        "{} Collecting GitHub activity for {}",
        style("gitpulse").bold().green(),
        style(&config.username).bold()
    );

    let month_since = window::days_ago_start(now, config.utc_offset, TREND_DAYS);
    let month = collect_commits(api, &config.username, month_since, progress);

    let week_since = window::week_start(now, config.utc_offset);
    let week = collect_commits(api, &config.username, week_since, progress);

    if week.is_partial() || month.is_partial() {
        warn!(
            failed = week.failed_repos.len() + month.failed_repos.len(),
            "some repositories could not be fetched; statistics are partial"
        );
    }

    let usage = estimate_usage(&week.commits);
    let breakdown = if week.commits.is_empty() {
        LanguageBreakdown::default()
    } else {
        Classifier::new(api).classify(&week.commits)
    };

    let images_path = images_path(&config.readme, &config.images_dir);
    let mut embeds = ChartEmbeds::default();

    if let Some(ring) = build_ring_spec(&breakdown.stats) {
        embeds.ring = render_both_themes(&images_path, &ring);
    }
    if !month.commits.is_empty() {
        let trend = build_trend_spec(&month.commits, now, config.utc_offset);
        embeds.trend = render_both_themes(&images_path, &ChartSpec::CommitTrend(trend));
    }

    let block = compose::compose(&StatsInput {
        languages: &breakdown.stats,
        estimated_loc: breakdown.estimated_loc,
        usage: &usage,
        commits: &week.commits,
        charts: &embeds,
        images_dir: &config.images_dir,
    });

    readme::update_file(&config.readme, &block)
        .with_context(|| format!("Failed to update {}", config.readme.display()))?;

    sweep_old_charts(&images_path, RETAINED_CHARTS);

    println!(
        "{} {} commits this week, {} over {} days, ~{} active",
        style("Done:").bold().green(),
        week.commits.len(),
        month.commits.len(),
        TREND_DAYS,
        compose::format_duration(usage.total_seconds)
    );

    Ok(())
}

fn images_path(readme: &Path, images_dir: &str) -> PathBuf {
    readme
        .parent()
        .map(|p| p.to_path_buf())
        .unwrap_or_default()
        .join(images_dir)
}

/// Render one spec in both palettes. A render failure drops the chart from
/// the block; the run itself carries on.
fn render_both_themes(images_path: &Path, spec: &ChartSpec) -> Option<ThemedImage> {
    let kind = chart::spec_kind(spec);
    let mut names = Vec::with_capacity(2);
    for theme in Theme::both() {
        let svg = chart::render(spec, &theme);
        match write_chart(images_path, kind, theme.name, &svg) {
            Ok(name) => names.push(name),
            Err(err) => {
                warn!(kind, theme = theme.name, %err, "chart rendering failed");
                return None;
            }
        }
    }
    let dark = names.pop()?;
    let light = names.pop()?;
    Some(ThemedImage { light, dark })
}

/// Top languages by estimated bytes; None when nothing was classified.
pub fn build_ring_spec(stats: &LanguageStats) -> Option<ChartSpec> {
    let top = crate::stats::language::top_languages(stats, RING_MAX_LANGUAGES);
    if top.is_empty() {
        return None;
    }
    Some(ChartSpec::LanguageRing(RingSpec {
        title: "Language Breakdown".to_string(),
        slices: top
            .into_iter()
            .map(|(label, stat)| Slice {
                label,
                value: stat.bytes,
            })
            .collect(),
    }))
}

/// Thirty consecutive civil dates ending today, with the daily totals and
/// the heaviest repositories as separate series.
pub fn build_trend_spec(
    commits: &[CommitRecord],
    now: DateTime<Utc>,
    offset: FixedOffset,
) -> TrendSpec {
    let today = now.with_timezone(&offset).date_naive();
    let dates: Vec<_> = (0..TREND_DAYS)
        .map(|i| today - Duration::days(TREND_DAYS - 1 - i))
        .collect();

    let mut day_index = HashMap::new();
    for (i, date) in dates.iter().enumerate() {
        day_index.insert(*date, i);
    }

    let mut total = vec![0u32; dates.len()];
    let mut per_repo: HashMap<&str, Vec<u32>> = HashMap::new();
    for commit in commits {
        let date = commit.timestamp.with_timezone(&offset).date_naive();
        let Some(&i) = day_index.get(&date) else {
            continue;
        };
        total[i] += 1;
        per_repo
            .entry(commit.repo_full_name.as_str())
            .or_insert_with(|| vec![0u32; dates.len()])[i] += 1;
    }

    let mut repos: Vec<(&str, Vec<u32>, u32)> = per_repo
        .into_iter()
        .map(|(name, points)| {
            let volume = points.iter().sum();
            (name, points, volume)
        })
        .collect();
    repos.sort_by(|a, b| b.2.cmp(&a.2).then_with(|| a.0.cmp(b.0)));
    repos.truncate(TREND_MAX_REPOS);

    TrendSpec {
        title: "30-Day Commit Trend".to_string(),
        labels: dates
            .iter()
            .map(|d| format!("{}/{}", d.month(), d.day()))
            .collect(),
        total,
        series: repos
            .into_iter()
            .map(|(name, points, _)| TrendSeries {
                name: name.rsplit('/').next().unwrap_or(name).to_string(),
                points,
            })
            .collect(),
    }
}
