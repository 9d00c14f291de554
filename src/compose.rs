use crate::model::{CommitRecord, LanguageStats, UsageReport};
use std::collections::HashSet;
use std::fmt::Write;

pub const BLOCK_START: &str = "<!-- gitpulse:stats:start -->";
pub const BLOCK_END: &str = "<!-- gitpulse:stats:end -->";

const TOP_LANGUAGES: usize = 10;
/// Sparkline width: 50 characters, each standing for two percent.
const BAR_WIDTH: usize = 50;
const PCT_PER_CHAR: f64 = 2.0;

/// File names of one chart in both palettes.
#[derive(Debug, Clone)]
pub struct ThemedImage {
    pub light: String,
    pub dark: String,
}

/// Charts that survived rendering. A failed chart is simply absent and its
/// section is left out of the block.
#[derive(Debug, Clone, Default)]
pub struct ChartEmbeds {
    pub ring: Option<ThemedImage>,
    pub trend: Option<ThemedImage>,
}

pub struct StatsInput<'a> {
    pub languages: &'a LanguageStats,
    pub estimated_loc: u64,
    pub usage: &'a UsageReport,
    pub commits: &'a [CommitRecord],
    pub charts: &'a ChartEmbeds,
    /// Image directory name as referenced from the README.
    pub images_dir: &'a str,
}

/// Compose the delimited statistics block. Deterministic for identical
/// inputs; the same aggregates always produce the same bytes.
pub fn compose(input: &StatsInput) -> String {
    let active_repos: HashSet<&str> = input
        .commits
        .iter()
        .map(|c| c.repo_full_name.as_str())
        .collect();

    let mut block = String::new();
    block.push_str(BLOCK_START);
    block.push_str("\n\n📊 **My Coding Activity This Week**\n\n```\n");

    block.push_str("💬 Languages:\n");
    block.push_str(&language_table(input.languages, input.usage));

    block.push_str("\n⏱️ Computer time:\n");
    let _ = writeln!(block, "Total {}", format_duration(input.usage.total_seconds));

    block.push_str("\n📝 Code stats:\n");
    let _ = writeln!(
        block,
        "Estimated lines of code    {}",
        group_digits(input.estimated_loc)
    );
    let _ = writeln!(block, "Commits                    {}", input.commits.len());
    let _ = writeln!(block, "Active repositories        {}", active_repos.len());
    block.push_str("```\n");

    if let Some(ring) = &input.charts.ring {
        block.push_str("\n📊 **Language Breakdown**\n\n");
        block.push_str(&picture(ring, input.images_dir, "Language breakdown"));
        block.push('\n');
    }
    if let Some(trend) = &input.charts.trend {
        block.push_str("\n📈 **30-Day Commit Trend**\n\n");
        block.push_str(&picture(trend, input.images_dir, "30-day commit trend"));
        block.push('\n');
    }

    block.push_str("\n> ⏱️ Activity data inferred from GitHub events (no IDE plugins required)\n");
    block.push_str(BLOCK_END);
    block
}

/// Top languages by estimated time, one fixed-width row each with a
/// block-bar share sparkline.
fn language_table(languages: &LanguageStats, usage: &UsageReport) -> String {
    let total_bytes: u64 = languages.values().map(|s| s.bytes).sum();
    if total_bytes == 0 {
        return "(no code activity this week)\n".to_string();
    }

    let mut entries: Vec<(&String, u64)> = languages
        .iter()
        .filter(|(_, s)| s.bytes > 0)
        .map(|(lang, s)| (lang, s.bytes))
        .collect();
    // Estimated time is proportional to the byte share, so byte order is
    // time order; names break ties for a stable table.
    entries.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(b.0)));
    entries.truncate(TOP_LANGUAGES);

    let name_width = entries
        .iter()
        .map(|(lang, _)| lang.chars().count())
        .max()
        .unwrap_or(0)
        .max(15);

    let mut table = String::new();
    for (lang, bytes) in entries {
        let pct = bytes as f64 / total_bytes as f64 * 100.0;
        let lang_seconds = usage.total_seconds * bytes / total_bytes;
        let filled = ((pct / PCT_PER_CHAR) as usize).min(BAR_WIDTH);
        let bar: String = "█".repeat(filled) + &"░".repeat(BAR_WIDTH - filled);
        let _ = writeln!(
            table,
            "{:<name_width$}  {:<20}  {bar}  {pct:.2} %",
            lang,
            format_duration(lang_seconds),
        );
    }
    table
}

fn picture(image: &ThemedImage, images_dir: &str, alt: &str) -> String {
    format!(
        "<picture>\n  <source media=\"(prefers-color-scheme: dark)\" srcset=\"{dir}/{dark}\">\n  <img alt=\"{alt}\" src=\"{dir}/{light}\">\n</picture>\n",
        dir = images_dir,
        dark = image.dark,
        light = image.light,
    )
}

pub fn format_duration(seconds: u64) -> String {
    let hours = seconds / 3600;
    let minutes = (seconds % 3600) / 60;
    if hours > 0 {
        format!("{hours}h {minutes}m")
    } else {
        format!("{minutes}m")
    }
}

fn group_digits(value: u64) -> String {
    let digits = value.to_string();
    let mut grouped = String::new();
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    grouped
}
