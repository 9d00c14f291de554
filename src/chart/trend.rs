use super::pie::escape;
use super::{Theme, TrendSpec, PALETTE};
use std::fmt::Write;

const WIDTH: f64 = 1000.0;
const HEIGHT: f64 = 500.0;
const PAD_TOP: f64 = 60.0;
const PAD_RIGHT: f64 = 200.0;
const PAD_BOTTOM: f64 = 60.0;
const PAD_LEFT: f64 = 60.0;

const GRID_INTERVALS: u32 = 5;
const X_LABEL_EVERY: usize = 5;
const LEGEND_NAME_MAX: usize = 12;

#[derive(Clone, Copy)]
struct Point {
    x: f64,
    y: f64,
    count: u32,
}

/// Multi-series commit trend: the daily total as an area-filled heavy line,
/// plus thin per-repository lines with markers at nonzero days.
pub fn render(spec: &TrendSpec, theme: &Theme) -> String {
    let chart_w = WIDTH - PAD_LEFT - PAD_RIGHT;
    let chart_h = HEIGHT - PAD_TOP - PAD_BOTTOM;
    let base_y = PAD_TOP + chart_h;

    // Never zero, so flat data still gets a usable axis.
    let max_count = spec.total.iter().copied().max().unwrap_or(0).max(1);

    let project = |counts: &[u32]| -> Vec<Point> {
        let n = counts.len();
        counts
            .iter()
            .enumerate()
            .map(|(i, &count)| Point {
                x: PAD_LEFT + if n > 1 { i as f64 / (n - 1) as f64 } else { 0.0 } * chart_w,
                y: PAD_TOP + chart_h - (count as f64 / max_count as f64) * chart_h,
                count,
            })
            .collect()
    };

    let total_points = project(&spec.total);

    let mut svg = String::new();
    let _ = writeln!(
        svg,
        r#"<svg width="{WIDTH}" height="{HEIGHT}" xmlns="http://www.w3.org/2000/svg">"#
    );
    let _ = writeln!(
        svg,
        r#"  <rect width="{WIDTH}" height="{HEIGHT}" fill="{}"/>"#,
        theme.background
    );
    let _ = writeln!(
        svg,
        r#"  <text x="{:.0}" y="30" text-anchor="middle" font-size="18" font-weight="bold" fill="{}">{}</text>"#,
        WIDTH / 2.0,
        theme.text,
        escape(&spec.title)
    );

    // Horizontal gridlines, evenly spaced from max down to zero.
    for i in 0..=GRID_INTERVALS {
        let y = PAD_TOP + (chart_h / GRID_INTERVALS as f64) * i as f64;
        let value =
            (max_count as f64 - (max_count as f64 / GRID_INTERVALS as f64) * i as f64).round();
        let _ = writeln!(
            svg,
            r#"  <line x1="{PAD_LEFT}" y1="{y:.1}" x2="{:.1}" y2="{y:.1}" stroke="{}" stroke-width="1" stroke-dasharray="2,2"/>"#,
            PAD_LEFT + chart_w,
            theme.grid
        );
        let _ = writeln!(
            svg,
            r#"  <text x="{:.1}" y="{:.1}" text-anchor="end" font-size="12" font-weight="bold" fill="{}">{value:.0}</text>"#,
            PAD_LEFT - 10.0,
            y + 5.0,
            theme.axis
        );
    }

    let _ = writeln!(
        svg,
        r#"  <text x="20" y="{0:.0}" text-anchor="middle" font-size="14" font-weight="bold" fill="{1}" transform="rotate(-90, 20, {0:.0})">Commits</text>"#,
        HEIGHT / 2.0,
        theme.axis
    );

    // Area fill under the total, then the per-repo lines, then the total on
    // top so it stays readable.
    let _ = writeln!(
        svg,
        r#"  <path d="{}" fill="{}" stroke="none"/>"#,
        area_path(&total_points, base_y),
        theme.area_fill
    );

    for (i, series) in spec.series.iter().enumerate() {
        let color = PALETTE[(i + 1) % PALETTE.len()];
        let points = project(&series.points);
        let _ = writeln!(
            svg,
            r#"  <path d="{}" fill="none" stroke="{color}" stroke-width="2" opacity="0.7"/>"#,
            smooth_path(&points)
        );
        for point in &points {
            if point.count > 0 {
                let _ = writeln!(
                    svg,
                    r#"  <circle cx="{:.1}" cy="{:.1}" r="3" fill="{color}"/>"#,
                    point.x, point.y
                );
            }
        }
    }

    let _ = writeln!(
        svg,
        r#"  <path d="{}" fill="none" stroke="{}" stroke-width="3"/>"#,
        smooth_path(&total_points),
        PALETTE[0]
    );
    for point in &total_points {
        let _ = writeln!(
            svg,
            r#"  <circle cx="{:.1}" cy="{:.1}" r="4" fill="{}"/>"#,
            point.x, point.y, PALETTE[0]
        );
    }

    // Date labels every fifth day plus the last one.
    let n = spec.labels.len();
    for (i, label) in spec.labels.iter().enumerate() {
        if i % X_LABEL_EVERY != 0 && i != n.saturating_sub(1) {
            continue;
        }
        let x = PAD_LEFT + if n > 1 { i as f64 / (n - 1) as f64 } else { 0.0 } * chart_w;
        let y = HEIGHT - PAD_BOTTOM + 15.0;
        let _ = writeln!(
            svg,
            r#"  <text x="{x:.1}" y="{y:.0}" text-anchor="middle" font-size="10" font-weight="bold" fill="{}" transform="rotate(-30, {x:.1}, {y:.0})">{}</text>"#,
            theme.axis,
            escape(label)
        );
    }

    render_legend(&mut svg, spec, theme, chart_w);

    svg.push_str("</svg>");
    svg
}

fn render_legend(svg: &mut String, spec: &TrendSpec, theme: &Theme, chart_w: f64) {
    let legend_x = PAD_LEFT + chart_w + 15.0;
    let mut legend_y = PAD_TOP + 20.0;
    let legend_h = (spec.series.len() + 1) as f64 * 22.0 + 10.0;

    let _ = writeln!(
        svg,
        r#"  <rect x="{:.1}" y="{:.1}" width="180" height="{legend_h:.0}" fill="{}" stroke="{}" stroke-width="1" rx="5"/>"#,
        legend_x - 10.0,
        legend_y - 15.0,
        theme.background,
        theme.border
    );

    let _ = writeln!(
        svg,
        r#"  <line x1="{legend_x:.1}" y1="{legend_y:.1}" x2="{:.1}" y2="{legend_y:.1}" stroke="{}" stroke-width="3"/>"#,
        legend_x + 20.0,
        PALETTE[0]
    );
    let _ = writeln!(
        svg,
        r#"  <text x="{:.1}" y="{:.1}" font-size="11" font-weight="bold" fill="{}">Total</text>"#,
        legend_x + 25.0,
        legend_y + 5.0,
        theme.text
    );
    legend_y += 22.0;

    for (i, series) in spec.series.iter().enumerate() {
        let color = PALETTE[(i + 1) % PALETTE.len()];
        let name = if series.name.chars().count() > LEGEND_NAME_MAX {
            let short: String = series.name.chars().take(LEGEND_NAME_MAX).collect();
            format!("{short}...")
        } else {
            series.name.clone()
        };
        let _ = writeln!(
            svg,
            r#"  <line x1="{legend_x:.1}" y1="{legend_y:.1}" x2="{:.1}" y2="{legend_y:.1}" stroke="{color}" stroke-width="2" opacity="0.7"/>"#,
            legend_x + 20.0
        );
        let _ = writeln!(
            svg,
            r#"  <text x="{:.1}" y="{:.1}" font-size="10" fill="{}">{}</text>"#,
            legend_x + 25.0,
            legend_y + 5.0,
            theme.text,
            escape(&name)
        );
        legend_y += 22.0;
    }
}

/// Piecewise cubic segments; control points at a third of the horizontal
/// step keep the curve through every data point without overshoot spikes.
fn smooth_path(points: &[Point]) -> String {
    if points.is_empty() {
        return String::new();
    }
    let mut path = format!("M {:.1},{:.1}", points[0].x, points[0].y);
    for i in 1..points.len() {
        let prev = points[i - 1];
        let curr = points[i];
        let next = points.get(i + 1).copied().unwrap_or(curr);

        let cp1x = prev.x + (curr.x - prev.x) / 3.0;
        let cp2x = curr.x - (next.x - curr.x) / 3.0;
        let _ = write!(
            path,
            " C {cp1x:.1},{:.1} {cp2x:.1},{:.1} {:.1},{:.1}",
            prev.y, curr.y, curr.x, curr.y
        );
    }
    path
}

fn area_path(points: &[Point], base_y: f64) -> String {
    if points.is_empty() {
        return String::new();
    }
    let first = points[0];
    let last = points[points.len() - 1];
    format!(
        "{} L {:.1},{base_y:.1} L {:.1},{base_y:.1} Z",
        smooth_path(points),
        last.x,
        first.x
    )
}
