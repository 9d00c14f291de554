use super::{RingSpec, Theme, PALETTE};
use std::f64::consts::PI;
use std::fmt::Write;

const WIDTH: u32 = 600;
const HEIGHT: u32 = 450;
const CX: f64 = 370.0;
const CY: f64 = 250.0;
const OUTER_R: f64 = 150.0;
const INNER_R: f64 = 85.0;

/// In-slice percentage labels are dropped below this share to avoid
/// cluttering thin slices. The legend still lists every language.
const LABEL_THRESHOLD_PCT: f64 = 5.0;

/// Ring chart over language byte shares. Slices are drawn clockwise from
/// twelve o'clock in the order given.
pub fn render(spec: &RingSpec, theme: &Theme) -> String {
    let total: u64 = spec.slices.iter().map(|s| s.value).sum();

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
        r#"  <text x="{}" y="30" text-anchor="middle" font-size="18" font-weight="bold" fill="{}">{}</text>"#,
        WIDTH / 2,
        theme.text,
        escape(&spec.title)
    );

    if total > 0 {
        let mut angle = -PI / 2.0;
        for (i, slice) in spec.slices.iter().enumerate() {
            let fraction = slice.value as f64 / total as f64;
            // A full-circle arc degenerates; stop a hair short of closing.
            let sweep = (fraction * 2.0 * PI).min(2.0 * PI * 0.9999);
            let end = angle + sweep;
            let color = PALETTE[i % PALETTE.len()];

            let _ = writeln!(
                svg,
                r#"  <path d="{}" fill="{}" stroke="{}" stroke-width="2"/>"#,
                slice_path(angle, end),
                color,
                theme.background
            );

            let pct = fraction * 100.0;
            if pct >= LABEL_THRESHOLD_PCT {
                let mid = (angle + end) / 2.0;
                let (lx, ly) = polar((OUTER_R + INNER_R) / 2.0, mid);
                let _ = writeln!(
                    svg,
                    r##"  <text x="{lx:.1}" y="{ly:.1}" text-anchor="middle" font-size="12" font-weight="bold" fill="#ffffff">{pct:.1}%</text>"##
                );
            }

            angle = end;
        }
    }

    // Side legend: one swatch per slice, top-aligned with the ring.
    let legend_x = 20.0;
    let mut legend_y = 120.0;
    for (i, slice) in spec.slices.iter().enumerate() {
        let color = PALETTE[i % PALETTE.len()];
        let _ = writeln!(
            svg,
            r#"  <rect x="{legend_x}" y="{:.1}" width="12" height="12" rx="2" fill="{color}"/>"#,
            legend_y - 10.0
        );
        let _ = writeln!(
            svg,
            r#"  <text x="{:.1}" y="{legend_y:.1}" font-size="12" fill="{}">{}</text>"#,
            legend_x + 18.0,
            theme.text,
            escape(&slice.label)
        );
        legend_y += 22.0;
    }

    svg.push_str("</svg>");
    svg
}

fn polar(r: f64, angle: f64) -> (f64, f64) {
    (CX + r * angle.cos(), CY + r * angle.sin())
}

fn slice_path(a0: f64, a1: f64) -> String {
    let large = if a1 - a0 > PI { 1 } else { 0 };
    let (x0, y0) = polar(OUTER_R, a0);
    let (x1, y1) = polar(OUTER_R, a1);
    let (x2, y2) = polar(INNER_R, a1);
    let (x3, y3) = polar(INNER_R, a0);
    format!(
        "M {x0:.1},{y0:.1} A {OUTER_R},{OUTER_R} 0 {large} 1 {x1:.1},{y1:.1} \
         L {x2:.1},{y2:.1} A {INNER_R},{INNER_R} 0 {large} 0 {x3:.1},{y3:.1} Z"
    )
}

pub(crate) fn escape(text: &str) -> String {
    text.replace('&', "&amp;").replace('<', "&lt;").replace('>', "&gt;")
}
