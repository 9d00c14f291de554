use crate::error::{PulseError, Result};
use resvg::{tiny_skia, usvg};
use sha2::{Digest, Sha256};
use std::path::{Path, PathBuf};
use tracing::warn;

/// How many rasterized charts the images directory keeps after a run.
pub const RETAINED_CHARTS: usize = 10;

const HASH_PREFIX_LEN: usize = 12;

/// Candidate font files with CJK glyph coverage. Whatever exists is loaded
/// on top of the system fonts; language names and Chinese labels render
/// with missing-glyph boxes otherwise.
#[cfg(windows)]
const FONT_CANDIDATES: &[&str] = &[
    "C:/Windows/Fonts/arial.ttf",
    "C:/Windows/Fonts/arialuni.ttf",
    "C:/Windows/Fonts/msyh.ttc",
    "C:/Windows/Fonts/simhei.ttf",
    "C:/Windows/Fonts/simsun.ttc",
    "C:/Windows/Fonts/segoeui.ttf",
];

#[cfg(not(windows))]
const FONT_CANDIDATES: &[&str] = &[
    "/usr/share/fonts/truetype/dejavu/DejaVuSans.ttf",
    "/usr/share/fonts/truetype/liberation/LiberationSans-Regular.ttf",
    "/usr/share/fonts/truetype/noto/NotoSansCJK-Regular.ttc",
    "/usr/share/fonts/truetype/wqy/wqy-microhei.ttc",
    "/usr/share/fonts/truetype/wqy/wqy-zenhei.ttc",
    "/usr/share/fonts/opentype/noto/NotoSansCJK-Regular.otf",
];

/// Rasterize SVG markup to PNG bytes at the size declared by the markup.
pub fn rasterize(svg: &str) -> Result<Vec<u8>> {
    let mut options = usvg::Options::default();
    load_fonts(options.fontdb_mut());

    let tree = usvg::Tree::from_str(svg, &options)
        .map_err(|e| PulseError::Render(format!("invalid chart markup: {e}")))?;

    let size = tree.size().to_int_size();
    let mut pixmap = tiny_skia::Pixmap::new(size.width(), size.height())
        .ok_or_else(|| PulseError::Render("zero-sized chart".to_string()))?;

    resvg::render(&tree, tiny_skia::Transform::default(), &mut pixmap.as_mut());

    pixmap
        .encode_png()
        .map_err(|e| PulseError::Render(format!("PNG encoding failed: {e}")))
}

fn load_fonts(fontdb: &mut usvg::fontdb::Database) {
    fontdb.load_system_fonts();
    for candidate in FONT_CANDIDATES {
        let path = Path::new(candidate);
        if path.exists() {
            // Missing or broken fonts degrade rendering, never fail it.
            if let Err(err) = fontdb.load_font_file(path) {
                warn!(font = %candidate, %err, "failed to load font file");
            }
        }
    }
}

/// Truncated SHA-256 of the generating content. Identical input yields an
/// identical name, so unchanged charts dedupe naturally.
pub fn content_hash(content: &[u8]) -> String {
    let digest = Sha256::digest(content);
    let hex: String = digest.iter().map(|b| format!("{b:02x}")).collect();
    hex[..HASH_PREFIX_LEN].to_string()
}

pub fn chart_filename(kind: &str, theme: &str, svg: &str) -> String {
    format!("{kind}-{theme}-{}.png", content_hash(svg.as_bytes()))
}

/// Rasterize and write a chart into `images_dir`, returning the file name.
pub fn write_chart(images_dir: &Path, kind: &str, theme: &str, svg: &str) -> Result<String> {
    std::fs::create_dir_all(images_dir)?;
    let filename = chart_filename(kind, theme, svg);
    let png = rasterize(svg)?;
    std::fs::write(images_dir.join(&filename), png)?;
    Ok(filename)
}

/// Delete all but the `keep` most-recently-modified PNGs in `dir`. Best
/// effort; a failed removal is only worth a warning.
pub fn sweep_old_charts(dir: &Path, keep: usize) {
    let Ok(entries) = std::fs::read_dir(dir) else {
        return;
    };

    let mut pngs: Vec<(PathBuf, std::time::SystemTime)> = entries
        .flatten()
        .filter_map(|entry| {
            let path = entry.path();
            if path.extension().is_some_and(|ext| ext == "png") {
                let modified = entry.metadata().and_then(|m| m.modified()).ok()?;
                Some((path, modified))
            } else {
                None
            }
        })
        .collect();

    pngs.sort_by(|a, b| b.1.cmp(&a.1));

    for (path, _) in pngs.into_iter().skip(keep) {
        if let Err(err) = std::fs::remove_file(&path) {
            warn!(path = %path.display(), %err, "failed to remove stale chart");
        }
    }
}
