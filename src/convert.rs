use crate::chart::raster::{content_hash, rasterize};
use crate::chart::{self, ChartSpec, Theme};
use crate::error::Result;
use anyhow::Context;
use console::style;
use std::path::Path;
use tracing::warn;

const FENCE_TAG: &str = "```pulsechart";
const FENCE_CLOSE: &str = "\n```";

pub fn exec(markdown: &Path, images_dir: &str) -> anyhow::Result<()> {
    let content = std::fs::read_to_string(markdown)
        .with_context(|| format!("Failed to read {}", markdown.display()))?;
    let markdown_dir = markdown.parent().unwrap_or_else(|| Path::new("."));

    let (converted, replaced) = convert_content(&content, markdown_dir, images_dir)
        .context("Failed to convert chart blocks")?;

    std::fs::write(markdown, converted)
        .with_context(|| format!("Failed to write {}", markdown.display()))?;

    println!(
        "{} {} chart block(s) converted in {}",
        style("Done:").bold().green(),
        replaced,
        markdown.display()
    );
    Ok(())
}

/// Replace each ```` ```pulsechart ```` fenced block with a reference to a
/// rasterized PNG named after the block's content hash. Blocks that fail to
/// parse or render are warned about and left untouched.
pub fn convert_content(
    content: &str,
    markdown_dir: &Path,
    images_dir: &str,
) -> Result<(String, usize)> {
    let mut out = String::with_capacity(content.len());
    let mut rest = content;
    let mut index = 0usize;
    let mut replaced = 0usize;

    while let Some(open) = rest.find(FENCE_TAG) {
        let body_start = open + FENCE_TAG.len();
        let Some(close) = rest[body_start..].find(FENCE_CLOSE) else {
            break;
        };
        let body = rest[body_start..body_start + close].trim();
        let block_end = body_start + close + FENCE_CLOSE.len();
        index += 1;

        out.push_str(&rest[..open]);
        match render_block(body, markdown_dir, images_dir, index) {
            Ok(reference) => {
                out.push_str(&reference);
                replaced += 1;
            }
            Err(err) => {
                warn!(block = index, %err, "skipping chart block");
                out.push_str(&rest[open..block_end]);
            }
        }
        rest = &rest[block_end..];
    }

    out.push_str(rest);
    Ok((out, replaced))
}

fn render_block(
    body: &str,
    markdown_dir: &Path,
    images_dir: &str,
    index: usize,
) -> Result<String> {
    let spec: ChartSpec = serde_json::from_str(body)?;
    let svg = chart::render(&spec, &Theme::light());
    let png = rasterize(&svg)?;

    let filename = format!("chart-{index}-{}.png", content_hash(body.as_bytes()));
    let images_path = markdown_dir.join(images_dir);
    std::fs::create_dir_all(&images_path)?;
    std::fs::write(images_path.join(&filename), png)?;

    Ok(format!("![Chart {index}]({images_dir}/{filename})"))
}
