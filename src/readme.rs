use crate::compose::{BLOCK_END, BLOCK_START};
use crate::error::Result;
use std::path::Path;

/// Template token substituted when no previous block exists in the file.
pub const PLACEHOLDER: &str = "{{STATS_SECTION}}";

/// Splice `block` into `content`: replace the existing delimited block if
/// both markers are present in order, else substitute the template
/// placeholder, else append at end-of-file. Applying the same block twice
/// is a no-op the second time.
pub fn splice(content: &str, block: &str) -> String {
    if let (Some(start), Some(end)) = (content.find(BLOCK_START), content.find(BLOCK_END)) {
        if end > start {
            let after = &content[end + BLOCK_END.len()..];
            return format!("{}{}{}", &content[..start], block, after);
        }
    }

    if content.contains(PLACEHOLDER) {
        return content.replacen(PLACEHOLDER, block, 1);
    }

    let mut out = content.to_string();
    if !out.is_empty() && !out.ends_with('\n') {
        out.push('\n');
    }
    out.push('\n');
    out.push_str(block);
    out.push('\n');
    out
}

/// Rewrite the README in place. Plain overwrite, not an atomic rename; the
/// artifact is low-stakes and regenerated on the next run.
pub fn update_file(path: &Path, block: &str) -> Result<()> {
    let content = match std::fs::read_to_string(path) {
        Ok(content) => content,
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => String::new(),
        Err(err) => return Err(err.into()),
    };
    let updated = splice(&content, block);
    std::fs::write(path, updated)?;
    Ok(())
}
