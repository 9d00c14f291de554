use crate::error::{PulseError, Result};
use chrono::{FixedOffset, Offset, Utc};
use std::path::PathBuf;

pub const DEFAULT_USERNAME: &str = "octocat";

/// Everything a run needs, resolved once at startup. Components take this
/// by reference instead of reading the environment themselves.
#[derive(Debug, Clone)]
pub struct Config {
    pub token: String,
    pub username: String,
    pub readme: PathBuf,
    pub images_dir: String,
    /// Civil offset used for week/day boundaries.
    pub utc_offset: FixedOffset,
}

impl Config {
    pub fn from_env(
        username_override: Option<String>,
        readme: Option<PathBuf>,
        images_dir: Option<String>,
    ) -> Result<Self> {
        let token = std::env::var("GITHUB_TOKEN").map_err(|_| PulseError::MissingToken)?;
        let username = username_override
            .or_else(|| std::env::var("GITHUB_USERNAME").ok())
            .unwrap_or_else(|| DEFAULT_USERNAME.to_string());

        Ok(Self {
            token,
            username,
            readme: readme.unwrap_or_else(|| PathBuf::from("README.md")),
            images_dir: images_dir.unwrap_or_else(|| "images".to_string()),
            utc_offset: default_offset(),
        })
    }
}

/// UTC+8, the offset the activity windows are anchored to.
pub fn default_offset() -> FixedOffset {
    FixedOffset::east_opt(8 * 3600).unwrap_or_else(|| Utc.fix())
}
