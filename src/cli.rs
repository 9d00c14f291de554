use crate::config::Config;
use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "gitpulse")]
#[command(about = "GitHub activity statistics and chart generator for profile READMEs")]
#[command(version)]
pub struct Cli {
    #[clap(flatten)]
    pub common: CommonArgs,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Args, Clone)]
pub struct CommonArgs {
    #[arg(long, help = "Path to the README to update")]
    pub readme: Option<PathBuf>,

    #[arg(long, help = "Directory name for rasterized charts")]
    pub images_dir: Option<String>,

    #[arg(long, help = "GitHub login (overrides GITHUB_USERNAME)")]
    pub username: Option<String>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Fetch activity, render charts, and rewrite the statistics block.
    /// This is the default when no subcommand is given.
    Update,
    /// Replace pulsechart fenced blocks in a markdown file with rendered
    /// images.
    Convert {
        #[arg(help = "Markdown file to scan")]
        file: PathBuf,
    },
}

impl Cli {
    pub fn parse() -> Self {
        <Self as Parser>::parse()
    }

    pub fn execute(self) -> Result<()> {
        match self.command {
            None | Some(Commands::Update) => {
                let config = Config::from_env(
                    self.common.username,
                    self.common.readme,
                    self.common.images_dir,
                )?;
                crate::update::exec(config)
            }
            Some(Commands::Convert { file }) => {
                let images_dir = self.common.images_dir.as_deref().unwrap_or("images");
                crate::convert::exec(&file, images_dir)
            }
        }
    }
}
