//! src/cli.rs
//! ============================================================================
//! Command-line arguments. Anything given here overrides the config file for
//! this run only; the file itself is never rewritten.

use std::{num::NonZeroUsize, path::PathBuf};

use clap::Parser;
use compact_str::CompactString;

use crate::config::Config;

#[derive(Parser, Debug, Default)]
#[command(name = "roster")]
#[command(about = "Browse a user dataset with search, sort and paging", long_about = None)]
#[command(version)]
pub struct Args {
    /// JSON array of user records (defaults to the bundled sample)
    #[arg(short, long, value_name = "PATH")]
    pub data: Option<PathBuf>,

    /// Rows per page
    #[arg(short = 'n', long, value_name = "N")]
    pub page_size: Option<NonZeroUsize>,

    /// Config file to use instead of the platform default
    #[arg(short, long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Log filter directive, e.g. "debug" or "roster_core=trace"
    #[arg(long, value_name = "LEVEL")]
    pub log_level: Option<String>,

    /// Show the id column
    #[arg(long)]
    pub show_id: bool,
}

impl Args {
    pub fn apply_to(&self, config: &mut Config) {
        if let Some(data) = &self.data {
            config.data_path = Some(data.clone());
        }
        if let Some(size) = self.page_size {
            config.view.page_size = size.get();
        }
        if let Some(level) = &self.log_level {
            config.logging.level = CompactString::from(level.as_str());
        }
        if self.show_id {
            config.view.show_id = true;
        }
    }
}
