use age_prune::config::{PruneOptions, Settings, DEFAULT_MAX_AGE_DAYS};
use clap::Parser;
use std::path::PathBuf;

#[derive(Debug, Parser)] // requires `derive` feature
#[command(name = "age-prune")]
#[command(about = "Delete files older than N days under a target directory", long_about = None)]
pub struct Cli {
    /// Directory to clean up
    pub target: PathBuf,

    /// Delete files older than this many days [default: 8]
    #[arg(long, value_name = "DAYS")]
    pub mdays: Option<u32>,

    /// Print actions without deleting
    #[arg(long)]
    pub dry_run: bool,

    /// Remove empty subdirectories after file deletion
    #[arg(long)]
    pub prune_empty_dirs: bool,

    /// Filename regex filter (repeatable); only matching files are deleted
    #[arg(long, value_name = "PATTERN", allow_hyphen_values = true)]
    pub regex: Vec<String>,

    /// Directory for the CSV log [default: target]
    #[arg(long, value_name = "DIR")]
    pub log_dir: Option<PathBuf>,

    /// CSV log filename [default: auto-generated]
    #[arg(long, value_name = "NAME")]
    pub log_file_name: Option<String>,

    /// Settings file with defaults [default: ./age-prune.toml when present]
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,
}

impl Cli {
    /// Arguments given on the command line win over settings. Flags can
    /// only switch a behaviour on.
    pub fn into_options(self, settings: Settings) -> PruneOptions {
        PruneOptions {
            target: self.target,
            max_age_days: self
                .mdays
                .or(settings.mdays)
                .unwrap_or(DEFAULT_MAX_AGE_DAYS),
            dry_run: self.dry_run || settings.dry_run,
            prune_empty_dirs: self.prune_empty_dirs || settings.prune_empty_dirs,
            patterns: if self.regex.is_empty() {
                settings.regex
            } else {
                self.regex
            },
            log_dir: self.log_dir.or(settings.log_dir),
            log_file_name: self.log_file_name,
        }
    }
}
