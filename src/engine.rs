use chrono::{DateTime, Local};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};
use tracing::{debug, info};

use crate::audit::AuditLog;
use crate::config::{PruneConfig, PruneContext, PruneOptions};
use crate::error::Error;
use crate::patterns::PatternSet;
use crate::progress::{Phase, PruneReporter};
use crate::pruner::{self, PhaseStats};

pub struct PruneEngine {
    options: PruneOptions,
}

#[derive(Debug)]
pub struct RunSummary {
    pub log_path: PathBuf,
    pub dry_run: bool,
    pub files: PhaseStats,
    pub file_duration: Duration,
    /// `None` unless empty directory pruning was requested.
    pub dirs: Option<PhaseStats>,
    pub dir_duration: Duration,
}

impl PruneEngine {
    pub fn new(options: PruneOptions) -> Self {
        Self { options }
    }

    pub fn run(&self, reporter: &dyn PruneReporter) -> Result<RunSummary, Error> {
        self.run_at(Local::now(), reporter)
    }

    /// Run the whole pipeline against a fixed clock reading:
    /// 1. Validate target and log directories (the only fatal checks)
    /// 2. Prepare a fresh audit log
    /// 3. Prune old files
    /// 4. Optionally prune directories left empty
    pub fn run_at(
        &self,
        now: DateTime<Local>,
        reporter: &dyn PruneReporter,
    ) -> Result<RunSummary, Error> {
        let options = &self.options;
        let log_dir = options
            .log_dir
            .clone()
            .unwrap_or_else(|| options.target.clone());
        validate_dirs(&options.target, &log_dir)?;

        let log_path = make_log_path(
            &log_dir,
            options.log_file_name.as_deref(),
            &options.target,
            now,
        )?;
        if log_path.exists() {
            fs::remove_file(&log_path).map_err(|source| Error::LogFile {
                path: log_path.clone(),
                source,
            })?;
        }

        let context = PruneContext::new(now, options.max_age_days);
        debug!("Cutoff: {}", context.cutoff);

        let config = PruneConfig {
            target_root: options.target.clone(),
            max_age_days: options.max_age_days,
            dry_run: options.dry_run,
            prune_empty_dirs: options.prune_empty_dirs,
            patterns: PatternSet::compile(&options.patterns, reporter),
            log_path,
        };

        let mut log = AuditLog::create(&config.log_path)?;
        log.write_header()?;

        // Phase 1: Files
        info!("Pruning files older than {} days...", config.max_age_days);
        reporter.on_phase_start(Phase::Files);
        let file_start = Instant::now();
        let files = pruner::prune_files(&config, &context, &mut log, reporter)?;
        let file_duration = file_start.elapsed();
        reporter.on_phase_complete(Phase::Files, &files, file_duration.as_secs_f64());

        // Phase 2: Empty directories, strictly after every file is handled
        let dir_start = Instant::now();
        let dirs = if config.prune_empty_dirs {
            info!("Pruning empty directories...");
            reporter.on_phase_start(Phase::EmptyDirs);
            let stats = pruner::prune_empty_dirs(
                &config.target_root,
                config.dry_run,
                &context,
                &mut log,
                reporter,
            )?;
            reporter.on_phase_complete(
                Phase::EmptyDirs,
                &stats,
                dir_start.elapsed().as_secs_f64(),
            );
            Some(stats)
        } else {
            None
        };
        let dir_duration = dir_start.elapsed();

        log.close()?;
        info!("Audit log written to {}", config.log_path.display());

        Ok(RunSummary {
            log_path: config.log_path,
            dry_run: config.dry_run,
            files,
            file_duration,
            dirs,
            dir_duration,
        })
    }
}

fn validate_dirs(target: &Path, log_dir: &Path) -> Result<(), Error> {
    if !target.is_dir() {
        return Err(Error::TargetNotDirectory(target.to_path_buf()));
    }
    if !log_dir.is_dir() {
        return Err(Error::LogDirNotDirectory(log_dir.to_path_buf()));
    }
    Ok(())
}

/// `<log_dir>/<name>` when a name is given, otherwise
/// `<log_dir>/cleanup-<sanitized target>_<YYYYMMDD_HHMMSS>.csv`.
pub fn make_log_path(
    log_dir: &Path,
    log_file_name: Option<&str>,
    target: &Path,
    now: DateTime<Local>,
) -> Result<PathBuf, Error> {
    if let Some(name) = log_file_name.filter(|name| !name.is_empty()) {
        return Ok(log_dir.join(name));
    }

    let resolved = fs::canonicalize(target)?;
    Ok(log_dir.join(format!(
        "cleanup-{}_{}.csv",
        sanitize_path(&resolved),
        now.format("%Y%m%d_%H%M%S")
    )))
}

fn sanitize_path(path: &Path) -> String {
    path.to_string_lossy()
        .replace(['/', '\\'], "_")
        .trim_start_matches('_')
        .to_string()
}
