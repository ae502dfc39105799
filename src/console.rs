use age_prune::{Phase, PhaseStats, PruneReporter, RunSummary};
use colored::*;
use std::path::Path;

/// Console reporter: notices on stdout, warnings on stderr.
pub struct ConsoleReporter;

impl PruneReporter for ConsoleReporter {
    fn on_would_delete(&self, path: &Path) {
        println!("{} would delete: {}", "[dry-run]".cyan(), path.display());
    }

    fn on_would_remove_dir(&self, path: &Path) {
        println!(
            "{} would remove empty dir: {}",
            "[dry-run]".cyan(),
            path.display()
        );
    }

    fn on_warning(&self, message: &str) {
        eprintln!("{} {}", "warning:".yellow(), message);
    }

    fn on_phase_complete(&self, phase: Phase, stats: &PhaseStats, duration_secs: f64) {
        println!(
            "  {} {} pass: {} scanned in {:.2}s",
            "✓".green(),
            phase.label(),
            stats.scanned,
            duration_secs
        );
    }
}

fn describe(stats: &PhaseStats, dry_run: bool) -> String {
    let acted = if dry_run {
        format!("{} previewed", stats.previewed)
    } else {
        format!("{} removed", stats.removed)
    };
    let failed = format!("{} failed", stats.failed);
    let failed = if stats.failed > 0 {
        failed.red().to_string()
    } else {
        failed
    };
    format!(
        "{}, {}, {} kept ({} logged)",
        acted.green(),
        failed,
        stats.retained,
        stats.recorded()
    )
}

pub fn print_summary(summary: &RunSummary) {
    println!("Files: {}", describe(&summary.files, summary.dry_run));
    if let Some(dirs) = &summary.dirs {
        println!("Empty dirs: {}", describe(dirs, summary.dry_run));
    }
    println!("Log: {}", summary.log_path.display());
}
