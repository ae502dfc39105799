use chrono::{DateTime, Duration, Local, Utc};
use config::{Config, Environment, File as ConfigFile};
use serde::Deserialize;
use std::path::{Path, PathBuf};

use crate::error::Error;
use crate::patterns::PatternSet;

pub const DEFAULT_MAX_AGE_DAYS: u32 = 8;

/// Settings file looked up in the working directory when none is named.
pub const DEFAULT_SETTINGS_NAME: &str = "age-prune";

/// Optional defaults from a settings file and `AGE_PRUNE_*` environment
/// variables. Command line arguments take precedence over all of these.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub mdays: Option<u32>,
    pub dry_run: bool,
    pub prune_empty_dirs: bool,
    pub regex: Vec<String>,
    pub log_dir: Option<PathBuf>,
}

/// Environment variable carrying a single filter pattern.
pub const REGEX_ENV: &str = "AGE_PRUNE_REGEX";

pub fn load_settings(path: Option<&Path>) -> Result<Settings, Error> {
    build_settings(path, std::env::var(REGEX_ENV).ok())
}

fn build_settings(path: Option<&Path>, regex_env: Option<String>) -> Result<Settings, Error> {
    let file_source = match path {
        Some(path) => ConfigFile::from(path).required(true),
        None => ConfigFile::with_name(DEFAULT_SETTINGS_NAME).required(false),
    };

    // The environment source would hand `regex` over as a bare string, so
    // the pattern list is overridden from `regex_env` instead.
    let builder = Config::builder()
        .add_source(file_source)
        .add_source(Environment::with_prefix("AGE_PRUNE").try_parsing(true))
        .set_override_option("regex", env_patterns(regex_env))?
        .build()?;
    Ok(builder.try_deserialize::<Settings>()?)
}

/// The whole value is one pattern. Commas are regex syntax (`{1,3}`,
/// `(a,b)`) and are never treated as separators.
fn env_patterns(value: Option<String>) -> Option<Vec<String>> {
    value.map(|pattern| {
        if pattern.is_empty() {
            Vec::new()
        } else {
            vec![pattern]
        }
    })
}

/// A run request as the operator phrased it, before validation.
#[derive(Debug, Clone, PartialEq)]
pub struct PruneOptions {
    pub target: PathBuf,
    pub max_age_days: u32,
    pub dry_run: bool,
    pub prune_empty_dirs: bool,
    /// Raw regular expressions; compiled when the run starts.
    pub patterns: Vec<String>,
    /// Defaults to `target`.
    pub log_dir: Option<PathBuf>,
    /// Defaults to a name derived from the target path and start time.
    pub log_file_name: Option<String>,
}

impl PruneOptions {
    pub fn new(target: impl Into<PathBuf>) -> Self {
        Self {
            target: target.into(),
            max_age_days: DEFAULT_MAX_AGE_DAYS,
            dry_run: false,
            prune_empty_dirs: false,
            patterns: Vec::new(),
            log_dir: None,
            log_file_name: None,
        }
    }
}

/// Validated, immutable configuration for one run.
#[derive(Debug, Clone)]
pub struct PruneConfig {
    pub target_root: PathBuf,
    pub max_age_days: u32,
    pub dry_run: bool,
    pub prune_empty_dirs: bool,
    pub patterns: PatternSet,
    pub log_path: PathBuf,
}

/// The clock reading a run works from, taken once.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PruneContext {
    pub now: DateTime<Local>,
    /// Files modified at or after this instant are kept.
    pub cutoff: DateTime<Local>,
}

impl PruneContext {
    pub fn new(now: DateTime<Local>, max_age_days: u32) -> Self {
        let cutoff = now
            .checked_sub_signed(Duration::days(i64::from(max_age_days)))
            .unwrap_or_else(|| DateTime::<Utc>::MIN_UTC.with_timezone(&Local));
        Self { now, cutoff }
    }

    pub fn is_expired(&self, modified: DateTime<Local>) -> bool {
        modified < self.cutoff
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::progress::SilentReporter;
    use chrono::TimeZone;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn test_cutoff_boundary_is_retained() {
        let now = Local.with_ymd_and_hms(2024, 6, 20, 12, 0, 0).unwrap();
        let ctx = PruneContext::new(now, 8);
        assert_eq!(ctx.cutoff, now - Duration::days(8));
        assert!(!ctx.is_expired(ctx.cutoff));
        assert!(ctx.is_expired(ctx.cutoff - Duration::seconds(1)));
        assert!(!ctx.is_expired(now));
    }

    #[test]
    fn test_zero_days_only_expires_the_past() {
        let now = Local.with_ymd_and_hms(2024, 6, 20, 12, 0, 0).unwrap();
        let ctx = PruneContext::new(now, 0);
        assert!(!ctx.is_expired(now));
        assert!(ctx.is_expired(now - Duration::milliseconds(1)));
    }

    #[test]
    fn test_settings_from_file() {
        let tmp = tempdir().unwrap();
        let path = tmp.path().join("prune.toml");
        fs::write(
            &path,
            "mdays = 30\nprune_empty_dirs = true\nregex = ['\\.tmp$', '^core']\nlog_dir = '/var/log/prune'\n",
        )
        .unwrap();

        let settings = load_settings(Some(&path)).unwrap();
        assert_eq!(settings.mdays, Some(30));
        assert!(settings.prune_empty_dirs);
        assert!(!settings.dry_run);
        assert_eq!(settings.regex, vec![r"\.tmp$".to_string(), "^core".to_string()]);
        assert_eq!(settings.log_dir, Some(PathBuf::from("/var/log/prune")));
    }

    #[test]
    fn test_env_pattern_keeps_its_commas() {
        for raw in [r"^log\d{1,3}$", "(foo,bar)"] {
            assert_eq!(env_patterns(Some(raw.to_string())), Some(vec![raw.to_string()]));

            let patterns = PatternSet::compile(&[raw], &SilentReporter);
            assert_eq!(patterns.len(), 1);
        }
        assert_eq!(env_patterns(Some(String::new())), Some(Vec::new()));
        assert_eq!(env_patterns(None), None);
    }

    #[test]
    fn test_env_pattern_replaces_file_patterns() {
        let tmp = tempdir().unwrap();
        let path = tmp.path().join("prune.toml");
        fs::write(&path, "mdays = 3\nregex = ['\\.tmp$', '^core']\n").unwrap();

        let settings = build_settings(Some(&path), Some(r"^log\d{1,3}$".to_string())).unwrap();
        assert_eq!(settings.mdays, Some(3));
        assert_eq!(settings.regex, vec![r"^log\d{1,3}$".to_string()]);

        let patterns = PatternSet::compile(&settings.regex, &SilentReporter);
        assert_eq!(patterns.len(), 1);
        assert!(patterns.matches("log42"));
        assert!(!patterns.matches("log1234"));
        assert!(!patterns.matches("precious.db"));
    }

    #[test]
    fn test_named_settings_file_must_exist() {
        let tmp = tempdir().unwrap();
        assert!(load_settings(Some(&tmp.path().join("missing.toml"))).is_err());
    }

    #[test]
    fn test_options_defaults() {
        let options = PruneOptions::new("/data");
        assert_eq!(options.max_age_days, DEFAULT_MAX_AGE_DAYS);
        assert!(!options.dry_run);
        assert!(options.patterns.is_empty());
        assert!(options.log_dir.is_none());
    }
}
