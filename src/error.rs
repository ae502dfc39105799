use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),

    #[error("Audit log error: {0}")]
    Csv(#[from] csv::Error),

    #[error("target '{}' is not a directory", .0.display())]
    TargetNotDirectory(PathBuf),

    #[error("log-dir '{}' is not a directory", .0.display())]
    LogDirNotDirectory(PathBuf),

    #[error("cannot prepare log file '{}': {source}", .path.display())]
    LogFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
