pub mod audit;
pub mod config;
pub mod engine;
pub mod error;
pub mod patterns;
pub mod progress;
pub mod pruner;
pub mod scanner;

pub use crate::audit::{AuditLog, AuditRecord, AuditSink, MemorySink, Outcome};
pub use crate::config::{PruneConfig, PruneContext, PruneOptions, Settings};
pub use crate::engine::{PruneEngine, RunSummary};
pub use crate::error::Error;
pub use crate::patterns::PatternSet;
pub use crate::progress::{Phase, PruneReporter, SilentReporter};
pub use crate::pruner::PhaseStats;
