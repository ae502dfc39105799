use regex::Regex;
use tracing::debug;

use crate::progress::PruneReporter;

/// File name filters. An empty set matches every name.
#[derive(Debug, Clone, Default)]
pub struct PatternSet {
    patterns: Vec<Regex>,
}

impl PatternSet {
    /// Compile each raw pattern independently. Patterns that fail to compile
    /// are reported as warnings and left out of the set.
    pub fn compile<S: AsRef<str>>(raw: &[S], reporter: &dyn PruneReporter) -> Self {
        let patterns = raw
            .iter()
            .map(AsRef::as_ref)
            .filter_map(|pattern| match Regex::new(pattern) {
                Ok(regex) => Some(regex),
                Err(err) => {
                    reporter.on_warning(&format!(
                        "skipping invalid regex '{}': {}",
                        pattern, err
                    ));
                    None
                }
            })
            .collect::<Vec<_>>();

        debug!("{} of {} name patterns active", patterns.len(), raw.len());
        Self { patterns }
    }

    /// Unanchored search: a pattern only has to match somewhere in `name`.
    pub fn matches(&self, name: &str) -> bool {
        self.patterns.is_empty() || self.patterns.iter().any(|p| p.is_match(name))
    }

    pub fn len(&self) -> usize {
        self.patterns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }
}
