//! Pattern-based intent classification.

use tracing::debug;

use super::rules::{Extraction, Rule, RuleTable};
use super::{Arguments, Domain, Intent};

/// Classifies a free-text query into an intent.
pub trait IntentClassifier: Send + Sync {
    /// Never fails: unmatched queries become [`Intent::Fallback`] and bad
    /// captures become [`Intent::Malformed`].
    fn classify(&self, query: &str) -> Intent;
}

/// Classifier backed by an ordered [`RuleTable`].
#[derive(Debug, Clone)]
pub struct PatternClassifier {
    table: RuleTable,
}

impl PatternClassifier {
    pub fn new(table: RuleTable) -> Self {
        Self { table }
    }

    /// Classifier over the rules of the given domains, in order.
    pub fn for_domains(domains: &[Domain]) -> Self {
        Self::new(RuleTable::for_domains(domains))
    }

    fn extract(rule: &Rule, normalized: &str, original: &str) -> Option<Intent> {
        let captures = rule.pattern().captures(normalized)?;
        let route = rule.route();

        let intent = match rule.extraction() {
            Extraction::RawQuery => Intent::pattern(route, Arguments::new().with("query", original)),
            Extraction::Numeric(params) => {
                let mut args = Arguments::new();
                for (position, name) in params.iter().enumerate() {
                    let raw = captures.get(position + 1).map(|m| m.as_str()).unwrap_or("");
                    match raw.parse::<f64>() {
                        Ok(value) => args.insert(*name, value),
                        Err(e) => {
                            return Some(Intent::Malformed {
                                route,
                                message: format!(
                                    "could not read {} from {:?}: {}",
                                    name, raw, e
                                ),
                            });
                        }
                    }
                }
                Intent::pattern(route, args)
            }
        };

        Some(intent)
    }
}

impl IntentClassifier for PatternClassifier {
    fn classify(&self, query: &str) -> Intent {
        let original = query.trim();
        let normalized = original.to_lowercase();

        for rule in self.table.rules() {
            if let Some(intent) = Self::extract(rule, &normalized, original) {
                debug!(route = ?intent.route(), "query matched rule");
                return intent;
            }
        }

        debug!("no rule matched query");
        Intent::fallback(original)
    }
}
