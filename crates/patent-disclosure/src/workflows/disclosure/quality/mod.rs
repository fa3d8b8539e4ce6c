//! Rule-based quality checking for disclosure records.
//!
//! Everything here is deterministic except [`auto_fix_suggestions`], which
//! reads the injected clock and random source.

mod autofix;
mod render;
mod report;
mod rules;

pub use autofix::{
    auto_fix_suggestions, Clock, FixSuggestion, RandomSource, SystemClock, ThreadRandom,
    DEFAULT_ID_PREFIX,
};
pub use render::generate_report;
pub use report::{CategoryEntry, CategoryResult, CheckReport, CheckResult, OverallStatus};
pub use rules::{
    RegistryError, Requirement, Rule, RuleCategory, RuleGroup, RuleRegistry, Severity,
};

use super::domain::DocumentRecord;

/// Stateless checker that evaluates a record against a rule registry.
#[derive(Debug, Clone, Copy)]
pub struct QualityChecker<'r> {
    registry: &'r RuleRegistry,
}

impl Default for QualityChecker<'static> {
    fn default() -> Self {
        Self::new(RuleRegistry::standard())
    }
}

impl<'r> QualityChecker<'r> {
    pub fn new(registry: &'r RuleRegistry) -> Self {
        Self { registry }
    }

    pub fn registry(&self) -> &'r RuleRegistry {
        self.registry
    }

    pub fn check_document(&self, record: &DocumentRecord) -> CheckReport {
        let categories = self
            .registry
            .rules()
            .iter()
            .map(|group| CategoryEntry {
                category: group.category.key().to_string(),
                result: evaluate_group(group, record),
            })
            .collect();

        CheckReport::from_categories(categories)
    }
}

fn evaluate_group(group: &RuleGroup, record: &DocumentRecord) -> CategoryResult {
    let mut result = CategoryResult {
        total: group.rules.len(),
        ..CategoryResult::default()
    };

    for rule in &group.rules {
        if rule.check(record) {
            result.passed += 1;
        } else {
            result.record_failure(CheckResult::from_rule(rule, false));
        }
    }

    result
}
