use super::rules::{Rule, Severity};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OverallStatus {
    Pass,
    Warning,
    Fail,
}

impl OverallStatus {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Pass => "Passed",
            Self::Warning => "Has warnings",
            Self::Fail => "Failed",
        }
    }
}

/// Finding for a single failed rule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckResult {
    pub id: String,
    pub name: String,
    pub description: String,
    pub passed: bool,
    pub severity: Severity,
    pub suggestion: String,
}

impl CheckResult {
    pub(crate) fn from_rule(rule: &Rule, passed: bool) -> Self {
        Self {
            id: rule.id.to_string(),
            name: rule.name.to_string(),
            description: rule.description.to_string(),
            passed,
            severity: rule.severity,
            suggestion: rule.suggestion.to_string(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryResult {
    pub total: usize,
    pub passed: usize,
    pub errors: Vec<CheckResult>,
    pub warnings: Vec<CheckResult>,
    pub suggestions: Vec<CheckResult>,
}

impl CategoryResult {
    /// Files a failed rule into the bucket for its severity. `Info` lands in
    /// `suggestions`.
    pub(crate) fn record_failure(&mut self, result: CheckResult) {
        match result.severity {
            Severity::Error => self.errors.push(result),
            Severity::Warning => self.warnings.push(result),
            Severity::Info => self.suggestions.push(result),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryEntry {
    pub category: String,
    pub result: CategoryResult,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckReport {
    pub overall: OverallStatus,
    pub score: u8,
    pub total_checks: usize,
    pub passed_checks: usize,
    pub errors: Vec<CheckResult>,
    pub warnings: Vec<CheckResult>,
    pub suggestions: Vec<CheckResult>,
    /// Per-category results in registry order, serialized as a JSON object.
    #[serde(with = "category_map")]
    pub categories: Vec<CategoryEntry>,
}

impl CheckReport {
    pub(crate) fn from_categories(categories: Vec<CategoryEntry>) -> Self {
        let total_checks = categories.iter().map(|entry| entry.result.total).sum();
        let passed_checks = categories.iter().map(|entry| entry.result.passed).sum();

        let mut errors = Vec::new();
        let mut warnings = Vec::new();
        let mut suggestions = Vec::new();
        for entry in &categories {
            errors.extend(entry.result.errors.iter().cloned());
            warnings.extend(entry.result.warnings.iter().cloned());
            suggestions.extend(entry.result.suggestions.iter().cloned());
        }

        let overall = if !errors.is_empty() {
            OverallStatus::Fail
        } else if !warnings.is_empty() {
            OverallStatus::Warning
        } else {
            OverallStatus::Pass
        };

        Self {
            overall,
            score: percentage(passed_checks, total_checks),
            total_checks,
            passed_checks,
            errors,
            warnings,
            suggestions,
            categories,
        }
    }

    pub fn category(&self, key: &str) -> Option<&CategoryResult> {
        self.categories
            .iter()
            .find(|entry| entry.category == key)
            .map(|entry| &entry.result)
    }
}

mod category_map {
    use super::{CategoryEntry, CategoryResult};
    use serde::de::{MapAccess, Visitor};
    use serde::ser::SerializeMap;
    use serde::{Deserializer, Serializer};
    use std::fmt;

    pub(super) fn serialize<S>(
        entries: &[CategoryEntry],
        serializer: S,
    ) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut map = serializer.serialize_map(Some(entries.len()))?;
        for entry in entries {
            map.serialize_entry(&entry.category, &entry.result)?;
        }
        map.end()
    }

    pub(super) fn deserialize<'de, D>(deserializer: D) -> Result<Vec<CategoryEntry>, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct EntriesVisitor;

        impl<'de> Visitor<'de> for EntriesVisitor {
            type Value = Vec<CategoryEntry>;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a map of category results")
            }

            fn visit_map<A>(self, mut access: A) -> Result<Self::Value, A::Error>
            where
                A: MapAccess<'de>,
            {
                let mut entries = Vec::new();
                while let Some((category, result)) =
                    access.next_entry::<String, CategoryResult>()?
                {
                    entries.push(CategoryEntry { category, result });
                }
                Ok(entries)
            }
        }

        deserializer.deserialize_map(EntriesVisitor)
    }
}

/// Rounded share of passed checks, half away from zero.
fn percentage(passed: usize, total: usize) -> u8 {
    if total == 0 {
        return 0;
    }
    let scaled = (passed.min(total) * 200 + total) / (2 * total);
    scaled as u8
}
