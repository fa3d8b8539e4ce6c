use super::super::domain::{DocumentField, DocumentRecord};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::sync::OnceLock;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Error,
    Warning,
    Info,
}

impl Severity {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Error => "Error",
            Self::Warning => "Warning",
            Self::Info => "Info",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum RuleCategory {
    BasicInfo,
    BackgroundTech,
    TechnicalSolution,
    TechnicalEffects,
    Implementation,
}

impl RuleCategory {
    pub const fn ordered() -> [Self; 5] {
        [
            Self::BasicInfo,
            Self::BackgroundTech,
            Self::TechnicalSolution,
            Self::TechnicalEffects,
            Self::Implementation,
        ]
    }

    pub const fn key(self) -> &'static str {
        match self {
            Self::BasicInfo => "basicInfo",
            Self::BackgroundTech => "backgroundTech",
            Self::TechnicalSolution => "technicalSolution",
            Self::TechnicalEffects => "technicalEffects",
            Self::Implementation => "implementation",
        }
    }

    pub fn from_key(key: &str) -> Option<Self> {
        Self::ordered()
            .into_iter()
            .find(|category| category.key() == key)
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::BasicInfo => "Basic Information",
            Self::BackgroundTech => "Background Technology",
            Self::TechnicalSolution => "Technical Solution",
            Self::TechnicalEffects => "Technical Effects",
            Self::Implementation => "Implementation",
        }
    }
}

/// Condition a record must satisfy for a rule to pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Requirement {
    /// Field is non-empty after trimming.
    Present(DocumentField),
    /// Trimmed field holds at least this many characters.
    MinChars(DocumentField, usize),
    /// `keyFeatures` is a list with at least this many entries.
    MinItems(usize),
}

impl Requirement {
    pub fn is_met(&self, record: &DocumentRecord) -> bool {
        match *self {
            Requirement::Present(field) => record.trimmed(field).is_some(),
            Requirement::MinChars(field, minimum) => {
                record.text(field).trim().chars().count() >= minimum
            }
            Requirement::MinItems(minimum) => record
                .key_feature_list()
                .map(|items| items.len() >= minimum)
                .unwrap_or(false),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Rule {
    pub id: &'static str,
    pub name: &'static str,
    pub description: &'static str,
    pub severity: Severity,
    pub requirement: Requirement,
    pub suggestion: &'static str,
}

impl Rule {
    pub fn check(&self, record: &DocumentRecord) -> bool {
        self.requirement.is_met(record)
    }
}

#[derive(Debug, Clone)]
pub struct RuleGroup {
    pub category: RuleCategory,
    pub rules: Vec<Rule>,
}

/// Ordered rule table grouped by category.
#[derive(Debug)]
pub struct RuleRegistry {
    groups: Vec<RuleGroup>,
}

impl RuleRegistry {
    /// Builds a registry from custom groups, rejecting duplicate rule ids.
    pub fn new(groups: Vec<RuleGroup>) -> Result<Self, RegistryError> {
        let mut seen = HashSet::new();
        for rule in groups.iter().flat_map(|group| group.rules.iter()) {
            if !seen.insert(rule.id) {
                return Err(RegistryError::DuplicateRuleId(rule.id.to_string()));
            }
        }
        Ok(Self { groups })
    }

    /// Process-wide registry holding the disclosure rubric.
    pub fn standard() -> &'static RuleRegistry {
        static STANDARD: OnceLock<RuleRegistry> = OnceLock::new();
        STANDARD.get_or_init(|| Self {
            groups: standard_rule_groups(),
        })
    }

    pub fn rules(&self) -> &[RuleGroup] {
        &self.groups
    }

    pub fn rules_for(&self, category: RuleCategory) -> Option<&[Rule]> {
        self.groups
            .iter()
            .find(|group| group.category == category)
            .map(|group| group.rules.as_slice())
    }

    pub fn rule_count(&self) -> usize {
        self.groups.iter().map(|group| group.rules.len()).sum()
    }
}

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum RegistryError {
    #[error("rule id '{0}' is registered more than once")]
    DuplicateRuleId(String),
}

fn standard_rule_groups() -> Vec<RuleGroup> {
    vec![
        RuleGroup {
            category: RuleCategory::BasicInfo,
            rules: vec![
                Rule {
                    id: "title",
                    name: "Invention title",
                    description: "The disclosure names the invention.",
                    severity: Severity::Error,
                    requirement: Requirement::Present(DocumentField::Title),
                    suggestion: "Enter a concise title that names the invention.",
                },
                Rule {
                    id: "technicalField",
                    name: "Technical field",
                    description: "The technical field is described in at least 10 characters.",
                    severity: Severity::Warning,
                    requirement: Requirement::MinChars(DocumentField::TechnicalField, 10),
                    suggestion: "Describe the technical field the invention belongs to in more detail.",
                },
                Rule {
                    id: "inventor",
                    name: "Inventor",
                    description: "At least one inventor is named.",
                    severity: Severity::Error,
                    requirement: Requirement::Present(DocumentField::Inventor),
                    suggestion: "Fill in the inventor's name.",
                },
            ],
        },
        RuleGroup {
            category: RuleCategory::BackgroundTech,
            rules: vec![
                Rule {
                    id: "backgroundTechnology",
                    name: "Background technology",
                    description: "The state of the art is described in at least 50 characters.",
                    severity: Severity::Warning,
                    requirement: Requirement::MinChars(DocumentField::BackgroundTechnology, 50),
                    suggestion: "Expand the description of existing technology and how it is used today.",
                },
                Rule {
                    id: "currentProblems",
                    name: "Current problems",
                    description: "Shortcomings of the state of the art are described in at least 30 characters.",
                    severity: Severity::Error,
                    requirement: Requirement::MinChars(DocumentField::CurrentProblems, 30),
                    suggestion: "Explain the concrete problems or shortcomings of the existing technology.",
                },
            ],
        },
        RuleGroup {
            category: RuleCategory::TechnicalSolution,
            rules: vec![
                Rule {
                    id: "technicalProblem",
                    name: "Technical problem",
                    description: "The problem solved by the invention is stated in at least 20 characters.",
                    severity: Severity::Error,
                    requirement: Requirement::MinChars(DocumentField::TechnicalProblem, 20),
                    suggestion: "State clearly which technical problem the invention solves.",
                },
                Rule {
                    id: "technicalSolution",
                    name: "Technical solution",
                    description: "The solution is described in at least 100 characters.",
                    severity: Severity::Error,
                    requirement: Requirement::MinChars(DocumentField::TechnicalSolution, 100),
                    suggestion: "Describe the technical solution in detail, including its structure and steps.",
                },
                Rule {
                    id: "keyFeatures",
                    name: "Key features",
                    description: "At least three key technical features are listed.",
                    severity: Severity::Warning,
                    requirement: Requirement::MinItems(3),
                    suggestion: "List at least three key technical features of the invention.",
                },
            ],
        },
        RuleGroup {
            category: RuleCategory::TechnicalEffects,
            rules: vec![
                Rule {
                    id: "beneficialEffects",
                    name: "Beneficial effects",
                    description: "The advantages are described in at least 30 characters.",
                    severity: Severity::Error,
                    requirement: Requirement::MinChars(DocumentField::BeneficialEffects, 30),
                    suggestion: "Describe the beneficial effects compared with the existing technology.",
                },
                Rule {
                    id: "performanceData",
                    name: "Performance data",
                    description: "Measured or estimated performance data backs up the effects.",
                    severity: Severity::Info,
                    requirement: Requirement::Present(DocumentField::PerformanceData),
                    suggestion: "Add performance data or test results that support the claimed effects.",
                },
            ],
        },
        RuleGroup {
            category: RuleCategory::Implementation,
            rules: vec![Rule {
                id: "embodimentDescription",
                name: "Embodiment description",
                description: "A concrete embodiment is described in at least 50 characters.",
                severity: Severity::Warning,
                requirement: Requirement::MinChars(DocumentField::EmbodimentDescription, 50),
                suggestion: "Describe at least one concrete embodiment of the invention.",
            }],
        },
    ]
}
