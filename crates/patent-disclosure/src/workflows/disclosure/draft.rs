use super::domain::{DocumentField, DocumentRecord};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

pub(crate) const PLACEHOLDER: &str = "To be completed.";
const DEFAULT_TITLE: &str = "Technical Disclosure";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DraftStatus {
    Draft,
    Final,
}

impl DraftStatus {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Draft => "Draft",
            Self::Final => "Final",
        }
    }
}

#[derive(Debug, Clone, Copy)]
enum SectionKind {
    TechnicalField,
    Background,
    Problem,
    Solution,
    Effects,
    Drawings,
    Embodiment,
}

impl SectionKind {
    const fn ordered() -> [Self; 7] {
        [
            Self::TechnicalField,
            Self::Background,
            Self::Problem,
            Self::Solution,
            Self::Effects,
            Self::Drawings,
            Self::Embodiment,
        ]
    }

    const fn heading(self) -> &'static str {
        match self {
            Self::TechnicalField => "Technical Field",
            Self::Background => "Background Technology",
            Self::Problem => "Technical Problem",
            Self::Solution => "Technical Solution",
            Self::Effects => "Beneficial Effects",
            Self::Drawings => "Description of Drawings",
            Self::Embodiment => "Detailed Embodiment",
        }
    }

    /// Section body, or `None` when the record has nothing for it yet.
    fn body(self, record: &DocumentRecord) -> Option<String> {
        match self {
            Self::TechnicalField => owned(record, DocumentField::TechnicalField),
            Self::Background => joined(
                record,
                DocumentField::BackgroundTechnology,
                DocumentField::CurrentProblems,
                "Existing problems:",
            ),
            Self::Problem => owned(record, DocumentField::TechnicalProblem),
            Self::Solution => {
                let features = record
                    .key_feature_list()
                    .map(|items| {
                        items
                            .iter()
                            .map(|item| item.trim())
                            .filter(|item| !item.is_empty())
                            .map(|item| format!("- {item}"))
                            .collect::<Vec<_>>()
                    })
                    .unwrap_or_default();

                match (record.trimmed(DocumentField::TechnicalSolution), features) {
                    (None, features) if features.is_empty() => None,
                    (solution, features) if features.is_empty() => solution.map(str::to_string),
                    (solution, features) => {
                        let mut parts = Vec::new();
                        if let Some(solution) = solution {
                            parts.push(solution.to_string());
                            parts.push(String::new());
                        }
                        parts.push("Key features:".to_string());
                        parts.push(String::new());
                        parts.extend(features);
                        Some(parts.join("\n"))
                    }
                }
            }
            Self::Effects => joined(
                record,
                DocumentField::BeneficialEffects,
                DocumentField::PerformanceData,
                "Performance data:",
            ),
            Self::Drawings => Some(
                record
                    .trimmed(DocumentField::DrawingsDescription)
                    .unwrap_or("No drawings.")
                    .to_string(),
            ),
            Self::Embodiment => owned(record, DocumentField::EmbodimentDescription),
        }
    }
}

fn owned(record: &DocumentRecord, field: DocumentField) -> Option<String> {
    record.trimmed(field).map(str::to_string)
}

fn joined(
    record: &DocumentRecord,
    primary: DocumentField,
    secondary: DocumentField,
    secondary_heading: &str,
) -> Option<String> {
    match (record.trimmed(primary), record.trimmed(secondary)) {
        (None, None) => None,
        (Some(primary), None) => Some(primary.to_string()),
        (primary, Some(secondary)) => {
            let mut parts = Vec::new();
            if let Some(primary) = primary {
                parts.push(primary.to_string());
                parts.push(String::new());
            }
            parts.push(format!("{secondary_heading} {secondary}"));
            Some(parts.join("\n"))
        }
    }
}

/// Headings of the numbered sections, in document order.
pub(crate) fn section_headings() -> [&'static str; 7] {
    SectionKind::ordered().map(SectionKind::heading)
}

/// Renders the record into a Markdown disclosure document.
///
/// Drafts carry completion markers for missing sections and a notes footer;
/// final documents carry neither.
pub fn render_draft(
    record: &DocumentRecord,
    status: DraftStatus,
    generated_on: NaiveDate,
) -> String {
    let title = record.trimmed(DocumentField::Title).unwrap_or(DEFAULT_TITLE);

    let mut lines = vec![format!("# {title}"), String::new()];

    if let Some(document_id) = record.trimmed(DocumentField::DocumentId) {
        lines.push(format!("**Document ID**: {document_id}"));
    }
    if let Some(inventor) = record.trimmed(DocumentField::Inventor) {
        lines.push(format!("**Inventor**: {inventor}"));
    }
    if let Some(department) = record.trimmed(DocumentField::Department) {
        lines.push(format!("**Department**: {department}"));
    }
    let date = record
        .trimmed(DocumentField::Date)
        .map(str::to_string)
        .unwrap_or_else(|| generated_on.format("%Y-%m-%d").to_string());
    lines.push(format!("**Date**: {date}"));
    lines.push(format!(
        "**Technical Field**: {}",
        record
            .trimmed(DocumentField::TechnicalField)
            .unwrap_or(PLACEHOLDER)
    ));
    lines.push(format!("**Status**: {}", status.label()));
    lines.push(String::new());
    lines.push("---".to_string());
    lines.push(String::new());

    for (index, section) in SectionKind::ordered().into_iter().enumerate() {
        let heading = section.heading();
        lines.push(format!("## {}. {heading}", index + 1));
        lines.push(String::new());
        match section.body(record) {
            Some(body) => lines.push(body),
            None => {
                lines.push(PLACEHOLDER.to_string());
                if status == DraftStatus::Draft {
                    lines.push(String::new());
                    lines.push(format!("<!-- TODO: complete {heading} -->"));
                }
            }
        }
        lines.push(String::new());
    }

    if status == DraftStatus::Draft {
        lines.push("---".to_string());
        lines.push(String::new());
        lines.push("## Notes".to_string());
        lines.push(String::new());
        lines.push("1. This draft was generated from the collected disclosure fields.".to_string());
        lines.push("2. Verify the technical content for accuracy and completeness.".to_string());
        lines.push(format!("3. Sections marked \"{PLACEHOLDER}\" still need content."));
        lines.push(String::new());
    }

    lines.join("\n")
}

/// File name for an exported document, e.g.
/// `technical_disclosure_Data_storage_20250307.md`.
pub fn export_file_name(record: &DocumentRecord, saved_on: NaiveDate) -> String {
    let field: String = record
        .text(DocumentField::TechnicalField)
        .trim()
        .chars()
        .filter(|ch| !matches!(ch, '\\' | '/' | '*' | '?' | ':' | '"' | '<' | '>' | '|'))
        .map(|ch| if ch.is_whitespace() || ch == ',' || ch == '，' { '_' } else { ch })
        .take(30)
        .collect();
    let field = if field.is_empty() {
        "untitled".to_string()
    } else {
        field
    };

    format!(
        "technical_disclosure_{field}_{}.md",
        saved_on.format("%Y%m%d")
    )
}
