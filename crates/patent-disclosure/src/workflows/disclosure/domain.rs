use serde::{Deserialize, Serialize};

/// Field values collected by the disclosure form.
///
/// Every field is optional: an absent value means "not yet provided" and is a
/// valid input everywhere in this crate.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DocumentRecord {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub technical_field: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub inventor: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub department: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub document_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub background_technology: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub current_problems: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub technical_problem: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub technical_solution: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub key_features: Option<KeyFeatures>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub beneficial_effects: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub performance_data: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub embodiment_description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub drawings_description: Option<String>,
}

/// The `keyFeatures` field as received from the form layer.
///
/// Anything that is not a JSON array of strings is kept as `Malformed` so the
/// record still loads and the list rule simply fails.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum KeyFeatures {
    List(Vec<String>),
    Malformed(serde_json::Value),
}

impl KeyFeatures {
    pub fn as_list(&self) -> Option<&[String]> {
        match self {
            KeyFeatures::List(items) => Some(items),
            KeyFeatures::Malformed(_) => None,
        }
    }
}

/// Text fields of a [`DocumentRecord`], addressable without reflection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum DocumentField {
    Title,
    TechnicalField,
    Inventor,
    Department,
    DocumentId,
    Date,
    BackgroundTechnology,
    CurrentProblems,
    TechnicalProblem,
    TechnicalSolution,
    BeneficialEffects,
    PerformanceData,
    EmbodimentDescription,
    DrawingsDescription,
}

impl DocumentField {
    pub const fn key(self) -> &'static str {
        match self {
            Self::Title => "title",
            Self::TechnicalField => "technicalField",
            Self::Inventor => "inventor",
            Self::Department => "department",
            Self::DocumentId => "documentId",
            Self::Date => "date",
            Self::BackgroundTechnology => "backgroundTechnology",
            Self::CurrentProblems => "currentProblems",
            Self::TechnicalProblem => "technicalProblem",
            Self::TechnicalSolution => "technicalSolution",
            Self::BeneficialEffects => "beneficialEffects",
            Self::PerformanceData => "performanceData",
            Self::EmbodimentDescription => "embodimentDescription",
            Self::DrawingsDescription => "drawingsDescription",
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Title => "Title",
            Self::TechnicalField => "Technical Field",
            Self::Inventor => "Inventor",
            Self::Department => "Department",
            Self::DocumentId => "Document ID",
            Self::Date => "Date",
            Self::BackgroundTechnology => "Background Technology",
            Self::CurrentProblems => "Current Problems",
            Self::TechnicalProblem => "Technical Problem",
            Self::TechnicalSolution => "Technical Solution",
            Self::BeneficialEffects => "Beneficial Effects",
            Self::PerformanceData => "Performance Data",
            Self::EmbodimentDescription => "Embodiment Description",
            Self::DrawingsDescription => "Drawings Description",
        }
    }
}

impl DocumentRecord {
    pub fn from_json(raw: &str) -> Result<Self, RecordError> {
        serde_json::from_str(raw).map_err(RecordError::from)
    }

    fn slot(&self, field: DocumentField) -> &Option<String> {
        match field {
            DocumentField::Title => &self.title,
            DocumentField::TechnicalField => &self.technical_field,
            DocumentField::Inventor => &self.inventor,
            DocumentField::Department => &self.department,
            DocumentField::DocumentId => &self.document_id,
            DocumentField::Date => &self.date,
            DocumentField::BackgroundTechnology => &self.background_technology,
            DocumentField::CurrentProblems => &self.current_problems,
            DocumentField::TechnicalProblem => &self.technical_problem,
            DocumentField::TechnicalSolution => &self.technical_solution,
            DocumentField::BeneficialEffects => &self.beneficial_effects,
            DocumentField::PerformanceData => &self.performance_data,
            DocumentField::EmbodimentDescription => &self.embodiment_description,
            DocumentField::DrawingsDescription => &self.drawings_description,
        }
    }

    /// Raw field text; a missing field reads as the empty string.
    pub fn text(&self, field: DocumentField) -> &str {
        self.slot(field).as_deref().unwrap_or("")
    }

    /// Field text with surrounding whitespace removed, `None` when blank.
    pub fn trimmed(&self, field: DocumentField) -> Option<&str> {
        let value = self.text(field).trim();
        if value.is_empty() {
            None
        } else {
            Some(value)
        }
    }

    pub fn key_feature_list(&self) -> Option<&[String]> {
        self.key_features.as_ref().and_then(KeyFeatures::as_list)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum RecordError {
    #[error("document record is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),
}
