pub mod archive;
pub mod domain;
pub mod draft;
pub mod draft_review;
pub mod quality;
pub mod review;

pub use archive::{disclosure_router, DisclosureArchive, KeyValueStore};
pub use domain::{DocumentField, DocumentRecord, KeyFeatures, RecordError};
pub use draft::{export_file_name, render_draft, DraftStatus};
pub use draft_review::{draft_review, draft_review_report, DraftReview};
pub use quality::{
    auto_fix_suggestions, generate_report, CheckReport, FixSuggestion, OverallStatus,
    QualityChecker, RuleRegistry,
};
