use crate::infra::{parse_date, read_record, InMemoryStore};
use chrono::{Local, NaiveDate};
use clap::Args;
use patent_disclosure::config::AppConfig;
use patent_disclosure::error::AppError;
use patent_disclosure::workflows::disclosure::quality::{RuleCategory, SystemClock, ThreadRandom};
use patent_disclosure::workflows::disclosure::review::{ReviewOperation, ReviewRequest};
use patent_disclosure::workflows::disclosure::{
    auto_fix_suggestions, draft_review, draft_review_report, export_file_name, generate_report,
    render_draft, CheckReport, DisclosureArchive, DocumentRecord, DraftStatus, KeyFeatures,
    QualityChecker, RuleRegistry,
};
use std::path::PathBuf;
use std::sync::Arc;

#[derive(Args, Debug)]
pub(crate) struct CheckArgs {
    /// Path to a JSON disclosure record
    #[arg(long)]
    pub(crate) record: PathBuf,
    /// Print the report as JSON instead of Markdown
    #[arg(long)]
    pub(crate) json: bool,
}

#[derive(Args, Debug)]
pub(crate) struct DraftArgs {
    /// Path to a JSON disclosure record
    #[arg(long)]
    pub(crate) record: PathBuf,
    /// Render the final form without placeholders and notes
    #[arg(long = "final")]
    pub(crate) final_form: bool,
    /// Date stamped on the draft (YYYY-MM-DD). Defaults to today.
    #[arg(long, value_parser = parse_date)]
    pub(crate) date: Option<NaiveDate>,
    /// Write the draft into this directory instead of stdout
    #[arg(long)]
    pub(crate) output_dir: Option<PathBuf>,
}

#[derive(Args, Debug)]
pub(crate) struct ReviewArgs {
    /// Path to a Markdown draft
    #[arg(long, required_unless_present = "record", conflicts_with = "record")]
    pub(crate) draft: Option<PathBuf>,
    /// Path to a JSON disclosure record, rendered as a draft before review
    #[arg(long)]
    pub(crate) record: Option<PathBuf>,
    /// Print the review as JSON instead of Markdown
    #[arg(long)]
    pub(crate) json: bool,
    /// Print the payload for an external generator (draft, review or polish)
    #[arg(long, value_parser = parse_operation, requires = "record")]
    pub(crate) request: Option<ReviewOperation>,
}

fn parse_operation(raw: &str) -> Result<ReviewOperation, String> {
    serde_json::from_value(serde_json::Value::String(raw.trim().to_ascii_lowercase()))
        .map_err(|_| format!("unknown operation '{raw}'; expected draft, review or polish"))
}

#[derive(Args, Debug)]
pub(crate) struct AutofixArgs {
    /// Path to a JSON disclosure record
    #[arg(long)]
    pub(crate) record: PathBuf,
}

pub(crate) fn run_check(args: CheckArgs) -> Result<(), AppError> {
    let record = read_record(&args.record)?;
    let report = QualityChecker::default().check_document(&record);
    println!("{}", check_output(&report, args.json)?);
    Ok(())
}

fn check_output(report: &CheckReport, as_json: bool) -> Result<String, AppError> {
    if as_json {
        to_pretty_json(report)
    } else {
        Ok(generate_report(report))
    }
}

fn to_pretty_json<T: serde::Serialize>(value: &T) -> Result<String, AppError> {
    serde_json::to_string_pretty(value).map_err(|err| AppError::Io(std::io::Error::from(err)))
}

pub(crate) fn run_draft(args: DraftArgs) -> Result<(), AppError> {
    let record = read_record(&args.record)?;
    let status = if args.final_form {
        DraftStatus::Final
    } else {
        DraftStatus::Draft
    };
    let date = args.date.unwrap_or_else(|| Local::now().date_naive());
    let markdown = render_draft(&record, status, date);

    match args.output_dir {
        Some(dir) => {
            std::fs::create_dir_all(&dir)?;
            let path = dir.join(export_file_name(&record, date));
            std::fs::write(&path, markdown)?;
            println!("{} written to {}", status.label(), path.display());
        }
        None => println!("{markdown}"),
    }
    Ok(())
}

pub(crate) fn run_review(args: ReviewArgs) -> Result<(), AppError> {
    let today = Local::now().date_naive();
    let markdown = match (&args.draft, &args.record) {
        (Some(path), _) => std::fs::read_to_string(path)?,
        (None, Some(path)) => {
            let record = read_record(path)?;
            if let Some(operation) = args.request {
                let request = ReviewRequest::for_record(operation, &record, today);
                println!("{}", to_pretty_json(&request)?);
                return Ok(());
            }
            render_draft(&record, DraftStatus::Draft, today)
        }
        (None, None) => String::new(),
    };

    let review = draft_review(&markdown);
    if args.json {
        println!("{}", to_pretty_json(&review)?);
    } else {
        println!("{}", draft_review_report(&review));
    }
    Ok(())
}

pub(crate) fn run_rules() -> Result<(), AppError> {
    println!("{}", rule_catalogue(RuleRegistry::standard()));
    Ok(())
}

fn rule_catalogue(registry: &RuleRegistry) -> String {
    let mut lines = Vec::new();
    for category in RuleCategory::ordered() {
        let Some(rules) = registry.rules_for(category) else {
            continue;
        };
        lines.push(format!("{} ({})", category.label(), rules.len()));
        for rule in rules {
            lines.push(format!(
                "  [{}] {}: {}",
                rule.severity.label(),
                rule.id,
                rule.description
            ));
        }
    }
    lines.join("\n")
}

pub(crate) fn run_autofix(args: AutofixArgs) -> Result<(), AppError> {
    let config = AppConfig::load()?;
    let record = read_record(&args.record)?;
    let suggestions = auto_fix_suggestions(
        &record,
        &config.archive.id_prefix,
        &SystemClock,
        &mut ThreadRandom,
    );

    if suggestions.is_empty() {
        println!("Nothing to fill in: title, document ID and date are already set.");
    }
    for suggestion in suggestions {
        println!("{}: {}", suggestion.field.label(), suggestion.proposed_value);
    }
    Ok(())
}

pub(crate) fn run_demo() -> Result<(), AppError> {
    let today = Local::now().date_naive();
    let archive = DisclosureArchive::new(Arc::new(InMemoryStore::default()));

    let mut stages = demo_stages();
    println!("Technical disclosure walkthrough");
    for (stage, record) in &stages {
        let report = archive.check(record);
        println!(
            "- {stage}: score {}/100, {} ({} errors, {} warnings, {} suggestions)",
            report.score,
            report.overall.label(),
            report.errors.len(),
            report.warnings.len(),
            report.suggestions.len(),
        );
    }

    let (_, record) = stages
        .pop()
        .ok_or_else(|| AppError::Io(std::io::Error::other("demo has no stages")))?;
    println!("\n{}", generate_report(&archive.check(&record)));

    let saved = archive.save_document(record, today)?;
    println!(
        "\nArchived {} as {} ({})",
        saved.entry.document_id,
        saved.entry.file_name,
        saved.entry.overall.label()
    );
    Ok(())
}

fn demo_stages() -> Vec<(&'static str, DocumentRecord)> {
    let outline = DocumentRecord {
        title: Some("Adaptive sensor batching".to_string()),
        technical_field: Some("Industrial sensor networks".to_string()),
        ..DocumentRecord::default()
    };

    let with_background = DocumentRecord {
        inventor: Some("R. Okafor".to_string()),
        department: Some("Embedded Systems".to_string()),
        background_technology: Some(
            "Battery powered sensor nodes transmit every reading as soon as it is sampled, \
             keeping the radio active for most of the duty cycle."
                .to_string(),
        ),
        current_problems: Some(
            "Frequent transmissions drain batteries within months and congest shared channels."
                .to_string(),
        ),
        ..outline.clone()
    };

    let complete = DocumentRecord {
        technical_problem: Some(
            "Reduce radio-on time without losing time-critical readings.".to_string(),
        ),
        technical_solution: Some(
            "Each node buffers readings and sizes the next batch from the observed variance. \
             Readings that cross an alarm threshold bypass the buffer and are sent at once, \
             while the rest are compressed and flushed when the batch window closes."
                .to_string(),
        ),
        key_features: Some(KeyFeatures::List(vec![
            "Variance-driven batch sizing".to_string(),
            "Threshold bypass for alarms".to_string(),
            "Delta compression before flush".to_string(),
        ])),
        beneficial_effects: Some(
            "Radio-on time drops sharply and alarms are still delivered within one sample period."
                .to_string(),
        ),
        performance_data: Some("Field trial: 4.1x battery life over 90 days.".to_string()),
        embodiment_description: Some(
            "A node samples vibration at 10 Hz, batches up to 64 readings and flushes every \
             30 seconds unless an alarm reading arrives first."
                .to_string(),
        ),
        ..with_background.clone()
    };

    vec![
        ("Outline", outline),
        ("Background added", with_background),
        ("Complete", complete),
    ]
}
