use std::collections::BTreeSet;

use chrono::NaiveDate;
use patent_disclosure::workflows::disclosure::quality::RuleCategory;
use patent_disclosure::workflows::disclosure::review::{IssueLevel, ReviewResult};
use patent_disclosure::workflows::disclosure::{
    generate_report, render_draft, CheckReport, DocumentField, DocumentRecord, DraftStatus,
    OverallStatus, QualityChecker,
};

const COMPLETE_RECORD: &str = r#"{
    "title": "Widget",
    "technicalField": "Rotary fastening tools",
    "inventor": "Jane Doe",
    "backgroundTechnology": "Conventional drivers apply torque through a fixed clutch that cannot sense joint stiffness.",
    "currentProblems": "Fasteners are routinely over-tightened and stripped.",
    "technicalProblem": "Stop tightening at the right torque for any joint.",
    "technicalSolution": "A strain gauge in the spindle feeds a controller that models joint stiffness during the first turns and cuts motor power once the predicted seating torque is reached.",
    "keyFeatures": ["Spindle strain gauge", "Stiffness model", "Predictive cut-off"],
    "beneficialEffects": "Stripped fasteners fall to near zero across joint types.",
    "performanceData": "0.3% stripping rate over 12,000 joints.",
    "embodimentDescription": "A cordless driver with a 12 V motor, a spindle gauge and a microcontroller sampling at 2 kHz."
}"#;

fn complete_record() -> DocumentRecord {
    DocumentRecord::from_json(COMPLETE_RECORD).expect("fixture parses")
}

fn error_rules_only() -> DocumentRecord {
    let complete = complete_record();
    DocumentRecord {
        title: complete.title,
        inventor: complete.inventor,
        current_problems: complete.current_problems,
        technical_problem: complete.technical_problem,
        technical_solution: complete.technical_solution,
        beneficial_effects: complete.beneficial_effects,
        ..DocumentRecord::default()
    }
}

#[test]
fn empty_json_object_fails_with_six_errors() {
    let record = DocumentRecord::from_json("{}").expect("empty object parses");
    let report = QualityChecker::default().check_document(&record);

    assert_eq!(report.overall, OverallStatus::Fail);
    assert_eq!(report.score, 0);
    assert_eq!(report.total_checks, 11);
    assert_eq!(report.passed_checks, 0);

    let error_ids: Vec<&str> = report.errors.iter().map(|check| check.id.as_str()).collect();
    assert_eq!(
        error_ids,
        [
            "title",
            "inventor",
            "currentProblems",
            "technicalProblem",
            "technicalSolution",
            "beneficialEffects"
        ]
    );
}

#[test]
fn complete_record_passes_with_empty_buckets() {
    let report = QualityChecker::default().check_document(&complete_record());

    assert_eq!(report.overall, OverallStatus::Pass);
    assert_eq!(report.score, 100);
    assert!(report.errors.is_empty());
    assert!(report.warnings.is_empty());
    assert!(report.suggestions.is_empty());
}

#[test]
fn satisfying_error_rules_only_gives_warning_status() {
    let report = QualityChecker::default().check_document(&error_rules_only());

    assert_eq!(report.overall, OverallStatus::Warning);
    assert!(report.errors.is_empty());
    assert!(!report.warnings.is_empty());
}

fn failing_ids(report: &CheckReport) -> BTreeSet<String> {
    report
        .errors
        .iter()
        .chain(&report.warnings)
        .chain(&report.suggestions)
        .map(|check| check.id.clone())
        .collect()
}

#[test]
fn filling_a_field_resolves_only_its_own_rule() {
    let checker = QualityChecker::default();
    let complete = complete_record();
    let mut record = DocumentRecord::default();
    let mut previous = checker.check_document(&record);

    let steps: [(&str, fn(&mut DocumentRecord, &DocumentRecord)); 11] = [
        ("title", |r, c| r.title = c.title.clone()),
        ("technicalField", |r, c| {
            r.technical_field = c.technical_field.clone()
        }),
        ("inventor", |r, c| r.inventor = c.inventor.clone()),
        ("backgroundTechnology", |r, c| {
            r.background_technology = c.background_technology.clone()
        }),
        ("currentProblems", |r, c| {
            r.current_problems = c.current_problems.clone()
        }),
        ("technicalProblem", |r, c| {
            r.technical_problem = c.technical_problem.clone()
        }),
        ("technicalSolution", |r, c| {
            r.technical_solution = c.technical_solution.clone()
        }),
        ("keyFeatures", |r, c| r.key_features = c.key_features.clone()),
        ("beneficialEffects", |r, c| {
            r.beneficial_effects = c.beneficial_effects.clone()
        }),
        ("performanceData", |r, c| {
            r.performance_data = c.performance_data.clone()
        }),
        ("embodimentDescription", |r, c| {
            r.embodiment_description = c.embodiment_description.clone()
        }),
    ];

    for (rule_id, step) in steps {
        step(&mut record, &complete);
        let report = checker.check_document(&record);

        let mut expected = failing_ids(&previous);
        assert!(expected.remove(rule_id), "{rule_id} should fail before its field is set");
        assert_eq!(failing_ids(&report), expected, "filling {rule_id} changed other rules");
        assert_eq!(report.passed_checks, previous.passed_checks + 1);
        assert!(
            report.score >= previous.score,
            "score dropped from {} to {}",
            previous.score,
            report.score
        );
        previous = report;
    }
    assert_eq!(previous.score, 100);
}

#[test]
fn minimum_length_counts_characters_not_bytes() {
    let mut record = error_rules_only();
    // Ten CJK characters is exactly the technical field minimum.
    record.technical_field = Some("工业传感器网络数据采".to_string());
    let report = QualityChecker::default().check_document(&record);
    let basic = report
        .category(RuleCategory::BasicInfo.key())
        .expect("basic info category");
    assert_eq!(basic.passed, basic.total);
}

#[test]
fn key_features_as_a_string_fails_cleanly() {
    let raw = COMPLETE_RECORD.replace(
        r#"["Spindle strain gauge", "Stiffness model", "Predictive cut-off"]"#,
        r#""Spindle strain gauge, stiffness model, predictive cut-off""#,
    );
    let record = DocumentRecord::from_json(&raw).expect("string keyFeatures still parses");
    let report = QualityChecker::default().check_document(&record);

    assert_eq!(report.overall, OverallStatus::Warning);
    assert_eq!(report.warnings.len(), 1);
    assert_eq!(report.warnings[0].id, "keyFeatures");
}

#[test]
fn whitespace_only_fields_count_as_missing() {
    let mut record = complete_record();
    record.inventor = Some("   \n\t".to_string());
    let report = QualityChecker::default().check_document(&record);

    assert_eq!(report.overall, OverallStatus::Fail);
    assert_eq!(report.errors.len(), 1);
    assert_eq!(report.errors[0].id, "inventor");
}

#[test]
fn passing_report_omits_finding_sections() {
    let report = QualityChecker::default().check_document(&complete_record());
    let markdown = generate_report(&report);

    assert!(!markdown.contains("## Errors"));
    assert!(!markdown.contains("## Warnings"));
    assert!(!markdown.contains("## Suggestions"));
    for category in RuleCategory::ordered() {
        assert!(
            markdown.contains(&format!("### {}", category.label())),
            "missing detail for {}",
            category.label()
        );
    }
}

#[test]
fn checks_run_concurrently_with_identical_results() {
    let checker = QualityChecker::default();
    let record = error_rules_only();
    let expected = checker.check_document(&record);

    std::thread::scope(|scope| {
        let handles: Vec<_> = (0..4)
            .map(|_| scope.spawn(|| checker.check_document(&record)))
            .collect();
        for handle in handles {
            assert_eq!(handle.join().expect("worker finishes"), expected);
        }
    });
}

#[test]
fn draft_and_final_forms_differ_only_in_markers() {
    let date = NaiveDate::from_ymd_opt(2025, 3, 7).expect("valid date");
    let mut record = complete_record();
    record.embodiment_description = None;

    let draft = render_draft(&record, DraftStatus::Draft, date);
    let final_form = render_draft(&record, DraftStatus::Final, date);

    assert!(draft.contains("<!-- TODO: complete Detailed Embodiment -->"));
    assert!(!final_form.contains("<!-- TODO"));
    assert!(final_form.contains("To be completed."));
    assert!(final_form.contains(record.text(DocumentField::TechnicalSolution)));
}

#[test]
fn review_response_parses_inside_prose() {
    let text = r#"Here is my assessment:
{"totalScore": 82, "scores": {"completeness": 90, "clarity": 75},
 "issues": [{"level": "warning", "category": "clarity", "message": "Solution mixes steps", "suggestion": "Number the steps"}]}
Let me know if you need more."#;

    let result = ReviewResult::from_response_text(text).expect("embedded json parses");
    assert_eq!(result.total_score, 82);
    assert_eq!(result.scores.get("clarity"), Some(&75));
    assert_eq!(result.issues_at(IssueLevel::Warning).count(), 1);
    assert_eq!(result.issues_at(IssueLevel::Error).count(), 0);
}
