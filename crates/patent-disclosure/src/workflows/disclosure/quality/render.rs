use super::report::{CheckReport, CheckResult};
use super::rules::RuleCategory;

/// Renders a check report as Markdown-style text.
///
/// Sections for errors, warnings and suggestions appear only when the
/// matching list is non-empty.
pub fn generate_report(report: &CheckReport) -> String {
    let mut lines = vec![
        "# Technical Disclosure Quality Report".to_string(),
        String::new(),
        "## Overall Assessment".to_string(),
        String::new(),
        format!("- Score: {}/100", report.score),
        format!("- Status: {}", report.overall.label()),
        format!(
            "- Checks passed: {}/{}",
            report.passed_checks, report.total_checks
        ),
        String::new(),
    ];

    push_findings(&mut lines, "Errors", &report.errors);
    push_findings(&mut lines, "Warnings", &report.warnings);
    push_findings(&mut lines, "Suggestions", &report.suggestions);

    lines.push("## Category Details".to_string());
    lines.push(String::new());
    for entry in &report.categories {
        let label = RuleCategory::from_key(&entry.category)
            .map(RuleCategory::label)
            .unwrap_or(entry.category.as_str());
        let result = &entry.result;

        lines.push(format!("### {label}"));
        lines.push(format!("- Passed: {}/{}", result.passed, result.total));
        if !result.errors.is_empty() {
            lines.push(format!("- Errors: {}", result.errors.len()));
        }
        if !result.warnings.is_empty() {
            lines.push(format!("- Warnings: {}", result.warnings.len()));
        }
        if !result.suggestions.is_empty() {
            lines.push(format!("- Suggestions: {}", result.suggestions.len()));
        }
        lines.push(String::new());
    }

    lines.join("\n")
}

fn push_findings(lines: &mut Vec<String>, heading: &str, findings: &[CheckResult]) {
    if findings.is_empty() {
        return;
    }

    lines.push(format!("## {heading}"));
    lines.push(String::new());
    for (index, finding) in findings.iter().enumerate() {
        lines.push(format!(
            "{}. **{}**: {}",
            index + 1,
            finding.name,
            finding.suggestion
        ));
    }
    lines.push(String::new());
}
