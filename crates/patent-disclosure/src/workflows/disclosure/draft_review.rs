//! Offline review of a rendered disclosure draft.
//!
//! Works on the Markdown text alone, so it applies equally to drafts from
//! [`super::draft::render_draft`] and to documents edited by hand.

use serde::{Deserialize, Serialize};

use super::draft::{section_headings, PLACEHOLDER};

const MARKERS: [&str; 2] = ["TODO", "FIXME"];
const CHECK_COUNT: usize = 4;

/// A heading nested more than one level below the heading before it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HeadingJump {
    pub line: usize,
    pub from_level: usize,
    pub to_level: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DraftReview {
    pub present_sections: Vec<String>,
    pub missing_sections: Vec<String>,
    /// Placeholder lines plus TODO/FIXME markers.
    pub placeholders: usize,
    pub heading_jumps: Vec<HeadingJump>,
    /// Runs of two or more consecutive blank lines.
    pub blank_line_runs: usize,
    pub passed_checks: usize,
    pub total_checks: usize,
    pub score: u8,
}

impl DraftReview {
    pub fn is_clean(&self) -> bool {
        self.passed_checks == self.total_checks
    }
}

/// Reviews a Markdown draft for missing sections, leftover placeholders,
/// heading-level jumps and stray blank lines.
pub fn draft_review(markdown: &str) -> DraftReview {
    let (present_sections, missing_sections): (Vec<_>, Vec<_>) = section_headings()
        .into_iter()
        .partition(|heading| has_section(markdown, heading));

    let placeholders = markdown.lines().map(placeholder_count).sum();
    let heading_jumps = heading_jumps(markdown);
    let blank_line_runs = blank_line_runs(markdown);

    let has_content = !markdown.trim().is_empty();
    let passed_checks = [
        missing_sections.is_empty(),
        has_content && placeholders == 0,
        has_content && heading_jumps.is_empty() && blank_line_runs == 0,
        has_content,
    ]
    .into_iter()
    .filter(|passed| *passed)
    .count();

    DraftReview {
        present_sections: present_sections.into_iter().map(str::to_string).collect(),
        missing_sections: missing_sections.into_iter().map(str::to_string).collect(),
        placeholders,
        heading_jumps,
        blank_line_runs,
        passed_checks,
        total_checks: CHECK_COUNT,
        score: (passed_checks * 100 / CHECK_COUNT) as u8,
    }
}

/// Markdown summary of a [`DraftReview`].
pub fn draft_review_report(review: &DraftReview) -> String {
    let mut lines = vec![
        "# Technical Disclosure Draft Review".to_string(),
        String::new(),
        format!(
            "- Score: {}% ({}/{})",
            review.score, review.passed_checks, review.total_checks
        ),
        String::new(),
        "## Sections".to_string(),
        String::new(),
        format!(
            "- Present: {}/{}",
            review.present_sections.len(),
            review.present_sections.len() + review.missing_sections.len()
        ),
    ];
    for section in &review.missing_sections {
        lines.push(format!("- Missing: {section}"));
    }

    lines.push(String::new());
    lines.push("## Content".to_string());
    lines.push(String::new());
    if review.placeholders == 0 {
        lines.push("- No placeholders left.".to_string());
    } else {
        lines.push(format!(
            "- {} placeholder(s) still need content.",
            review.placeholders
        ));
    }

    lines.push(String::new());
    lines.push("## Formatting".to_string());
    lines.push(String::new());
    for jump in &review.heading_jumps {
        lines.push(format!(
            "- Line {}: heading jumps from level {} to level {}.",
            jump.line, jump.from_level, jump.to_level
        ));
    }
    if review.blank_line_runs > 0 {
        lines.push(format!(
            "- {} run(s) of consecutive blank lines.",
            review.blank_line_runs
        ));
    }
    if review.heading_jumps.is_empty() && review.blank_line_runs == 0 {
        lines.push("- Formatting is consistent.".to_string());
    }

    lines.join("\n")
}

fn heading_level(line: &str) -> Option<(usize, &str)> {
    let level = line.chars().take_while(|ch| *ch == '#').count();
    let rest = &line[level..];
    if level == 0 || !rest.starts_with(char::is_whitespace) {
        return None;
    }
    Some((level, rest.trim()))
}

/// Matches `## 3. Heading`, `### Heading` and similar at levels two and three.
fn has_section(markdown: &str, heading: &str) -> bool {
    markdown.lines().filter_map(heading_level).any(|(level, text)| {
        if !(2..=3).contains(&level) {
            return false;
        }
        let unnumbered = match text.split_once('.') {
            Some((number, rest))
                if !number.is_empty() && number.chars().all(|ch| ch.is_ascii_digit()) =>
            {
                rest.trim()
            }
            _ => text,
        };
        unnumbered == heading
    })
}

fn placeholder_count(line: &str) -> usize {
    let trimmed = line.trim();
    let placeholder = trimmed == PLACEHOLDER || trimmed.ends_with(&format!(": {PLACEHOLDER}"));
    let markers: usize = MARKERS.iter().map(|marker| trimmed.matches(marker).count()).sum();
    usize::from(placeholder) + markers
}

fn heading_jumps(markdown: &str) -> Vec<HeadingJump> {
    let mut jumps = Vec::new();
    let mut previous: Option<usize> = None;
    for (index, line) in markdown.lines().enumerate() {
        let Some((level, _)) = heading_level(line) else {
            continue;
        };
        if let Some(from_level) = previous {
            if level > from_level + 1 {
                jumps.push(HeadingJump {
                    line: index + 1,
                    from_level,
                    to_level: level,
                });
            }
        }
        previous = Some(level);
    }
    jumps
}

fn blank_line_runs(markdown: &str) -> usize {
    let mut runs = 0;
    let mut blank_streak = 0;
    for line in markdown.lines() {
        if line.trim().is_empty() {
            blank_streak += 1;
            if blank_streak == 2 {
                runs += 1;
            }
        } else {
            blank_streak = 0;
        }
    }
    runs
}
