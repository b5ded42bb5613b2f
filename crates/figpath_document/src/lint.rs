//! Pre-import document linter
//!
//! Flags path data outside the restricted `M L C Z` dialect and a handful of
//! auto-layout settings that design tools reject or silently misinterpret.
//! Locations read like `root > FRAME[Card]/children[0] > VECTOR[icon]`.

use std::collections::BTreeSet;
use std::fmt;
use std::sync::LazyLock;

use figpath_core::parse_path;
use regex::Regex;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tracing::debug;

use crate::options::DocumentOptions;

/// Every command letter of the path mini-language
static COMMAND_LETTER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[MmLlHhVvCcSsQqTtAaZz]").expect("valid regex"));

/// Node names that usually want to stretch across their parent
static FULL_WIDTH_NAME: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)header|footer|divider|separator|button|input|field|menu|item")
        .expect("valid regex")
});

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub enum Severity {
    Error,
    Warning,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Error => write!(f, "error"),
            Severity::Warning => write!(f, "warning"),
        }
    }
}

/// One problem found in a document
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LintIssue {
    pub severity: Severity,
    pub location: String,
    pub issue: String,
    /// Suggested fix
    pub fix: String,
}

impl LintIssue {
    fn error(location: impl Into<String>, issue: impl Into<String>, fix: impl Into<String>) -> Self {
        Self {
            severity: Severity::Error,
            location: location.into(),
            issue: issue.into(),
            fix: fix.into(),
        }
    }

    fn warning(location: impl Into<String>, issue: impl Into<String>, fix: impl Into<String>) -> Self {
        Self {
            severity: Severity::Warning,
            ..Self::error(location, issue, fix)
        }
    }
}

impl fmt::Display for LintIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}: {}", self.severity, self.location)?;
        writeln!(f, "   issue: {}", self.issue)?;
        write!(f, "   fix: {}", self.fix)
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct LintReport {
    pub issues: Vec<LintIssue>,
}

impl LintReport {
    pub fn errors(&self) -> impl Iterator<Item = &LintIssue> {
        self.issues.iter().filter(|i| i.severity == Severity::Error)
    }

    pub fn warnings(&self) -> impl Iterator<Item = &LintIssue> {
        self.issues.iter().filter(|i| i.severity == Severity::Warning)
    }

    pub fn has_errors(&self) -> bool {
        self.errors().next().is_some()
    }

    /// A document is importable when it has no errors; warnings are advisory
    pub fn is_valid(&self) -> bool {
        !self.has_errors()
    }
}

/// Options for the `[lint]` table of `figpath.toml`
#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct LintOptions {
    #[serde(default = "default_counter_axis_align")]
    pub valid_counter_axis_align: Vec<String>,
}

fn default_counter_axis_align() -> Vec<String> {
    ["MIN", "CENTER", "MAX", "BASELINE"]
        .into_iter()
        .map(String::from)
        .collect()
}

impl Default for LintOptions {
    fn default() -> Self {
        Self {
            valid_counter_axis_align: default_counter_axis_align(),
        }
    }
}

#[derive(Clone, Debug, Default)]
pub struct Linter {
    options: LintOptions,
    document: DocumentOptions,
}

impl Linter {
    pub fn new(options: LintOptions, document: DocumentOptions) -> Self {
        Self { options, document }
    }

    pub fn lint(&self, root: &Value) -> LintReport {
        let mut report = LintReport::default();
        self.lint_node(root, "root", None, &mut report);
        debug!(issues = report.issues.len(), "document linted");
        report
    }

    fn lint_node(
        &self,
        node: &Value,
        parent_location: &str,
        parent_layout: Option<&str>,
        report: &mut LintReport,
    ) {
        let Value::Object(map) = node else {
            return;
        };

        let node_type = map.get("type").and_then(Value::as_str).unwrap_or("UNKNOWN");
        let name = map.get("name").and_then(Value::as_str).unwrap_or("unnamed");
        let location = format!("{} > {}[{}]", parent_location, node_type, name);

        self.lint_layout(map, node_type, name, &location, parent_layout, report);

        for field in &self.document.path_fields {
            let Some(Value::Array(records)) = map.get(field) else {
                continue;
            };
            for (index, record) in records.iter().enumerate() {
                if let Some(data) = record.get("data").and_then(Value::as_str) {
                    let path_location = format!("{}/{}[{}]", location, field, index);
                    lint_path_data(data, &path_location, report);
                }
            }
        }

        let layout = map.get("layoutMode").and_then(Value::as_str);
        let children_field = &self.document.children_field;
        if let Some(Value::Array(children)) = map.get(children_field) {
            for (index, child) in children.iter().enumerate() {
                let child_location = format!("{}/{}[{}]", location, children_field, index);
                self.lint_node(child, &child_location, layout, report);
            }
        }
    }

    fn lint_layout(
        &self,
        map: &Map<String, Value>,
        node_type: &str,
        name: &str,
        location: &str,
        parent_layout: Option<&str>,
        report: &mut LintReport,
    ) {
        if let Some(value) = map.get("counterAxisAlignItems") {
            let valid = value
                .as_str()
                .is_some_and(|v| self.options.valid_counter_axis_align.iter().any(|a| a == v));
            if !valid {
                report.issues.push(LintIssue::error(
                    location,
                    format!("Invalid counterAxisAlignItems: {}", value),
                    format!(
                        "Use one of: {}",
                        self.options.valid_counter_axis_align.join(", ")
                    ),
                ));
            }
        }

        if map.get("primaryAxisSizingMode").and_then(Value::as_str) != Some("FIXED") {
            return;
        }
        let has_layout_align = map.contains_key("layoutAlign");

        // The fixed axis follows the parent's auto-layout direction
        let dimension = if parent_layout == Some("HORIZONTAL") {
            "height"
        } else {
            "width"
        };
        if !map.contains_key(dimension) && !has_layout_align {
            report.issues.push(LintIssue::warning(
                location,
                format!(
                    "primaryAxisSizingMode: \"FIXED\" without explicit {} or layoutAlign",
                    dimension
                ),
                format!("Add \"{}\" or \"layoutAlign\": \"STRETCH\"", dimension),
            ));
        }

        let is_container = matches!(node_type, "FRAME" | "COMPONENT");
        if is_container && !has_layout_align && FULL_WIDTH_NAME.is_match(name) {
            report.issues.push(LintIssue::warning(
                location,
                format!("{} element may need layoutAlign", node_type),
                "Consider adding \"layoutAlign\": \"STRETCH\" if it should fill its parent",
            ));
        }
    }
}

/// Letters in order of first appearance, each once
fn distinct(letters: impl Iterator<Item = char>) -> String {
    let mut seen = BTreeSet::new();
    letters
        .filter(|c| seen.insert(*c))
        .map(String::from)
        .collect::<Vec<_>>()
        .join(", ")
}

fn lint_path_data(data: &str, location: &str, report: &mut LintReport) {
    let letters: Vec<char> = COMMAND_LETTER
        .find_iter(data)
        .filter_map(|m| m.as_str().chars().next())
        .collect();

    if letters.iter().any(|c| c.eq_ignore_ascii_case(&'a')) {
        report.issues.push(LintIssue::error(
            location,
            "Arc command (A) is not supported",
            "Convert arcs to cubic Bézier curves (C) with `figpath file`",
        ));
    }

    if letters.iter().any(char::is_ascii_lowercase) {
        report.issues.push(LintIssue::error(
            location,
            "Relative path commands (lowercase) are not supported",
            "Convert to absolute commands: m→M, l→L, c→C",
        ));
    }

    let unsupported = distinct(
        letters
            .iter()
            .copied()
            .filter(|c| matches!(c.to_ascii_uppercase(), 'H' | 'V' | 'S' | 'T' | 'Q')),
    );
    if !unsupported.is_empty() {
        report.issues.push(LintIssue::error(
            location,
            format!("Unsupported path commands: {}", unsupported),
            "Use only M, L, C and Z; rewrite H/V as L and S/Q/T as C",
        ));
    }

    if let Err(err) = parse_path(data) {
        report.issues.push(LintIssue::error(
            location,
            format!("Path data does not parse: {}", err),
            "Fix the path data before converting",
        ));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn lint(doc: Value) -> LintReport {
        Linter::default().lint(&doc)
    }

    #[test]
    fn test_clean_document() {
        let report = lint(json!({
            "type": "FRAME",
            "name": "Card",
            "counterAxisAlignItems": "CENTER",
            "children": [{
                "type": "VECTOR",
                "name": "icon",
                "vectorPaths": [{ "data": "M 0 0 L 1 1 C 1 2 3 4 5 6 Z" }]
            }]
        }));
        assert!(report.issues.is_empty());
        assert!(report.is_valid());
    }

    #[test]
    fn test_path_letters() {
        let report = lint(json!({
            "type": "VECTOR",
            "name": "icon",
            "fillGeometry": [{ "data": "M 0 0 h 5 V 5 a 2 2 0 0 1 4 4 S 1 1 2 2 Z" }]
        }));
        let issues: Vec<&str> = report.issues.iter().map(|i| i.issue.as_str()).collect();
        assert_eq!(
            issues,
            vec![
                "Arc command (A) is not supported",
                "Relative path commands (lowercase) are not supported",
                "Unsupported path commands: h, V, S",
            ]
        );
        assert!(report
            .issues
            .iter()
            .all(|i| i.location == "root > VECTOR[icon]/fillGeometry[0]"));
        assert!(report.has_errors());
    }

    #[test]
    fn test_exponent_is_not_a_command() {
        let report = lint(json!({ "vectorPaths": [{ "data": "M 1e2 0 L 2E-1 1" }] }));
        assert!(report.is_valid());
    }

    #[test]
    fn test_unparseable_path() {
        let report = lint(json!({ "vectorPaths": [{ "data": "M 0 0 L 1" }] }));
        assert_eq!(report.issues.len(), 1);
        assert!(report.issues[0].issue.starts_with("Path data does not parse"));
    }

    #[test]
    fn test_counter_axis_align() {
        let report = lint(json!({
            "type": "FRAME",
            "name": "Row",
            "children": [{ "type": "FRAME", "name": "Cell", "counterAxisAlignItems": "STRETCH" }]
        }));
        assert_eq!(report.errors().count(), 1);
        let issue = &report.issues[0];
        assert_eq!(issue.location, "root > FRAME[Row]/children[0] > FRAME[Cell]");
        assert_eq!(issue.issue, "Invalid counterAxisAlignItems: \"STRETCH\"");
        assert_eq!(issue.fix, "Use one of: MIN, CENTER, MAX, BASELINE");
    }

    #[test]
    fn test_fixed_sizing_warnings() {
        let report = lint(json!({
            "type": "FRAME",
            "name": "Page",
            "layoutMode": "VERTICAL",
            "children": [
                { "type": "FRAME", "name": "Header", "primaryAxisSizingMode": "FIXED" },
                { "type": "FRAME", "name": "Body", "primaryAxisSizingMode": "FIXED", "width": 300 },
                { "type": "FRAME", "name": "Footer", "primaryAxisSizingMode": "FIXED", "layoutAlign": "STRETCH" }
            ]
        }));
        assert!(report.is_valid());
        let warnings: Vec<&LintIssue> = report.warnings().collect();
        assert_eq!(warnings.len(), 2);
        assert!(warnings[0].issue.contains("without explicit width"));
        assert_eq!(warnings[1].issue, "FRAME element may need layoutAlign");
        assert!(warnings.iter().all(|w| w.location.ends_with("FRAME[Header]")));
    }

    #[test]
    fn test_horizontal_parent_checks_height() {
        let report = lint(json!({
            "type": "FRAME",
            "layoutMode": "HORIZONTAL",
            "children": [{ "type": "TEXT", "primaryAxisSizingMode": "FIXED", "width": 10 }]
        }));
        assert_eq!(report.warnings().count(), 1);
        assert!(report.issues[0].issue.contains("without explicit height"));
    }

    #[test]
    fn test_custom_counter_axis_values() {
        let options = LintOptions {
            valid_counter_axis_align: vec!["MIN".to_string()],
        };
        let report = Linter::new(options, DocumentOptions::default())
            .lint(&json!({ "counterAxisAlignItems": "CENTER" }));
        assert!(report.has_errors());
        assert_eq!(report.issues[0].location, "root > UNKNOWN[unnamed]");
    }

    #[test]
    fn test_issue_display() {
        let issue = LintIssue::warning("root > FRAME[a]", "something", "do this");
        assert_eq!(
            issue.to_string(),
            "warning: root > FRAME[a]\n   issue: something\n   fix: do this"
        );
    }
}
