//! Aggregation and rendering of check findings.
//!
//! A report is a pure function of its findings: the same findings in any
//! order render to the same bytes, so reports can be diffed between runs.

use std::collections::BTreeMap;
use std::fmt;
use std::fmt::Write as _;

use serde::Serialize;

use fplx_model::{Finding, FindingKind, Severity, TableKind};

pub const REPORT_SCHEMA: &str = "fplx-check.report";
pub const REPORT_SCHEMA_VERSION: u32 = 1;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Outcome {
    Pass,
    Fail,
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Pass => f.write_str("PASS"),
            Self::Fail => f.write_str("FAIL"),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SeverityCounts {
    pub errors: usize,
    pub warnings: usize,
    pub info: usize,
}

#[derive(Debug, Clone, Serialize)]
pub struct Report {
    pub schema: String,
    pub schema_version: u32,
    pub outcome: Outcome,
    pub totals: SeverityCounts,
    pub counts: BTreeMap<FindingKind, usize>,
    pub findings: Vec<Finding>,
}

/// Report order: table, then line (table-level findings last), then kind.
fn sort_key(finding: &Finding) -> (TableKind, bool, usize, FindingKind, &str, Option<usize>) {
    (
        finding.table,
        finding.line.is_none(),
        finding.line.unwrap_or(0),
        finding.kind,
        finding.message.as_str(),
        finding.related_line,
    )
}

impl Report {
    pub fn aggregate(findings: impl IntoIterator<Item = Finding>) -> Self {
        let mut findings: Vec<Finding> = findings.into_iter().collect();
        findings.sort_by(|a, b| sort_key(a).cmp(&sort_key(b)));

        let mut totals = SeverityCounts::default();
        let mut counts = BTreeMap::new();
        for finding in &findings {
            match finding.severity {
                Severity::Error => totals.errors += 1,
                Severity::Warning => totals.warnings += 1,
                Severity::Info => totals.info += 1,
            }
            *counts.entry(finding.kind).or_insert(0) += 1;
        }
        let outcome = if totals.errors > 0 {
            Outcome::Fail
        } else {
            Outcome::Pass
        };
        Self {
            schema: REPORT_SCHEMA.to_string(),
            schema_version: REPORT_SCHEMA_VERSION,
            outcome,
            totals,
            counts,
            findings,
        }
    }

    pub fn outcome(&self) -> Outcome {
        self.outcome
    }

    pub fn has_errors(&self) -> bool {
        self.outcome == Outcome::Fail
    }

    pub fn count(&self, kind: FindingKind) -> usize {
        self.counts.get(&kind).copied().unwrap_or(0)
    }

    pub fn findings_for(&self, table: TableKind) -> impl Iterator<Item = &Finding> {
        self.findings.iter().filter(move |f| f.table == table)
    }

    /// One line per finding followed by a summary line.
    pub fn render_text(&self) -> String {
        let mut out = String::new();
        for finding in &self.findings {
            let _ = write!(out, "{}", finding.table);
            if let Some(line) = finding.line {
                let _ = write!(out, ":{line}");
            }
            let _ = writeln!(
                out,
                ": {}[{}]: {}",
                finding.severity, finding.kind, finding.message
            );
        }
        let _ = writeln!(out, "{}", self.summary_line());
        out
    }

    /// `PASS`/`FAIL` with totals and per-kind counts.
    pub fn summary_line(&self) -> String {
        let mut line = format!(
            "{}: {} {}, {} {}, {} info",
            self.outcome,
            self.totals.errors,
            plural(self.totals.errors, "error", "errors"),
            self.totals.warnings,
            plural(self.totals.warnings, "warning", "warnings"),
            self.totals.info,
        );
        if !self.counts.is_empty() {
            let per_kind: Vec<String> = self
                .counts
                .iter()
                .map(|(kind, count)| format!("{kind}: {count}"))
                .collect();
            let _ = write!(line, " ({})", per_kind.join(", "));
        }
        line
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

fn plural<'a>(count: usize, one: &'a str, many: &'a str) -> &'a str {
    if count == 1 { one } else { many }
}
