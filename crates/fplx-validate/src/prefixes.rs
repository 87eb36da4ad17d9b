//! Gene prefix pattern checks.

use std::collections::HashMap;

use fplx_model::{Finding, FindingKind, PrefixPatternEntry, TableKind};

pub fn validate_prefixes(entries: &[PrefixPatternEntry], placeholder: &str) -> Vec<Finding> {
    let mut findings = Vec::new();
    let mut first_by_pattern: HashMap<&str, usize> = HashMap::new();

    for entry in entries {
        if let Err(error) = entry.parsed_category() {
            findings.push(
                Finding::new(
                    TableKind::GenePrefixes,
                    FindingKind::UnknownCategory,
                    format!("{error} for pattern '{}'", entry.pattern),
                )
                .at_line(entry.line),
            );
        }

        let occurrences = entry.pattern.matches(placeholder).count();
        if occurrences != 1 {
            let reason = if occurrences == 0 {
                format!("does not contain the placeholder {placeholder}")
            } else {
                format!("contains the placeholder {placeholder} {occurrences} times")
            };
            findings.push(
                Finding::new(
                    TableKind::GenePrefixes,
                    FindingKind::MalformedPattern,
                    format!("pattern '{}' {reason}", entry.pattern),
                )
                .at_line(entry.line),
            );
        }

        // Later rows may refine notes, so repeats are only warnings.
        if let Some(first) = first_by_pattern.get(entry.pattern.as_str()) {
            findings.push(
                Finding::new(
                    TableKind::GenePrefixes,
                    FindingKind::DuplicatePattern,
                    format!("pattern '{}' already listed on line {first}", entry.pattern),
                )
                .at_line(entry.line)
                .related_to(*first),
            );
        } else {
            first_by_pattern.insert(entry.pattern.as_str(), entry.line);
        }
    }
    findings
}
