//! # Council Report
//!
//! The chairman model is prompted to answer in a constrained markdown
//! shape: a `# Classification: <LABEL>` header line, one short summary
//! paragraph, then 3–4 evidence bullets. This module splits that report
//! into its parts. Malformed reports degrade to empty fields; parsing
//! never fails.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

/// Structured view of the chairman's stage-3 verdict text.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CouncilReport {
    /// Header line with the `# Classification:` marker stripped,
    /// e.g. `"LEAN RIGHT"`. Empty if the report had no lines.
    pub classification: String,
    /// First non-bullet paragraph after the header.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub summary: String,
    /// Evidence bullets (`-`, `*` or `•`), markers stripped.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub evidence: Vec<String>,
}

static HEADER_MARKER_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)^\s*#*\s*classification\s*[:\-]\s*").expect("valid header regex"));

static BULLET_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\s*[-*•]\s+").expect("valid bullet regex"));

impl CouncilReport {
    /// Parse the raw verdict text. The first line is taken as the
    /// classification header whether or not it carries the marker.
    pub fn parse(verdict: &str) -> Self {
        let mut lines = verdict.lines();

        let classification = lines
            .next()
            .map(|first| HEADER_MARKER_RE.replace(first, "").trim().to_string())
            .unwrap_or_default();

        let mut summary = String::new();
        let mut evidence = Vec::new();

        for line in lines {
            let trimmed = line.trim();
            if trimmed.is_empty() {
                continue;
            }
            if BULLET_RE.is_match(trimmed) {
                evidence.push(BULLET_RE.replace(trimmed, "").trim().to_string());
            } else if summary.is_empty() {
                summary = trimmed.to_string();
            }
        }

        Self {
            classification,
            summary,
            evidence,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = "\
# Classification: LEAN RIGHT

The post frames fiscal policy through individual responsibility and \
deregulation, with rhetoric typical of right-of-center commentary.

- Repeated appeals to \"small government\"
- Dismissive framing of public spending
- Source account aligns with conservative outlets";

    #[test]
    fn splits_header_summary_and_evidence() {
        let r = CouncilReport::parse(SAMPLE);
        assert_eq!(r.classification, "LEAN RIGHT");
        assert!(r.summary.starts_with("The post frames fiscal policy"));
        assert_eq!(r.evidence.len(), 3);
        assert_eq!(r.evidence[0], "Repeated appeals to \"small government\"");
    }

    #[test]
    fn header_without_marker_is_kept_verbatim() {
        let r = CouncilReport::parse("FAR LEFT\nBecause of X.");
        assert_eq!(r.classification, "FAR LEFT");
        assert_eq!(r.summary, "Because of X.");
    }

    #[test]
    fn empty_input_degrades_to_empty_fields() {
        let r = CouncilReport::parse("");
        assert_eq!(r, CouncilReport::default());
    }

    #[test]
    fn star_and_dot_bullets_count_as_evidence() {
        let r = CouncilReport::parse("# Classification: CENTER\nSummary.\n* one\n• two");
        assert_eq!(r.evidence, vec!["one".to_string(), "two".to_string()]);
    }
}
