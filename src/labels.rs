//! # Label Parser
//!
//! Maps the free-text classification produced by the council chairman
//! (e.g. `"# Classification: LEAN RIGHT due to rhetoric..."`) to a
//! canonical spectrum label and its fixed integer score.
//!
//! - Strips known marker prefixes, uppercases, normalizes punctuation.
//! - Matches against ONE priority-ordered keyword table: multi-word
//!   phrases before single-word fallbacks, first match wins, so the same
//!   normalized string always yields the same label.
//! - No match falls back to `{0, Center}`: a displayable neutral result,
//!   never an error.
//!
//! Scores are always drawn from the fixed table, never interpolated.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

/// Canonical spectrum labels, left → right.
///
/// `Left` and `LeanLeft` share the -40 bucket (and `Right`/`LeanRight`
/// the +40 bucket); they stay separate variants so the exact matched key
/// survives round-trips.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ClassificationLabel {
    #[serde(rename = "FAR LEFT")]
    FarLeft,
    #[serde(rename = "LEFT")]
    Left,
    #[serde(rename = "LEAN LEFT")]
    LeanLeft,
    #[serde(rename = "CENTER-LEFT")]
    CenterLeft,
    #[serde(rename = "CENTER")]
    Center,
    #[serde(rename = "CENTER-RIGHT")]
    CenterRight,
    #[serde(rename = "LEAN RIGHT")]
    LeanRight,
    #[serde(rename = "RIGHT")]
    Right,
    #[serde(rename = "FAR RIGHT")]
    FarRight,
}

impl ClassificationLabel {
    /// Fixed table score in [-100, 100].
    pub fn score(&self) -> i32 {
        match self {
            Self::FarLeft => -80,
            Self::Left | Self::LeanLeft => -40,
            Self::CenterLeft => -20,
            Self::Center => 0,
            Self::CenterRight => 20,
            Self::LeanRight | Self::Right => 40,
            Self::FarRight => 80,
        }
    }

    /// Exact uppercase table key (hyphens preserved), e.g. `"CENTER-LEFT"`.
    pub fn canonical(&self) -> &'static str {
        match self {
            Self::FarLeft => "FAR LEFT",
            Self::Left => "LEFT",
            Self::LeanLeft => "LEAN LEFT",
            Self::CenterLeft => "CENTER-LEFT",
            Self::Center => "CENTER",
            Self::CenterRight => "CENTER-RIGHT",
            Self::LeanRight => "LEAN RIGHT",
            Self::Right => "RIGHT",
            Self::FarRight => "FAR RIGHT",
        }
    }

    /// Human-readable form: title case, hyphens as spaces, e.g. `"Center Left"`.
    pub fn display_name(&self) -> &'static str {
        match self {
            Self::FarLeft => "Far Left",
            Self::Left => "Left",
            Self::LeanLeft => "Lean Left",
            Self::CenterLeft => "Center Left",
            Self::Center => "Center",
            Self::CenterRight => "Center Right",
            Self::LeanRight => "Lean Right",
            Self::Right => "Right",
            Self::FarRight => "Far Right",
        }
    }
}

impl std::fmt::Display for ClassificationLabel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.display_name())
    }
}

/// `{score, label}` pair produced by [`parse_classification`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Classification {
    pub score: i32,
    pub label: ClassificationLabel,
}

impl Classification {
    fn of(label: ClassificationLabel) -> Self {
        Self {
            score: label.score(),
            label,
        }
    }
}

/// Keyword table in match priority order. Multi-word phrases MUST come
/// before their single-word substrings ("LEAN LEFT" before "LEFT",
/// "CENTER RIGHT" before both "CENTER" and "RIGHT").
const KEYWORD_TABLE: &[(&str, ClassificationLabel)] = &[
    ("FAR LEFT", ClassificationLabel::FarLeft),
    ("FAR RIGHT", ClassificationLabel::FarRight),
    ("LEAN LEFT", ClassificationLabel::LeanLeft),
    ("LEAN RIGHT", ClassificationLabel::LeanRight),
    ("CENTER LEFT", ClassificationLabel::CenterLeft),
    ("CENTER RIGHT", ClassificationLabel::CenterRight),
    ("LEFT", ClassificationLabel::Left),
    ("RIGHT", ClassificationLabel::Right),
    ("CENTER", ClassificationLabel::Center),
];

/// Heading/marker prefixes the chairman tends to emit, e.g.
/// `# Classification:` or `Classification -`.
static MARKER_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)#*\s*classification\s*[:\-]").expect("valid marker regex"));

/// Parse an arbitrary classification string into `{score, label}`.
///
/// Unrecognized or empty input yields `{0, Center}`.
pub fn parse_classification(raw: &str) -> Classification {
    let text = normalize(raw);

    for (key, label) in KEYWORD_TABLE {
        if text.contains(key) {
            return Classification::of(*label);
        }
    }

    Classification::of(ClassificationLabel::Center)
}

/// Normalize input: strip markers, uppercase, replace separators with
/// spaces, collapse whitespace.
fn normalize(s: &str) -> String {
    let mut out = MARKER_RE.replace_all(s, " ").to_uppercase();

    // Replace common separators with spaces so "CENTER-LEFT", "center_left"
    // and "Center Left" all hit the same key.
    for ch in ['—', '–', '-', '_', '/', '\\'] {
        out = out.replace(ch, " ");
    }

    out = out.replace(['\n', '\r', '\t', '.', ',', ';'], " ");

    // Collapse multiple spaces.
    out.split_whitespace().collect::<Vec<_>>().join(" ")
}
