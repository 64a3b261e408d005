//! # Balance Statistics
//!
//! In-memory aggregates behind the dashboard's balance and recent-analyses
//! views: per-band distribution of analyzed content, left/center/right
//! shares, and a capped log of recent results. Nothing here is persisted;
//! state lives for the session and is discarded with it.

use std::sync::Mutex;
use std::time::{SystemTime, UNIX_EPOCH};

use serde::{Deserialize, Serialize};

use crate::analyze::AnalysisResult;
use crate::labels::ClassificationLabel;

/// The seven display bands of the balance bar, left → right. Lean Left
/// folds into Left and Lean Right into Right (same score buckets).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SpectrumBand {
    FarLeft,
    Left,
    CenterLeft,
    Center,
    CenterRight,
    Right,
    FarRight,
}

impl SpectrumBand {
    pub const ALL: [SpectrumBand; 7] = [
        Self::FarLeft,
        Self::Left,
        Self::CenterLeft,
        Self::Center,
        Self::CenterRight,
        Self::Right,
        Self::FarRight,
    ];

    pub fn of(label: ClassificationLabel) -> Self {
        match label {
            ClassificationLabel::FarLeft => Self::FarLeft,
            ClassificationLabel::Left | ClassificationLabel::LeanLeft => Self::Left,
            ClassificationLabel::CenterLeft => Self::CenterLeft,
            ClassificationLabel::Center => Self::Center,
            ClassificationLabel::CenterRight => Self::CenterRight,
            ClassificationLabel::Right | ClassificationLabel::LeanRight => Self::Right,
            ClassificationLabel::FarRight => Self::FarRight,
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            Self::FarLeft => "Far Left",
            Self::Left => "Left",
            Self::CenterLeft => "Center-Left",
            Self::Center => "Center",
            Self::CenterRight => "Center-Right",
            Self::Right => "Right",
            Self::FarRight => "Far Right",
        }
    }

    fn index(&self) -> usize {
        Self::ALL.iter().position(|b| b == self).unwrap_or(3)
    }
}

/// Per-band counts plus percentage shares over a set of analyzed labels.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Distribution {
    counts: [usize; 7],
    total: usize,
}

impl Distribution {
    pub fn from_labels<I>(labels: I) -> Self
    where
        I: IntoIterator<Item = ClassificationLabel>,
    {
        let mut d = Self::default();
        for label in labels {
            d.counts[SpectrumBand::of(label).index()] += 1;
            d.total += 1;
        }
        d
    }

    pub fn total(&self) -> usize {
        self.total
    }

    pub fn count(&self, band: SpectrumBand) -> usize {
        self.counts[band.index()]
    }

    /// Share of one band in percent (0.0 when the set is empty).
    pub fn share(&self, band: SpectrumBand) -> f32 {
        if self.total == 0 {
            return 0.0;
        }
        self.count(band) as f32 * 100.0 / self.total as f32
    }

    /// `(band, share)` pairs left → right, for rendering the balance bar.
    pub fn segments(&self) -> Vec<(SpectrumBand, f32)> {
        SpectrumBand::ALL
            .iter()
            .map(|b| (*b, self.share(*b)))
            .collect()
    }

    /// Combined share of the three left-of-center bands.
    pub fn left_share(&self) -> f32 {
        self.share(SpectrumBand::FarLeft)
            + self.share(SpectrumBand::Left)
            + self.share(SpectrumBand::CenterLeft)
    }

    pub fn center_share(&self) -> f32 {
        self.share(SpectrumBand::Center)
    }

    /// Combined share of the three right-of-center bands.
    pub fn right_share(&self) -> f32 {
        self.share(SpectrumBand::CenterRight)
            + self.share(SpectrumBand::Right)
            + self.share(SpectrumBand::FarRight)
    }
}

/// Mean spectrum score of a set (0.0 for the empty set).
pub fn average_score<I>(scores: I) -> f32
where
    I: IntoIterator<Item = i32>,
{
    let mut sum: i64 = 0;
    let mut n: usize = 0;
    for s in scores {
        sum += s as i64;
        n += 1;
    }
    if n > 0 {
        sum as f32 / n as f32
    } else {
        0.0
    }
}

/// One remembered analysis, stripped to what the recent-analyses view needs.
#[derive(Debug, Clone, Serialize)]
pub struct LogEntry {
    pub ts_unix: u64,
    pub score: i32,
    pub label: ClassificationLabel,
    pub confidence: f64,
}

/// Thread-safe capped log of recent analyses.
#[derive(Debug)]
pub struct AnalysisLog {
    inner: Mutex<Vec<LogEntry>>,
    cap: usize,
}

impl AnalysisLog {
    pub fn with_capacity(cap: usize) -> Self {
        Self {
            inner: Mutex::new(Vec::with_capacity(cap.min(10_000))),
            cap: cap.min(10_000),
        }
    }

    pub fn push(&self, result: &AnalysisResult) {
        let entry = LogEntry {
            ts_unix: now_unix(),
            score: result.score,
            label: result.label,
            confidence: result.confidence,
        };

        let mut v = self.inner.lock().expect("analysis log mutex poisoned");
        v.push(entry);
        if v.len() > self.cap {
            let excess = v.len() - self.cap;
            v.drain(0..excess);
        }
    }

    pub fn snapshot_last_n(&self, n: usize) -> Vec<LogEntry> {
        let v = self.inner.lock().expect("analysis log mutex poisoned");
        let len = v.len();
        let start = len.saturating_sub(n);
        v[start..].to_vec()
    }

    /// Distribution over everything currently in the log.
    pub fn distribution(&self) -> Distribution {
        let v = self.inner.lock().expect("analysis log mutex poisoned");
        Distribution::from_labels(v.iter().map(|e| e.label))
    }
}

fn now_unix() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_secs()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::confidence::ConfidenceTier;
    use crate::report::CouncilReport;

    fn result(label: ClassificationLabel, confidence: f64) -> AnalysisResult {
        AnalysisResult {
            score: label.score(),
            label,
            confidence,
            tier: ConfidenceTier::from_confidence(confidence),
            summary: String::new(),
            report: CouncilReport::default(),
            bias_embedding: Vec::new(),
        }
    }

    #[test]
    fn lean_variants_fold_into_their_side_band() {
        let d = Distribution::from_labels([
            ClassificationLabel::LeanLeft,
            ClassificationLabel::Left,
            ClassificationLabel::LeanRight,
        ]);
        assert_eq!(d.count(SpectrumBand::Left), 2);
        assert_eq!(d.count(SpectrumBand::Right), 1);
        assert_eq!(d.total(), 3);
    }

    #[test]
    fn shares_sum_to_hundred_for_nonempty_sets() {
        let d = Distribution::from_labels([
            ClassificationLabel::FarLeft,
            ClassificationLabel::Center,
            ClassificationLabel::Center,
            ClassificationLabel::Right,
        ]);
        let total: f32 = d.segments().iter().map(|(_, s)| s).sum();
        assert!((total - 100.0).abs() < 1e-3);
        assert!((d.left_share() - 25.0).abs() < 1e-3);
        assert!((d.center_share() - 50.0).abs() < 1e-3);
        assert!((d.right_share() - 25.0).abs() < 1e-3);
    }

    #[test]
    fn empty_set_has_zero_shares() {
        let d = Distribution::default();
        assert_eq!(d.total(), 0);
        assert_eq!(d.left_share(), 0.0);
        assert_eq!(d.share(SpectrumBand::Center), 0.0);
    }

    #[test]
    fn average_score_of_empty_is_zero() {
        assert_eq!(average_score([]), 0.0);
        assert_eq!(average_score([-80, 40]), -20.0);
    }

    #[test]
    fn log_caps_and_snapshots_latest() {
        let log = AnalysisLog::with_capacity(2);
        log.push(&result(ClassificationLabel::FarLeft, 0.9));
        log.push(&result(ClassificationLabel::Center, 0.5));
        log.push(&result(ClassificationLabel::Right, 0.8));

        let snap = log.snapshot_last_n(10);
        assert_eq!(snap.len(), 2);
        assert_eq!(snap[0].label, ClassificationLabel::Center);
        assert_eq!(snap[1].label, ClassificationLabel::Right);

        let d = log.distribution();
        assert_eq!(d.count(SpectrumBand::FarLeft), 0);
        assert_eq!(d.count(SpectrumBand::Right), 1);
    }
}
