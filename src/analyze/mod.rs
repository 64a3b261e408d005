// src/analyze/mod.rs
//! Analysis pipeline entry: turns a raw council response into the
//! request-scoped [`AnalysisResult`] the rendering layer consumes.

pub mod summary;

use anyhow::Result;
use serde::Serialize;
use tracing::debug;

use crate::confidence::{percent, sanitize_confidence, ConfidenceTier};
use crate::council::{AnalysisResponse, CouncilApi};
use crate::labels::{parse_classification, ClassificationLabel};
use crate::report::CouncilReport;
use crate::session::Session;
use crate::spectrum::position;

// Re-export convenient helpers.
pub use summary::clean_summary;

/// Ephemeral result of one analysis round. Created per request, held in
/// transient state, discarded on the next request.
#[derive(Debug, Clone, Serialize)]
pub struct AnalysisResult {
    /// Spectrum score in [-100, 100]; negative = left.
    pub score: i32,
    pub label: ClassificationLabel,
    /// Engine confidence in [0, 1]; 0.0 when the service sent none.
    pub confidence: f64,
    pub tier: ConfidenceTier,
    /// Cleaned full verdict text for display.
    pub summary: String,
    pub report: CouncilReport,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub bias_embedding: Vec<f32>,
}

impl AnalysisResult {
    /// Display position in [0, 100] on the spectrum bar.
    pub fn position(&self) -> f32 {
        position(self.score)
    }

    /// Display percentage for the confidence badge.
    pub fn confidence_percent(&self) -> u8 {
        percent(self.confidence)
    }
}

/// Build an [`AnalysisResult`] from a raw council response.
///
/// The chairman's header line is the primary classification source; when
/// the header carries no recognizable label the full verdict text is
/// scanned as a fallback before defaulting to Center.
pub fn analyze_response(resp: &AnalysisResponse) -> AnalysisResult {
    let verdict = &resp.stage3.response;
    let report = CouncilReport::parse(verdict);

    let mut classification = parse_classification(&report.classification);
    if classification.label == ClassificationLabel::Center
        && !report.classification.to_uppercase().contains("CENTER")
    {
        classification = parse_classification(verdict);
    }

    let confidence = sanitize_confidence(resp.metadata.confidence);
    debug!(
        target: "analyze",
        label = classification.label.canonical(),
        score = classification.score,
        confidence,
        "classified council verdict"
    );

    AnalysisResult {
        score: classification.score,
        label: classification.label,
        confidence,
        tier: ConfidenceTier::from_confidence(confidence),
        summary: clean_summary(verdict),
        report,
        bias_embedding: resp.metadata.bias_embedding.clone(),
    }
}

/// Full round-trip against the analysis service: open a conversation,
/// submit the URL, classify the verdict.
pub async fn analyze_url(
    client: &dyn CouncilApi,
    session: &Session,
    url: &str,
) -> Result<AnalysisResult> {
    let conversation = client.create_conversation().await?;
    let response = client.analyze_url(&conversation.id, session, url).await?;
    Ok(analyze_response(&response))
}
