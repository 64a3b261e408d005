//! # Council API Client
//!
//! Typed async client for the external analysis service: URL scraping plus
//! the three-stage "LLM Council" pipeline (steered responses → anonymized
//! cross-rankings → chairman synthesis). Plain request/response pairs:
//! no retries, batching, or backpressure.
//!
//! Logging policy: never log raw URLs or post text, only a short hashed id.

use anyhow::{anyhow, Context, Result};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::config::ApiConfig;
use crate::session::Session;

// ------------------------------------------------------------
// Wire types
// ------------------------------------------------------------

/// One analysis conversation on the service side.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Conversation {
    pub id: String,
    /// ISO 8601 as sent by the service; kept as a string on the wire.
    #[serde(default)]
    pub created_at: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub messages: Vec<serde_json::Value>,
}

/// Stage 1: one steered council member's take.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StageResponse {
    pub model: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub persona: Option<String>,
    #[serde(default)]
    pub response: String,
}

/// Stage 2: one member's ranking of the anonymized stage-1 responses.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StageRanking {
    pub model: String,
    #[serde(default)]
    pub ranking: String,
    #[serde(default)]
    pub parsed_ranking: Vec<String>,
}

/// Stage 3: the chairman's synthesized verdict.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FinalVerdict {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,
    #[serde(default)]
    pub response: String,
}

/// Per-analysis metadata. `confidence` is the engine's own certainty; it
/// is optional on the wire and absent values are treated as 0 downstream.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AnalysisMetadata {
    #[serde(default)]
    pub bias_embedding: Vec<f32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub confidence: Option<f64>,
}

/// Full response of one analysis round.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AnalysisResponse {
    #[serde(default)]
    pub stage1: Vec<StageResponse>,
    #[serde(default)]
    pub stage2: Vec<StageRanking>,
    #[serde(default)]
    pub stage3: FinalVerdict,
    #[serde(default)]
    pub metadata: AnalysisMetadata,
}

/// `analysis` sub-document of a stored post.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PostAnalysis {
    #[serde(default)]
    pub classification: String,
    #[serde(default)]
    pub summary: String,
}

/// One analyzed post, as stored by the service.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PostRecord {
    #[serde(rename = "_id")]
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_id: Option<String>,
    #[serde(default)]
    pub url: String,
    #[serde(default)]
    pub platform: String,
    #[serde(default)]
    pub analysis: PostAnalysis,
    #[serde(default)]
    pub bias_embedding: Vec<f32>,
    /// Similarity score when returned from a vector search.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub score: Option<f64>,
}

/// `GET /api/users/{id}/posts` envelope.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserPosts {
    pub user_id: String,
    #[serde(default)]
    pub total_posts: usize,
    #[serde(default)]
    pub posts: Vec<PostRecord>,
}

// ------------------------------------------------------------
// Client trait + implementations
// ------------------------------------------------------------

#[async_trait::async_trait]
pub trait CouncilApi: Send + Sync {
    /// Start a new analysis conversation.
    async fn create_conversation(&self) -> Result<Conversation>;

    /// Scrape `url` and run the council on its content. Identity comes
    /// from the session, never from ambient state.
    async fn analyze_url(
        &self,
        conversation_id: &str,
        session: &Session,
        url: &str,
    ) -> Result<AnalysisResponse>;

    /// All analyzed posts of the session's user.
    async fn user_posts(&self, session: &Session) -> Result<UserPosts>;

    /// One stored post by id.
    async fn post(&self, post_id: &str) -> Result<PostRecord>;

    /// Posts with a similar bias-embedding (opposing-viewpoint lookup).
    async fn similar_posts(&self, embedding: &[f32], limit: usize) -> Result<Vec<PostRecord>>;
}

#[derive(Serialize)]
struct AnalyzeRequest<'a> {
    user_id: &'a str,
    url: &'a str,
}

#[derive(Serialize)]
struct SimilarRequest<'a> {
    embedding: &'a [f32],
    limit: usize,
}

/// `reqwest`-backed client.
pub struct HttpCouncilClient {
    http: reqwest::Client,
    base_url: String,
}

impl HttpCouncilClient {
    pub fn from_config(cfg: &ApiConfig) -> Result<Self> {
        let http = reqwest::Client::builder()
            .user_agent("political-bias-analyzer/0.1 (+github.com/lumlich/political-bias-analyzer)")
            .connect_timeout(std::time::Duration::from_secs(cfg.connect_timeout_secs))
            .timeout(std::time::Duration::from_secs(cfg.request_timeout_secs))
            .build()
            .context("build council http client")?;
        Ok(Self {
            http,
            base_url: cfg.base_url.clone(),
        })
    }
}

#[async_trait::async_trait]
impl CouncilApi for HttpCouncilClient {
    async fn create_conversation(&self) -> Result<Conversation> {
        let url = format!("{}/api/conversations", self.base_url);
        let resp = self
            .http
            .post(&url)
            .json(&serde_json::json!({}))
            .send()
            .await
            .context("POST /api/conversations")?;
        if !resp.status().is_success() {
            return Err(response_error(resp).await);
        }
        resp.json().await.context("decode conversation")
    }

    async fn analyze_url(
        &self,
        conversation_id: &str,
        session: &Session,
        url: &str,
    ) -> Result<AnalysisResponse> {
        info!(target: "council", url_id = %anon_id(url), %conversation_id, "analysis requested");

        let endpoint = format!(
            "{}/api/conversations/{conversation_id}/message",
            self.base_url
        );
        let resp = self
            .http
            .post(&endpoint)
            .json(&AnalyzeRequest {
                user_id: session.user_id(),
                url,
            })
            .send()
            .await
            .context("POST conversation message")?;
        if !resp.status().is_success() {
            return Err(response_error(resp).await);
        }
        let body: AnalysisResponse = resp.json().await.context("decode analysis response")?;
        info!(
            target: "council",
            url_id = %anon_id(url),
            stage1 = body.stage1.len(),
            stage2 = body.stage2.len(),
            "analysis complete"
        );
        Ok(body)
    }

    async fn user_posts(&self, session: &Session) -> Result<UserPosts> {
        let url = format!("{}/api/users/{}/posts", self.base_url, session.user_id());
        let resp = self.http.get(&url).send().await.context("GET user posts")?;
        if !resp.status().is_success() {
            return Err(response_error(resp).await);
        }
        resp.json().await.context("decode user posts")
    }

    async fn post(&self, post_id: &str) -> Result<PostRecord> {
        let url = format!("{}/api/posts/{post_id}", self.base_url);
        let resp = self.http.get(&url).send().await.context("GET post")?;
        if !resp.status().is_success() {
            return Err(response_error(resp).await);
        }
        resp.json().await.context("decode post")
    }

    async fn similar_posts(&self, embedding: &[f32], limit: usize) -> Result<Vec<PostRecord>> {
        let url = format!("{}/api/posts/similar", self.base_url);
        let resp = self
            .http
            .post(&url)
            .json(&SimilarRequest { embedding, limit })
            .send()
            .await
            .context("POST similar posts")?;
        if !resp.status().is_success() {
            return Err(response_error(resp).await);
        }
        resp.json().await.context("decode similar posts")
    }
}

/// Deterministic client for tests and local runs: returns a fixed
/// analysis response for every URL.
#[derive(Clone, Default)]
pub struct MockCouncilClient {
    pub fixed: AnalysisResponse,
}

#[async_trait::async_trait]
impl CouncilApi for MockCouncilClient {
    async fn create_conversation(&self) -> Result<Conversation> {
        Ok(Conversation {
            id: "mock-conversation".into(),
            created_at: String::new(),
            title: "Mock".into(),
            messages: Vec::new(),
        })
    }

    async fn analyze_url(
        &self,
        _conversation_id: &str,
        _session: &Session,
        _url: &str,
    ) -> Result<AnalysisResponse> {
        Ok(self.fixed.clone())
    }

    async fn user_posts(&self, session: &Session) -> Result<UserPosts> {
        Ok(UserPosts {
            user_id: session.user_id().to_string(),
            total_posts: 0,
            posts: Vec::new(),
        })
    }

    async fn post(&self, post_id: &str) -> Result<PostRecord> {
        Err(anyhow!("Post {post_id} not found"))
    }

    async fn similar_posts(&self, _embedding: &[f32], _limit: usize) -> Result<Vec<PostRecord>> {
        Ok(Vec::new())
    }
}

// ------------------------------------------------------------
// Helpers
// ------------------------------------------------------------

/// Error body shape used by the service on non-2xx responses.
#[derive(Deserialize)]
struct ErrorBody {
    detail: String,
}

/// Turn a non-2xx response into an error carrying the service's `detail`
/// message when one is present.
pub(crate) async fn response_error(resp: reqwest::Response) -> anyhow::Error {
    let status = resp.status();
    match resp.json::<ErrorBody>().await {
        Ok(body) => anyhow!("analysis service returned {status}: {}", body.detail),
        Err(_) => anyhow!("analysis service returned {status}"),
    }
}

/// Short anonymized id for log lines (first 6 bytes of SHA-256, hex).
pub(crate) fn anon_id(text: &str) -> String {
    use sha2::{Digest, Sha256};
    let mut hasher = Sha256::new();
    hasher.update(text.as_bytes());
    let digest = hasher.finalize();
    let mut out = String::with_capacity(12);
    for b in digest.iter().take(6) {
        use std::fmt::Write as _;
        let _ = write!(&mut out, "{:02x}", b);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn anon_id_is_stable_and_short() {
        let a = anon_id("https://example.com/post/1");
        let b = anon_id("https://example.com/post/1");
        assert_eq!(a, b);
        assert_eq!(a.len(), 12);
        assert_ne!(a, anon_id("https://example.com/post/2"));
    }

    #[test]
    fn analysis_response_tolerates_missing_fields() {
        let body: AnalysisResponse =
            serde_json::from_str(r##"{"stage3": {"response": "# Classification: CENTER"}}"##)
                .unwrap();
        assert!(body.stage1.is_empty());
        assert!(body.metadata.confidence.is_none());
        assert_eq!(body.stage3.response, "# Classification: CENTER");
    }

    #[test]
    fn post_record_maps_mongo_id() {
        let post: PostRecord = serde_json::from_str(
            r#"{"_id": "abc123", "url": "u", "platform": "instagram",
                "analysis": {"classification": "LEAN LEFT", "summary": "s"},
                "score": 0.91}"#,
        )
        .unwrap();
        assert_eq!(post.id, "abc123");
        assert_eq!(post.analysis.classification, "LEAN LEFT");
        assert_eq!(post.score, Some(0.91));
    }
}
