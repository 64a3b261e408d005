//! # Chart Renderer
//!
//! Capability interface over the third-party embedded-charts provider:
//! given a container and a chart spec, render asynchronously or fail with
//! a load error. How the provider's SDK gets loaded is an implementation
//! detail behind the trait, never replicated by callers.

use anyhow::{bail, Result};
use serde::{Deserialize, Serialize};
use std::sync::Mutex;

/// What to render and where it lives on the provider side.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartSpec {
    pub chart_id: String,
    pub base_url: String,
    #[serde(default = "default_height")]
    pub height: String,
    #[serde(default = "default_theme")]
    pub theme: String,
    #[serde(default = "default_background")]
    pub background: String,
    /// Provider-side filter document, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub filter: Option<serde_json::Value>,
}

fn default_height() -> String {
    "400px".to_string()
}
fn default_theme() -> String {
    "light".to_string()
}
fn default_background() -> String {
    "transparent".to_string()
}

impl ChartSpec {
    pub fn new(chart_id: impl Into<String>, base_url: impl Into<String>) -> Self {
        Self {
            chart_id: chart_id.into(),
            base_url: base_url.into(),
            height: default_height(),
            theme: default_theme(),
            background: default_background(),
            filter: None,
        }
    }

    pub fn with_filter(mut self, filter: serde_json::Value) -> Self {
        self.filter = Some(filter);
        self
    }
}

/// Chart rendering capability. Implementations own SDK loading and
/// provider wiring; callers only see render-or-fail.
#[async_trait::async_trait]
pub trait ChartRenderer: Send + Sync {
    /// Render `spec` into the container with the given id.
    async fn render(&self, container: &str, spec: &ChartSpec) -> Result<()>;

    /// Provider name for diagnostics.
    fn provider_name(&self) -> &'static str;
}

/// Fails every render; used when no chart provider is configured.
pub struct DisabledRenderer;

#[async_trait::async_trait]
impl ChartRenderer for DisabledRenderer {
    async fn render(&self, _container: &str, _spec: &ChartSpec) -> Result<()> {
        bail!("chart rendering disabled (no provider configured)")
    }

    fn provider_name(&self) -> &'static str {
        "disabled"
    }
}

/// Test double: records every render call instead of drawing.
#[derive(Default)]
pub struct RecordingRenderer {
    rendered: Mutex<Vec<(String, ChartSpec)>>,
}

impl RecordingRenderer {
    pub fn rendered(&self) -> Vec<(String, ChartSpec)> {
        self.rendered.lock().expect("renderer mutex poisoned").clone()
    }
}

#[async_trait::async_trait]
impl ChartRenderer for RecordingRenderer {
    async fn render(&self, container: &str, spec: &ChartSpec) -> Result<()> {
        self.rendered
            .lock()
            .expect("renderer mutex poisoned")
            .push((container.to_string(), spec.clone()));
        Ok(())
    }

    fn provider_name(&self) -> &'static str {
        "recording"
    }
}
