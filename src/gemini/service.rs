/// Plant service: one method per intent
///
/// Each method builds the request, submits it, and parses the reply. This is
/// the error boundary of the Gemini layer: failures are logged and turned
/// into an empty listing or `None`, never returned to the UI.

use serde::de::DeserializeOwned;
use std::sync::Arc;
use thiserror::Error;

use super::client::{GatewayError, Transport};
use super::parse::{parse, ParseError};
use super::request::{GenerateRequest, ImagePart, Intent, RequestError};
use crate::state::data::{default_plants, DiagnosisResult, PlantData, SearchResult};

/// Anything that can go wrong between user input and a typed result
#[derive(Debug, Error)]
pub enum PlantError {
    #[error(transparent)]
    Request(#[from] RequestError),
    #[error(transparent)]
    Gateway(#[from] GatewayError),
    #[error(transparent)]
    Parse(#[from] ParseError),
}

#[derive(Clone)]
pub struct PlantService {
    transport: Arc<dyn Transport>,
}

impl PlantService {
    pub fn new(transport: Arc<dyn Transport>) -> Self {
        Self { transport }
    }

    /// Search for plants matching `query`
    ///
    /// A blank query returns the default listing without calling the model.
    pub async fn search_plants(&self, query: &str) -> Vec<SearchResult> {
        if query.trim().is_empty() {
            return default_plants();
        }
        self.run(Intent::Search { query: query.to_string() })
            .await
            .unwrap_or_default()
    }

    /// Encyclopedia entry for one plant
    pub async fn plant_details(&self, plant_name: &str) -> Option<PlantData> {
        self.run(Intent::Detail { plant_name: plant_name.to_string() }).await
    }

    /// Diagnose a sick plant from a symptom description and/or a photo
    pub async fn diagnose(
        &self,
        description: &str,
        image: Option<ImagePart>,
    ) -> Option<DiagnosisResult> {
        self.run(Intent::Diagnose { description: description.to_string(), image }).await
    }

    /// Identify the plant in a photo
    ///
    /// The result card shows the upload's own preview, so `image_url` is
    /// left as the model returned it.
    pub async fn identify(&self, image: ImagePart) -> Option<SearchResult> {
        self.run(Intent::Identify { image }).await
    }

    async fn run<T: DeserializeOwned>(&self, intent: Intent) -> Option<T> {
        let label = intent.label();
        match self.try_run(intent).await {
            Ok(value) => {
                tracing::info!("✅ {} request succeeded", label);
                Some(value)
            }
            Err(e) => {
                tracing::error!("❌ {} request failed: {}", label, e);
                None
            }
        }
    }

    async fn try_run<T: DeserializeOwned>(&self, intent: Intent) -> Result<T, PlantError> {
        let request = GenerateRequest::build(intent)?;
        let raw = self.transport.submit(&request).await?;
        Ok(parse(&raw, &request.schema)?)
    }
}
