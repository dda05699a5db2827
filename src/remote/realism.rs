use std::future::Future;

use base64::{Engine as _, engine::general_purpose::STANDARD as BASE64_STANDARD};
use serde::Deserialize;
use tracing::debug;

use crate::{
    assets::decode::decode_image,
    foundation::error::{SuperposeError, SuperposeResult},
    render::surface::Surface,
};

/// Fixed instruction sent with every composite.
pub const REALISM_PROMPT: &str = "Transform this rough composite image into a highly \
photorealistic scene. The input consists of a foreground object superimposed on a \
background. Your task is to: 1. Fix the lighting and shadows so the object interacts \
naturally with the environment. 2. Adjust color grading and white balance to match the \
object with the background. 3. Fix any jagged edges or artifacts from the cutout. \
4. Maintain the identity of the object and the background location, but make them look \
like a single coherent photograph.";

/// Default image-generation model.
pub const DEFAULT_MODEL: &str = "gemini-2.5-flash-image";

const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";

/// A validated remote render: the returned image bytes plus the decoded
/// surface (the only inspection applied is "does it decode").
#[derive(Clone, Debug)]
pub struct GeneratedRender {
    /// Encoded image bytes as returned by the service.
    pub png: Vec<u8>,
    /// Decoded pixels of the returned image.
    pub surface: Surface,
}

/// Opaque remote transform: composite PNG in, photorealistic image out.
///
/// The core never inspects or validates the returned pixels beyond
/// decodability; re-entrancy is the caller's concern (the session controller
/// forbids overlapping generations).
pub trait RemoteRenderer {
    /// Submit the composite and await the generated image.
    fn generate(
        &self,
        composite_png: &[u8],
    ) -> impl Future<Output = SuperposeResult<GeneratedRender>> + Send;
}

/// Gemini `generateContent` client carrying the composite as inline PNG data
/// alongside the fixed instruction prompt.
#[derive(Clone, Debug)]
pub struct GeminiClient {
    http: reqwest::Client,
    api_key: String,
    model: String,
    base_url: String,
}

impl GeminiClient {
    /// Client for the default model against the public endpoint.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            api_key: api_key.into(),
            model: DEFAULT_MODEL.to_string(),
            base_url: DEFAULT_BASE_URL.to_string(),
        }
    }

    /// Override the model id.
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    /// Override the endpoint base URL (used by tests to point at a stub).
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    fn request_body(composite_png: &[u8]) -> serde_json::Value {
        serde_json::json!({
            "contents": [{
                "parts": [
                    {
                        "inlineData": {
                            "mimeType": "image/png",
                            "data": BASE64_STANDARD.encode(composite_png),
                        }
                    },
                    { "text": REALISM_PROMPT },
                ]
            }]
        })
    }
}

impl RemoteRenderer for GeminiClient {
    async fn generate(&self, composite_png: &[u8]) -> SuperposeResult<GeneratedRender> {
        let url = format!("{}/models/{}:generateContent", self.base_url, self.model);
        debug!(model = %self.model, bytes = composite_png.len(), "submitting composite");

        let response = self
            .http
            .post(&url)
            .header("x-goog-api-key", &self.api_key)
            .json(&Self::request_body(composite_png))
            .send()
            .await
            .map_err(|e| SuperposeError::remote_generation(format!("request failed: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            return Err(SuperposeError::remote_generation(format!(
                "service returned {status}"
            )));
        }

        let parsed: GenerateContentResponse = response
            .json()
            .await
            .map_err(|e| SuperposeError::remote_generation(format!("malformed response: {e}")))?;

        let data = extract_inline_image(&parsed)
            .ok_or_else(|| SuperposeError::remote_generation("no image in response"))?;
        let png = BASE64_STANDARD
            .decode(data)
            .map_err(|e| SuperposeError::remote_generation(format!("invalid image data: {e}")))?;
        let surface = decode_image(&png).map_err(|e| {
            SuperposeError::remote_generation(format!("generated image is not decodable: {e}"))
        })?;

        Ok(GeneratedRender { png, surface })
    }
}

#[derive(Debug, Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<Content>,
}

#[derive(Debug, Deserialize)]
struct Content {
    #[serde(default)]
    parts: Vec<Part>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Part {
    inline_data: Option<InlineData>,
    #[allow(dead_code)]
    text: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct InlineData {
    #[allow(dead_code)]
    mime_type: Option<String>,
    data: String,
}

/// First inline-data part across all candidates, if any.
fn extract_inline_image(response: &GenerateContentResponse) -> Option<&str> {
    response
        .candidates
        .iter()
        .filter_map(|c| c.content.as_ref())
        .flat_map(|content| content.parts.iter())
        .find_map(|part| part.inline_data.as_ref())
        .map(|inline| inline.data.as_str())
}

#[cfg(test)]
#[path = "../../tests/unit/remote/realism.rs"]
mod tests;
