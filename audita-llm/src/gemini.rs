use crate::schema::Schema;
use audita_common::{AuditaError, Result};
use audita_http::{Auth, HttpClient, HttpError, RequestOpts};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value as JsonValue};
use std::borrow::Cow;
use std::time::Duration;

const GEMINI_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta/";
const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(120);

#[derive(Debug, Serialize)]
struct GenerateContentRequest {
    contents: Vec<GeminiContent>,
    tools: Vec<GeminiTool>,
    #[serde(rename = "generationConfig")]
    generation_config: GeminiGenerationConfig,
}

#[derive(Debug, Serialize)]
struct GeminiContent {
    parts: Vec<GeminiPart>,
}

#[derive(Debug, Serialize)]
struct GeminiPart {
    text: String,
}

#[derive(Debug, Serialize)]
struct GeminiTool {
    #[serde(rename = "googleSearch")]
    google_search: JsonValue,
}

#[derive(Debug, Serialize)]
struct GeminiGenerationConfig {
    #[serde(rename = "responseMimeType")]
    response_mime_type: &'static str,
    #[serde(rename = "responseSchema")]
    response_schema: JsonValue,
}

#[derive(Debug, Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<GeminiCandidate>,
    #[serde(rename = "usageMetadata")]
    usage_metadata: Option<GeminiUsageMetadata>,
}

#[derive(Debug, Deserialize)]
struct GeminiCandidate {
    content: Option<GeminiResponseContent>,
    #[serde(rename = "finishReason")]
    finish_reason: Option<String>,
    #[serde(rename = "groundingMetadata")]
    grounding_metadata: Option<GeminiGroundingMetadata>,
}

#[derive(Debug, Deserialize)]
struct GeminiResponseContent {
    #[serde(default)]
    parts: Vec<GeminiResponsePart>,
}

#[derive(Debug, Deserialize)]
struct GeminiResponsePart {
    #[serde(default)]
    text: String,
}

#[derive(Debug, Deserialize)]
struct GeminiGroundingMetadata {
    #[serde(rename = "groundingChunks", default)]
    grounding_chunks: Vec<GeminiGroundingChunk>,
}

#[derive(Debug, Deserialize)]
struct GeminiGroundingChunk {
    web: Option<GeminiWebSource>,
}

#[derive(Debug, Deserialize)]
struct GeminiWebSource {
    uri: String,
    title: Option<String>,
}

#[derive(Debug, Deserialize)]
struct GeminiUsageMetadata {
    #[serde(rename = "totalTokenCount")]
    total_token_count: Option<u32>,
}

/// A web citation the provider used to ground its answer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WebCitation {
    pub title: Option<String>,
    pub uri: String,
}

/// Outcome of one grounded generation call.
#[derive(Debug, Clone)]
pub struct GroundedResponse {
    /// The structured-output payload, still serialized as text.
    pub text: String,
    /// Citations attached by the provider; may be empty.
    pub citations: Vec<WebCitation>,
    pub tokens_used: Option<u32>,
}

/// Google Gemini API client, fixed to grounded structured-output calls.
///
/// Requires a valid API key and internet access.
pub struct GeminiClient {
    http: HttpClient,
    api_key: String,
    model: String,
    request_timeout: Duration,
}

impl GeminiClient {
    /// Create a new client using the provided API key and model.
    ///
    /// An empty key fails fast here rather than as an opaque provider error.
    pub fn new(api_key: String, model: String) -> Result<Self> {
        Self::with_base_url(api_key, model, GEMINI_BASE_URL)
    }

    /// Same as [`GeminiClient::new`] against an alternative endpoint.
    /// Integration tests point this at a local mock server.
    pub fn with_base_url(api_key: String, model: String, base_url: &str) -> Result<Self> {
        if api_key.trim().is_empty() {
            return Err(AuditaError::Config(
                "Gemini API key is not set".to_string(),
            ));
        }
        let http = HttpClient::new(base_url)
            .map_err(|e| AuditaError::Config(format!("invalid Gemini endpoint: {e}")))?;
        Ok(Self {
            http,
            api_key,
            model,
            request_timeout: DEFAULT_REQUEST_TIMEOUT,
        })
    }

    /// Override the transport-level deadline for the single provider call.
    pub fn with_request_timeout(mut self, dur: Duration) -> Self {
        self.request_timeout = dur;
        self
    }

    pub fn model_name(&self) -> &str {
        &self.model
    }

    /// Issue exactly one grounded `generateContent` call.
    ///
    /// The request carries the web-search tool flag and the declared output
    /// schema; no retries, no streaming. Transport and provider failures map
    /// to [`AuditaError::Provider`].
    pub async fn generate_grounded(
        &self,
        prompt: &str,
        response_schema: &Schema,
    ) -> Result<GroundedResponse> {
        let path = format!("models/{}:generateContent", self.model);
        let request = GenerateContentRequest {
            contents: vec![GeminiContent {
                parts: vec![GeminiPart {
                    text: prompt.to_string(),
                }],
            }],
            tools: vec![GeminiTool {
                google_search: json!({}),
            }],
            generation_config: GeminiGenerationConfig {
                response_mime_type: "application/json",
                response_schema: response_schema.to_gemini(),
            },
        };

        tracing::debug!(model = %self.model, "gemini.request.start");

        let opts = RequestOpts {
            timeout: Some(self.request_timeout),
            // One outbound call per analysis; failures surface, never retry.
            retries: Some(0),
            auth: Some(Auth::Query {
                name: "key",
                value: Cow::Borrowed(&self.api_key),
            }),
            ..Default::default()
        };

        let response: GenerateContentResponse = self
            .http
            .post_json(&path, &request, opts)
            .await
            .map_err(map_http_error)?;

        let candidate = response
            .candidates
            .into_iter()
            .next()
            .ok_or_else(|| AuditaError::Provider("no candidates returned".to_string()))?;

        if candidate.finish_reason.as_deref() == Some("SAFETY") {
            return Err(AuditaError::Provider(
                "content blocked by provider safety filters".to_string(),
            ));
        }

        let parts = candidate.content.map(|c| c.parts).unwrap_or_default();
        if parts.iter().all(|p| p.text.is_empty()) {
            return Err(AuditaError::Provider(
                "no content parts in response".to_string(),
            ));
        }
        let text: String = parts.into_iter().map(|p| p.text).collect();

        let citations = candidate
            .grounding_metadata
            .map(|g| g.grounding_chunks)
            .unwrap_or_default()
            .into_iter()
            .filter_map(|chunk| chunk.web)
            .map(|web| WebCitation {
                title: web.title,
                uri: web.uri,
            })
            .collect::<Vec<_>>();

        let tokens_used = response
            .usage_metadata
            .and_then(|u| u.total_token_count);

        tracing::debug!(
            citations = citations.len(),
            tokens = ?tokens_used,
            "gemini.request.done"
        );

        Ok(GroundedResponse {
            text,
            citations,
            tokens_used,
        })
    }
}

fn map_http_error(e: HttpError) -> AuditaError {
    match e {
        HttpError::Api { status, message, .. } => match status.as_u16() {
            429 => AuditaError::Provider("rate limit exceeded".to_string()),
            401 => AuditaError::Provider("invalid API key".to_string()),
            403 => AuditaError::Provider("API access forbidden".to_string()),
            _ => AuditaError::Provider(format!("Gemini API error ({status}): {message}")),
        },
        HttpError::Decode(err, _) => {
            AuditaError::Provider(format!("malformed provider envelope: {err}"))
        }
        HttpError::Network(err) => AuditaError::Provider(format!("request failed: {err}")),
        HttpError::Url(err) | HttpError::Build(err) => AuditaError::Config(err),
    }
}
