//! The analysis orchestration: one grounded provider call, then a strict
//! parse-then-validate pipeline producing an immutable result or a
//! classified error. No retries, no partial results.

use std::time::Duration;

use audita_common::{AnalysisSettings, AuditaError, Result};
use audita_llm::gemini::GeminiClient;
use audita_llm::prompt::{self, NOT_FOUND_SENTINEL};
use audita_llm::schema::analysis_schema;
use serde_json::Value as JsonValue;

use crate::handle::normalize_handle;
use crate::sources::sources_from_citations;
use crate::types::AnalysisResult;

pub struct Analyzer {
    client: GeminiClient,
    settings: AnalysisSettings,
}

impl Analyzer {
    pub fn new(client: GeminiClient, settings: AnalysisSettings) -> Self {
        Self { client, settings }
    }

    /// Run a full audit for free-form user input.
    ///
    /// Suspends until the provider responds (bounded by the configured
    /// timeout) and performs exactly one outbound call. Every failure mode
    /// maps to a distinct [`AuditaError`] variant; an identity mismatch
    /// between requested and returned handle is logged, not fatal.
    pub async fn analyze(&self, raw_input: &str) -> Result<AnalysisResult> {
        let handle = normalize_handle(raw_input);
        if handle.is_empty() {
            return Err(AuditaError::InvalidInput(
                "profile handle is empty".to_string(),
            ));
        }

        tracing::info!(
            handle = %handle,
            model = %self.client.model_name(),
            prompt_version = prompt::PROMPT_VERSION,
            "analysis.start"
        );

        let schema = analysis_schema();
        let deadline = Duration::from_secs(self.settings.timeout_secs);
        let response = tokio::time::timeout(
            deadline,
            self.client
                .generate_grounded(&prompt::analysis_prompt(&handle), &schema),
        )
        .await
        .map_err(|_| AuditaError::Timeout(self.settings.timeout_secs))??;

        let payload = parse_payload(&response.text)?;

        // An explicit not-found sentinel wins over any other validation
        // outcome: the provider located nothing to audit.
        if payload
            .pointer("/basicInfo/businessName")
            .and_then(JsonValue::as_str)
            .map(str::trim)
            == Some(NOT_FOUND_SENTINEL)
        {
            return Err(AuditaError::ProfileNotFound(handle));
        }

        schema
            .validate(&payload)
            .map_err(AuditaError::SchemaViolation)?;

        let mut result: AnalysisResult = serde_json::from_value(payload)
            .map_err(|e| AuditaError::Parse(format!("payload did not deserialize: {e}")))?;

        let returned = normalize_handle(&result.basic_info.handle);
        if returned != handle {
            tracing::warn!(
                requested = %handle,
                returned = %returned,
                "analysis.identity_mismatch"
            );
        }

        result.sources =
            sources_from_citations(response.citations, self.settings.source_fallback, &handle);

        tracing::info!(
            handle = %handle,
            competitors = result.competitors.len(),
            sources = result.sources.len(),
            score = result.diagnosis.overall_score,
            "analysis.done"
        );

        Ok(result)
    }
}

/// Parse the structured-output text into JSON.
///
/// Structured output mode should hand back bare JSON; some model revisions
/// still wrap it in prose or fences, so fall back to the outermost brace
/// span before giving up.
fn parse_payload(raw: &str) -> Result<JsonValue> {
    let trimmed = raw.trim();
    if let Ok(value) = serde_json::from_str::<JsonValue>(trimmed) {
        return Ok(value);
    }

    let start = trimmed
        .find('{')
        .ok_or_else(|| AuditaError::Parse("response contains no JSON object".to_string()))?;
    let end = trimmed
        .rfind('}')
        .ok_or_else(|| AuditaError::Parse("response JSON object is incomplete".to_string()))?;
    serde_json::from_str(&trimmed[start..=end])
        .map_err(|e| AuditaError::Parse(format!("response is not valid JSON: {e}")))
}
