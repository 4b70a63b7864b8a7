// SPDX-FileCopyrightText: 2026 Civiq Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Gemini-backed triage adapter for the Civiq complaint service.
//!
//! Builds the fixed triage prompt from classification output, citizen
//! description, and location context, sends it to the `generateContent` API
//! with a JSON response schema, and validates the candidate text against the
//! three-field contract (`priority_level`, `department`, `justification`).

pub mod client;
pub mod types;

use async_trait::async_trait;
use tracing::debug;

use civiq_config::model::GeminiConfig;
use civiq_core::{
    AdapterType, CiviqError, HealthStatus, PluginAdapter, TriageAdapter, TriageInput,
    TriageReport,
};

use crate::client::GeminiClient;
use crate::types::{Content, GenerateContentRequest, GenerationConfig, Part};

/// Gemini structured-generation triage adapter.
pub struct GeminiTriage {
    client: GeminiClient,
}

impl GeminiTriage {
    /// Creates an adapter talking to the configured Gemini endpoint.
    pub fn new(config: &GeminiConfig) -> Result<Self, CiviqError> {
        Ok(Self {
            client: GeminiClient::new(config)?,
        })
    }

    #[cfg(test)]
    fn with_base_url(mut self, url: String) -> Self {
        self.client = self.client.with_base_url(url);
        self
    }
}

/// Render the fixed triage prompt, embedding the four inputs verbatim.
fn build_prompt(input: &TriageInput) -> String {
    format!(
        r#"You are an AI civic agent that classifies and prioritizes city maintenance issues.

Given:
- Image classification: {issue_type} (confidence {confidence})
- Citizen description: "{description}"
- Location context: {location}

Decide:
1. Priority level (1-10)
2. Handling department
3. Brief justification

Return a structured JSON.
"#,
        issue_type = input.issue_type,
        confidence = input.confidence,
        description = input.description,
        location = input.location,
    )
}

/// Validate the candidate JSON against the triage contract.
///
/// `priority_level` must be an integer (a numeric string is coerced);
/// `department` and `justification` must be strings. `department` may be
/// empty -- the pipeline then falls back to the deterministic department.
fn parse_report(text: &str) -> Result<TriageReport, CiviqError> {
    let value: serde_json::Value =
        serde_json::from_str(text).map_err(|e| CiviqError::TriageMalformed {
            message: format!("candidate text is not JSON: {e}"),
        })?;

    let priority = match value.get("priority_level") {
        Some(serde_json::Value::Number(n)) => {
            n.as_i64().ok_or_else(|| CiviqError::TriageMalformed {
                message: format!("priority_level `{n}` is not an integer"),
            })?
        }
        Some(serde_json::Value::String(s)) => {
            s.trim()
                .parse::<i64>()
                .map_err(|_| CiviqError::TriageMalformed {
                    message: format!("priority_level `{s}` is not coercible to an integer"),
                })?
        }
        Some(other) => {
            return Err(CiviqError::TriageMalformed {
                message: format!("priority_level has unexpected type: {other}"),
            });
        }
        None => {
            return Err(CiviqError::TriageMalformed {
                message: "response is missing priority_level".to_string(),
            });
        }
    };

    let department = value
        .get("department")
        .and_then(|v| v.as_str())
        .ok_or_else(|| CiviqError::TriageMalformed {
            message: "response is missing department".to_string(),
        })?;

    let justification = value
        .get("justification")
        .and_then(|v| v.as_str())
        .ok_or_else(|| CiviqError::TriageMalformed {
            message: "response is missing justification".to_string(),
        })?;

    Ok(TriageReport {
        priority,
        department: department.to_string(),
        justification: justification.to_string(),
    })
}

#[async_trait]
impl PluginAdapter for GeminiTriage {
    fn name(&self) -> &str {
        "gemini-triage"
    }

    fn version(&self) -> semver::Version {
        semver::Version::new(0, 1, 0)
    }

    fn adapter_type(&self) -> AdapterType {
        AdapterType::Triage
    }

    async fn health_check(&self) -> Result<HealthStatus, CiviqError> {
        Ok(HealthStatus::Healthy)
    }

    async fn shutdown(&self) -> Result<(), CiviqError> {
        Ok(())
    }
}

#[async_trait]
impl TriageAdapter for GeminiTriage {
    async fn triage(&self, input: &TriageInput) -> Result<TriageReport, CiviqError> {
        let request = GenerateContentRequest {
            contents: vec![Content {
                role: Some("user".to_string()),
                parts: vec![Part {
                    text: Some(build_prompt(input)),
                }],
            }],
            generation_config: GenerationConfig::triage(),
        };

        let response = self.client.generate(&request).await?;
        let text = response
            .first_text()
            .ok_or_else(|| CiviqError::TriageMalformed {
                message: "response contains no candidate text".to_string(),
            })?;

        let report = parse_report(text)?;
        debug!(
            priority = report.priority,
            department = %report.department,
            "triage complete"
        );
        Ok(report)
    }
}
