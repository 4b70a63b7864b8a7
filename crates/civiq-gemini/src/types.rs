// SPDX-FileCopyrightText: 2026 Civiq Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Wire types for the Gemini `generateContent` API.
//!
//! Only the slice of the API this service uses is modeled: a single-turn
//! text prompt with a JSON response schema, and the candidate text that
//! comes back.

use serde::{Deserialize, Serialize};

/// Top-level `generateContent` request.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateContentRequest {
    pub contents: Vec<Content>,
    pub generation_config: GenerationConfig,
}

/// A single conversation turn.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Content {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
    #[serde(default)]
    pub parts: Vec<Part>,
}

/// A content part. Only text parts are used here.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Part {
    #[serde(default)]
    pub text: Option<String>,
}

/// Generation parameters forcing structured JSON output.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerationConfig {
    pub response_mime_type: String,
    pub response_schema: serde_json::Value,
}

impl GenerationConfig {
    /// The fixed triage response schema: exactly the three contracted fields.
    pub fn triage() -> Self {
        Self {
            response_mime_type: "application/json".to_string(),
            response_schema: serde_json::json!({
                "type": "OBJECT",
                "properties": {
                    "priority_level": {
                        "type": "INTEGER",
                        "description": "A priority level from 1 to 10, where 10 is the most urgent."
                    },
                    "department": {
                        "type": "STRING",
                        "description": "The city department responsible for handling the issue."
                    },
                    "justification": {
                        "type": "STRING",
                        "description": "A brief explanation for the decision."
                    }
                },
                "required": ["priority_level", "department", "justification"]
            }),
        }
    }
}

/// Top-level `generateContent` response.
#[derive(Debug, Clone, Deserialize)]
pub struct GenerateContentResponse {
    #[serde(default)]
    pub candidates: Vec<Candidate>,
}

/// One generated candidate.
#[derive(Debug, Clone, Deserialize)]
pub struct Candidate {
    pub content: Option<Content>,
}

impl GenerateContentResponse {
    /// The first candidate's first text part, if the response has one.
    pub fn first_text(&self) -> Option<&str> {
        self.candidates
            .first()
            .and_then(|c| c.content.as_ref())
            .and_then(|content| content.parts.first())
            .and_then(|part| part.text.as_deref())
    }
}

/// Error body returned by the API on failure.
#[derive(Debug, Clone, Deserialize)]
pub struct ApiErrorResponse {
    pub error: ApiError,
}

/// Error detail within an [`ApiErrorResponse`].
#[derive(Debug, Clone, Deserialize)]
pub struct ApiError {
    #[serde(default)]
    pub code: i64,
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub status: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn request_serializes_with_camel_case_config() {
        let request = GenerateContentRequest {
            contents: vec![Content {
                role: Some("user".into()),
                parts: vec![Part {
                    text: Some("hello".into()),
                }],
            }],
            generation_config: GenerationConfig::triage(),
        };
        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(json["contents"][0]["parts"][0]["text"], "hello");
        assert_eq!(
            json["generationConfig"]["responseMimeType"],
            "application/json"
        );
        let required = &json["generationConfig"]["responseSchema"]["required"];
        assert_eq!(required[0], "priority_level");
    }

    #[test]
    fn first_text_walks_candidate_structure() {
        let response: GenerateContentResponse = serde_json::from_value(serde_json::json!({
            "candidates": [{
                "content": {
                    "role": "model",
                    "parts": [{"text": "{\"priority_level\": 7}"}]
                }
            }]
        }))
        .unwrap();
        assert_eq!(response.first_text(), Some("{\"priority_level\": 7}"));
    }

    #[test]
    fn first_text_is_none_for_empty_candidates() {
        let response: GenerateContentResponse =
            serde_json::from_value(serde_json::json!({ "candidates": [] })).unwrap();
        assert!(response.first_text().is_none());
    }

    #[test]
    fn api_error_deserializes() {
        let err: ApiErrorResponse = serde_json::from_value(serde_json::json!({
            "error": {"code": 429, "message": "quota exhausted", "status": "RESOURCE_EXHAUSTED"}
        }))
        .unwrap();
        assert_eq!(err.error.code, 429);
        assert_eq!(err.error.status, "RESOURCE_EXHAUSTED");
    }
}
