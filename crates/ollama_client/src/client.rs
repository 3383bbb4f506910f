use crate::types::{extract_message_content, parse_model_content, AiError, AiRecommendation};
use common::config::ModelConfig;
use common::Conditions;
use reqwest::Client;
use serde_json::json;
use std::time::Duration;
use tracing::{debug, instrument};
use uuid::Uuid;

const SYSTEM_INSTRUCTIONS: [&str; 4] = [
    "You are a professional bass fishing guide.",
    "Return ONLY valid JSON matching the provided keys: recommendations(array) and notes(array).",
    "No extra text, no markdown, no explanations outside JSON.",
    "2–4 options, short technique lines, no brand names, follow typical US-legal rigs.",
];

const TASK: &str = "Recommend the best baits/techniques for bass today.";

pub struct OllamaClient {
    client: Client,
    url: String,
    model: String,
    temperature: f64,
    num_ctx: u32,
}

impl OllamaClient {
    pub fn new(config: &ModelConfig) -> Result<Self, AiError> {
        let client = Client::builder()
            .timeout(Duration::from_millis(config.timeout_ms))
            .build()
            .map_err(|e| AiError::Http(format!("failed to build Ollama HTTP client: {e}")))?;

        Ok(Self {
            client,
            url: config.url.clone(),
            model: config.model.clone(),
            temperature: config.temperature,
            num_ctx: config.num_ctx,
        })
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    fn system_prompt() -> Result<String, AiError> {
        let schema = schemars::schema_for!(AiRecommendation);
        let schema_json = serde_json::to_string_pretty(&schema)?;
        Ok(format!(
            "{}\n\nJSON Schema:\n{}\n",
            SYSTEM_INSTRUCTIONS.join(" "),
            schema_json
        ))
    }

    /// Request body for `/api/chat`. Strict JSON output, no streaming.
    pub fn build_chat_body(&self, conditions: &Conditions) -> Result<serde_json::Value, AiError> {
        let schema_example = json!({
            "recommendations": [
                {
                    "lure": "3.5\" tube",
                    "color": "green pumpkin",
                    "weight": "3/16 oz",
                    "technique": "drag across rock",
                    "why": ["matches craws", "cold water friendly"]
                }
            ],
            "notes": ["Clear water → natural colors"]
        });

        let user_prompt = json!({
            "task": TASK,
            "schema_example": schema_example,
            "conditions": conditions,
        });

        Ok(json!({
            "model": self.model,
            "format": "json",
            "stream": false,
            "messages": [
                { "role": "system", "content": Self::system_prompt()? },
                { "role": "user", "content": serde_json::to_string(&user_prompt)? }
            ],
            "options": {
                "temperature": self.temperature,
                "num_ctx": self.num_ctx
            }
        }))
    }

    /// Ask the local model for picks. Returns the model JSON once it is known
    /// to carry a `recommendations` array. Failures are not retried.
    #[instrument(
        skip(self, conditions),
        fields(
            request_id = %Uuid::new_v4(),
            species = %conditions.species,
            season = %conditions.season
        )
    )]
    pub async fn recommend(&self, conditions: &Conditions) -> Result<serde_json::Value, AiError> {
        let payload = self.build_chat_body(conditions)?;

        let response = self
            .client
            .post(&self.url)
            .header("content-type", "application/json")
            .json(&payload)
            .send()
            .await
            .map_err(|e| AiError::Http(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(AiError::HttpStatus {
                status: status.as_u16(),
                body,
            });
        }

        let response_body: serde_json::Value = response
            .json()
            .await
            .map_err(|e| AiError::Http(e.to_string()))?;
        let content = extract_message_content(&response_body);

        let recommendation = parse_model_content(content)?;
        debug!(
            "Model returned {} recommendations",
            recommendation["recommendations"]
                .as_array()
                .map_or(0, Vec::len)
        );
        Ok(recommendation)
    }
}
