use async_trait::async_trait;
use reqwest::Client;
use serde::Serialize;
use serde_json::Value;

use crate::config::{PipelineConfig, TimeoutConfig};

use super::{CreationPipeline, Handoff, PipelineError};

#[derive(Serialize)]
struct CreateRequest<'a> {
    prompt: &'a str,
    #[serde(rename = "type")]
    category: &'a str,
}

/// [`CreationPipeline`] backed by the creation service's HTTP API.
pub struct HttpCreationPipeline {
    client: Client,
    config: PipelineConfig,
}

impl HttpCreationPipeline {
    pub fn new(config: PipelineConfig, timeouts: &TimeoutConfig) -> Self {
        let client = Client::builder()
            .connect_timeout(timeouts.connect())
            .build()
            .expect("Failed to build pipeline client");

        Self { client, config }
    }

    fn url(&self) -> String {
        format!(
            "{}{}",
            self.config.base_url.trim_end_matches('/'),
            self.config.create_path
        )
    }
}

#[async_trait]
impl CreationPipeline for HttpCreationPipeline {
    async fn create(&self, prompt: &str, category: &str) -> Result<Handoff, PipelineError> {
        let response = self
            .client
            .post(self.url())
            .json(&CreateRequest { prompt, category })
            .send()
            .await?;

        let status = response.status();
        let bytes = response.bytes().await?;
        let body: Option<Value> = serde_json::from_slice(&bytes).ok();

        if !status.is_success() {
            let message = body
                .as_ref()
                .and_then(reason_from_body)
                .unwrap_or_else(|| format!("Creation service returned status {}", status.as_u16()));
            return Err(PipelineError::Rejected {
                status: Some(status.as_u16()),
                message,
            });
        }

        let body = body.ok_or_else(|| PipelineError::Protocol("response is not JSON".to_string()))?;

        if body.get("success").and_then(Value::as_bool) == Some(false) {
            let message = reason_from_body(&body)
                .unwrap_or_else(|| "The creation service declined the prompt".to_string());
            return Err(PipelineError::Rejected {
                status: Some(status.as_u16()),
                message,
            });
        }

        Ok(Handoff {
            app_id: app_id_from_body(&body),
            prompt: prompt.to_string(),
            category: category.to_string(),
            response: body,
        })
    }
}

fn reason_from_body(body: &Value) -> Option<String> {
    ["message", "error", "reason"]
        .iter()
        .filter_map(|key| body.get(*key).and_then(Value::as_str))
        .map(str::trim)
        .find(|text| !text.is_empty())
        .map(String::from)
}

fn app_id_from_body(body: &Value) -> Option<String> {
    let candidate = body
        .get("app")
        .and_then(|app| app.get("id"))
        .or_else(|| body.get("app_id"))
        .or_else(|| body.get("id"))?;

    match candidate {
        Value::String(id) => Some(id.clone()),
        Value::Number(id) => Some(id.to_string()),
        _ => None,
    }
}
