use serde_json::Value;
use tracing::{debug, warn};

use super::ProviderKind;
use super::error::GenError;

pub const GROQ_HOST: &str = "https://api.groq.com";
pub const GEMINI_HOST: &str = "https://generativelanguage.googleapis.com";

/// Default output-token ceiling for comment generation.
pub const DEFAULT_MAX_TOKENS: u32 = 200;
/// Tighter ceiling used by the key check, which only needs one sentence.
pub const CHECK_MAX_TOKENS: u32 = 100;

const GROQ_SYSTEM_PROMPT: &str = "You are an expert LinkedIn commenter. Write natural, \
    engaging comments that sound human. Never use generic phrases like \"Great post\". \
    Be specific and add value.";

/// Fixed sampling settings shared by both providers.
#[derive(Debug, Clone, Copy)]
pub struct SamplingParams {
    pub temperature: f64,
    pub top_p: f64,
    pub max_tokens: u32,
}

impl SamplingParams {
    pub const fn with_max_tokens(max_tokens: u32) -> Self {
        Self {
            temperature: 0.8,
            top_p: 0.9,
            max_tokens,
        }
    }
}

impl Default for SamplingParams {
    fn default() -> Self {
        Self::with_max_tokens(DEFAULT_MAX_TOKENS)
    }
}

/// Issues generation requests against one provider, walking its candidate
/// model list in order until one yields non-empty text.
#[derive(Clone)]
pub struct Dispatcher {
    client: reqwest::Client,
    kind: ProviderKind,
    host: String,
    api_key: String,
}

impl Dispatcher {
    pub fn new(kind: ProviderKind, api_key: impl Into<String>) -> Self {
        let host = match kind {
            ProviderKind::Groq => GROQ_HOST,
            ProviderKind::Gemini => GEMINI_HOST,
        };
        Self::with_host(kind, host, api_key)
    }

    /// Point the dispatcher at a different host. Tests use this to talk to a
    /// local mock server.
    pub fn with_host(kind: ProviderKind, host: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            kind,
            host: host.into(),
            api_key: api_key.into(),
        }
    }

    /// Try each candidate model in order. One awaited attempt per model, no
    /// retries, no backoff; the last failure is carried when all are spent.
    pub async fn dispatch(&self, prompt: &str, params: &SamplingParams) -> Result<String, GenError> {
        let mut last_err: Option<GenError> = None;

        for model in self.kind.candidate_models().iter().copied() {
            debug!(provider = %self.kind, model, "trying candidate model");
            match self.try_model(model, prompt, params).await {
                Ok(text) => return Ok(text),
                Err(err) => {
                    warn!(provider = %self.kind, model, error = %err, "candidate model failed");
                    last_err = Some(err);
                }
            }
        }

        let source = last_err.unwrap_or(GenError::MissingContent {
            model: "no candidate models".to_string(),
        });
        Err(GenError::AllModelsFailed {
            provider: self.kind,
            source: Box::new(source),
        })
    }

    async fn try_model(
        &self,
        model: &str,
        prompt: &str,
        params: &SamplingParams,
    ) -> Result<String, GenError> {
        let (url, body) = match self.kind {
            ProviderKind::Groq => (
                format!("{}/openai/v1/chat/completions", self.host),
                serde_json::json!({
                    "model": model,
                    "messages": [
                        { "role": "system", "content": GROQ_SYSTEM_PROMPT },
                        { "role": "user", "content": prompt }
                    ],
                    "temperature": params.temperature,
                    "max_tokens": params.max_tokens,
                    "top_p": params.top_p
                }),
            ),
            ProviderKind::Gemini => (
                format!(
                    "{}/v1beta/models/{}:generateContent?key={}",
                    self.host, model, self.api_key
                ),
                serde_json::json!({
                    "contents": [{ "parts": [{ "text": prompt }] }],
                    "generationConfig": {
                        "temperature": params.temperature,
                        "maxOutputTokens": params.max_tokens,
                        "topP": params.top_p
                    }
                }),
            ),
        };

        let mut request = self.client.post(&url).json(&body);
        if self.kind == ProviderKind::Groq {
            request = request.bearer_auth(&self.api_key);
        }

        let response = request.send().await?;
        let status = response.status();
        let text = response.text().await?;

        if !status.is_success() {
            let message = serde_json::from_str::<Value>(&text)
                .ok()
                .and_then(|v| v["error"]["message"].as_str().map(str::to_string))
                .unwrap_or_else(|| format!("HTTP {}", status.as_u16()));
            return Err(GenError::Http {
                model: model.to_string(),
                status: status.as_u16(),
                message,
            });
        }

        let json = serde_json::from_str::<Value>(&text)?;
        let content = match self.kind {
            ProviderKind::Groq => json["choices"][0]["message"]["content"].clone(),
            ProviderKind::Gemini => json["candidates"][0]["content"]["parts"][0]["text"].clone(),
        };

        let content = content
            .as_str()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .ok_or_else(|| GenError::MissingContent {
                model: model.to_string(),
            })?;

        Ok(content.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockito::{Matcher, Server};
    use tokio::runtime::Builder;

    #[test]
    fn groq_falls_back_until_a_model_answers() {
        let mut server = Server::new();
        let failing_1 = server
            .mock("POST", "/openai/v1/chat/completions")
            .match_body(Matcher::PartialJson(serde_json::json!({
                "model": "llama-3.3-70b-versatile"
            })))
            .with_status(500)
            .with_body(r#"{"error": {"message": "over capacity"}}"#)
            .create();
        let failing_2 = server
            .mock("POST", "/openai/v1/chat/completions")
            .match_body(Matcher::PartialJson(serde_json::json!({
                "model": "llama-3.1-70b-versatile"
            })))
            .with_status(500)
            .create();
        let answering = server
            .mock("POST", "/openai/v1/chat/completions")
            .match_body(Matcher::PartialJson(serde_json::json!({
                "model": "mixtral-8x7b-32768"
            })))
            .with_status(200)
            .with_body(r#"{"choices": [{"message": {"content": "A grounded take."}}]}"#)
            .create();

        let dispatcher = Dispatcher::with_host(ProviderKind::Groq, server.url(), "key");

        Builder::new_multi_thread()
            .enable_all()
            .build()
            .unwrap()
            .block_on(async {
                let text = dispatcher
                    .dispatch("prompt", &SamplingParams::default())
                    .await
                    .unwrap();
                assert_eq!(text, "A grounded take.");
            });

        failing_1.assert();
        failing_2.assert();
        answering.assert();
    }

    #[test]
    fn gemini_empty_candidates_exhaust_all_models() {
        let mut server = Server::new();
        let mock = server
            .mock("POST", Matcher::Regex(r"^/v1beta/models/.+:generateContent$".to_string()))
            .match_query(Matcher::Any)
            .with_status(200)
            .with_body(r#"{"candidates": [{"content": {"parts": [{"text": "   "}]}}]}"#)
            .expect(2)
            .create();

        let dispatcher = Dispatcher::with_host(ProviderKind::Gemini, server.url(), "key");

        Builder::new_multi_thread()
            .enable_all()
            .build()
            .unwrap()
            .block_on(async {
                let err = dispatcher
                    .dispatch("prompt", &SamplingParams::default())
                    .await
                    .unwrap_err();
                match err {
                    GenError::AllModelsFailed { provider, source } => {
                        assert_eq!(provider, ProviderKind::Gemini);
                        assert!(matches!(*source, GenError::MissingContent { .. }));
                    }
                    other => panic!("unexpected error: {other:?}"),
                }
            });

        mock.assert();
    }

    #[test]
    fn groq_http_failure_reports_provider_message() {
        let mut server = Server::new();
        let mock = server
            .mock("POST", "/openai/v1/chat/completions")
            .with_status(401)
            .with_body(r#"{"error": {"message": "Invalid API Key"}}"#)
            .expect(3)
            .create();

        let dispatcher = Dispatcher::with_host(ProviderKind::Groq, server.url(), "bad-key");

        Builder::new_multi_thread()
            .enable_all()
            .build()
            .unwrap()
            .block_on(async {
                let err = dispatcher
                    .dispatch("prompt", &SamplingParams::default())
                    .await
                    .unwrap_err();
                let GenError::AllModelsFailed { source, .. } = err else {
                    panic!("expected exhaustion");
                };
                match *source {
                    GenError::Http { status, message, .. } => {
                        assert_eq!(status, 401);
                        assert_eq!(message, "Invalid API Key");
                    }
                    other => panic!("unexpected error: {other:?}"),
                }
            });

        mock.assert();
    }
}
