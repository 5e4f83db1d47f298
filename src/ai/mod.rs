pub mod error;
pub mod http;
pub mod prompt;
pub mod sanitize;

use std::str::FromStr;

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

use error::GenError;
use http::{CHECK_MAX_TOKENS, Dispatcher, SamplingParams};
use prompt::{GenerationConfig, PostInput};

/// Supported text-generation backends. Selection is fixed per call; there is
/// no fallback across providers, only across each provider's model list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum ProviderKind {
    #[default]
    Groq,
    Gemini,
}

impl ProviderKind {
    /// Ordered fallback list: primary model first.
    pub fn candidate_models(&self) -> &'static [&'static str] {
        match self {
            Self::Groq => &[
                "llama-3.3-70b-versatile",
                "llama-3.1-70b-versatile",
                "mixtral-8x7b-32768",
            ],
            Self::Gemini => &["gemini-1.5-flash", "gemini-1.5-pro"],
        }
    }
}

impl std::fmt::Display for ProviderKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Groq => write!(f, "groq"),
            Self::Gemini => write!(f, "gemini"),
        }
    }
}

impl FromStr for ProviderKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "groq" => Ok(Self::Groq),
            "gemini" => Ok(Self::Gemini),
            other => Err(format!("Unsupported provider: {other}")),
        }
    }
}

/// Wrapper for API keys with guarded serde implementations.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct ApiKey(String);

impl ApiKey {
    pub fn new(key: impl Into<String>) -> Self {
        Self(key.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_inner(self) -> String {
        self.0
    }
}

impl std::fmt::Display for ApiKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl Serialize for ApiKey {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        self.0.serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for ApiKey {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        String::deserialize(deserializer).map(ApiKey::new)
    }
}

/// Provider selection plus the key for that provider. The key is checked
/// before any network call happens.
#[derive(Debug, Clone)]
pub struct Credentials {
    pub provider: ProviderKind,
    pub api_key: Option<ApiKey>,
}

impl Credentials {
    pub fn new(provider: ProviderKind, api_key: Option<ApiKey>) -> Self {
        Self { provider, api_key }
    }

    fn require_key(&self) -> Result<&ApiKey, GenError> {
        self.api_key
            .as_ref()
            .filter(|k| !k.as_str().is_empty())
            .ok_or(GenError::MissingApiKey(self.provider))
    }
}

/// Build a dispatcher for the selected provider, failing fast when its key
/// is not configured.
pub fn dispatcher_for(credentials: &Credentials) -> Result<Dispatcher, GenError> {
    let key = credentials.require_key()?;
    Ok(Dispatcher::new(credentials.provider, key.as_str()))
}

/// Generate one publishable comment for a post: build the prompt, walk the
/// provider's model-fallback list, sanitize the winner.
pub async fn generate(
    post: &PostInput,
    config: &GenerationConfig,
    credentials: &Credentials,
) -> Result<String, GenError> {
    generate_with_params(post, config, credentials, &SamplingParams::default()).await
}

pub async fn generate_with_params(
    post: &PostInput,
    config: &GenerationConfig,
    credentials: &Credentials,
    params: &SamplingParams,
) -> Result<String, GenError> {
    let dispatcher = dispatcher_for(credentials)?;
    let prompt = prompt::build_prompt(post, config);
    finish(&dispatcher, &prompt, params).await
}

/// Dispatch a prebuilt prompt and sanitize the result. Split out so callers
/// holding a dispatcher (tests, the key check) can reuse the tail of the
/// pipeline.
pub async fn finish(
    dispatcher: &Dispatcher,
    prompt: &str,
    params: &SamplingParams,
) -> Result<String, GenError> {
    let raw = dispatcher.dispatch(prompt, params).await?;
    let comment = sanitize::sanitize(&raw);
    if comment.is_empty() {
        return Err(GenError::EmptyComment);
    }
    Ok(comment)
}

const CHECK_PROMPT: &str =
    "Write one short sentence about how AI automation is changing business workflows.";

/// Constrained direct test call used to validate a configured key.
pub async fn check_key(dispatcher: &Dispatcher) -> Result<String, GenError> {
    finish(
        dispatcher,
        CHECK_PROMPT,
        &SamplingParams::with_max_tokens(CHECK_MAX_TOKENS),
    )
    .await
}
