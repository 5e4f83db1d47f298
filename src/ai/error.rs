use thiserror::Error;

use super::ProviderKind;

/// Failures of the comment generation pipeline.
#[derive(Error, Debug)]
pub enum GenError {
    /// Raised before any network call; never retried.
    #[error("{0} API key not configured")]
    MissingApiKey(ProviderKind),

    #[error("API error for model '{model}' (status {status}): {message}")]
    Http {
        model: String,
        status: u16,
        message: String,
    },

    #[error("Request error: {0}")]
    Request(#[from] reqwest::Error),

    #[error("Response error: {0}")]
    Response(#[from] serde_json::Error),

    #[error("Missing content in response from model '{model}'")]
    MissingContent { model: String },

    /// Every candidate model for the selected provider failed. Carries the
    /// last per-candidate error for diagnostics.
    #[error("All {provider} models failed: {source}")]
    AllModelsFailed {
        provider: ProviderKind,
        #[source]
        source: Box<GenError>,
    },

    /// The model answered but sanitization left nothing publishable.
    #[error("Model produced no usable comment text")]
    EmptyComment,

    /// Caller-side ceiling elapsed; the in-flight call is abandoned.
    #[error("Comment generation timed out after {secs}s")]
    Timeout { secs: u64 },
}
