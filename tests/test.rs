use anyhow::Result;
use mockito::{Matcher, Server};
use tokio::runtime::Builder;

use commentron::ai::error::GenError;
use commentron::ai::http::{Dispatcher, SamplingParams};
use commentron::ai::prompt::{GenerationConfig, PostInput, build_prompt};
use commentron::ai::{self, ProviderKind};

fn block_on<F: std::future::Future>(future: F) -> F::Output {
    Builder::new_multi_thread()
        .enable_all()
        .build()
        .unwrap()
        .block_on(future)
}

#[test]
fn groq_pipeline_sanitizes_model_output() -> Result<()> {
    let mut server = Server::new();
    let mock = server
        .mock("POST", "/openai/v1/chat/completions")
        .match_body(Matcher::PartialJson(serde_json::json!({
            "model": "llama-3.3-70b-versatile",
            "temperature": 0.8,
            "top_p": 0.9,
            "max_tokens": 200
        })))
        .with_status(200)
        .with_body(
            r#"{"choices": [{"message": {"content": "\"Comment: Great post! The rollout pacing detail is what most teams miss\""}}]}"#,
        )
        .create();

    let dispatcher = Dispatcher::with_host(ProviderKind::Groq, server.url(), "key");
    let post = PostInput::new("We rolled out automation in stages.", Some("Dana".into()));
    let prompt = build_prompt(&post, &GenerationConfig::default());

    let comment = block_on(ai::finish(&dispatcher, &prompt, &SamplingParams::default()))?;
    assert_eq!(
        comment,
        "The rollout pacing detail is what most teams miss."
    );

    mock.assert();
    Ok(())
}

#[test]
fn hashtag_only_output_is_an_empty_result_failure() {
    let mut server = Server::new();
    let mock = server
        .mock("POST", "/openai/v1/chat/completions")
        .with_status(200)
        .with_body(r##"{"choices": [{"message": {"content": "#ai #growth"}}]}"##)
        .create();

    let dispatcher = Dispatcher::with_host(ProviderKind::Groq, server.url(), "key");

    let err = block_on(ai::finish(&dispatcher, "prompt", &SamplingParams::default())).unwrap_err();
    assert!(matches!(err, GenError::EmptyComment));
    mock.assert();
}

#[test]
fn gemini_recovers_on_the_second_candidate() -> Result<()> {
    let mut server = Server::new();
    let flash = server
        .mock(
            "POST",
            Matcher::Regex(r"^/v1beta/models/gemini-1\.5-flash:generateContent$".to_string()),
        )
        .match_query(Matcher::Any)
        .with_status(500)
        .create();
    let pro = server
        .mock(
            "POST",
            Matcher::Regex(r"^/v1beta/models/gemini-1\.5-pro:generateContent$".to_string()),
        )
        .match_query(Matcher::Any)
        .with_status(200)
        .with_body(
            r#"{"candidates": [{"content": {"parts": [{"text": "the staged rollout angle holds up"}]}}]}"#,
        )
        .create();

    let dispatcher = Dispatcher::with_host(ProviderKind::Gemini, server.url(), "key");

    let comment = block_on(ai::finish(&dispatcher, "prompt", &SamplingParams::default()))?;
    assert_eq!(comment, "The staged rollout angle holds up.");

    flash.assert();
    pro.assert();
    Ok(())
}

#[test]
fn key_check_uses_the_constrained_token_ceiling() -> Result<()> {
    let mut server = Server::new();
    let mock = server
        .mock("POST", "/openai/v1/chat/completions")
        .match_body(Matcher::PartialJson(serde_json::json!({
            "max_tokens": 100
        })))
        .with_status(200)
        .with_body(
            r#"{"choices": [{"message": {"content": "Automation keeps absorbing routine workflow steps"}}]}"#,
        )
        .create();

    let dispatcher = Dispatcher::with_host(ProviderKind::Groq, server.url(), "key");

    let sentence = block_on(ai::check_key(&dispatcher))?;
    assert_eq!(sentence, "Automation keeps absorbing routine workflow steps.");

    mock.assert();
    Ok(())
}
