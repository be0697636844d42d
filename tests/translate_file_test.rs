mod common;

use common::{job_config, spawn_chatty_stub, spawn_decoder_stub, spawn_silent_stub};
use dataset_translator::core::ContentProcessor;
use dataset_translator::domain::ports::Translator;
use dataset_translator::utils::monitor::ProcessMonitor;
use dataset_translator::utils::validation::Validate;
use dataset_translator::{
    translate_file, CaseNormalization, MarianClient, PassthroughProcessor, Result, TranslateError,
};
use tempfile::TempDir;

#[tokio::test]
async fn test_client_round_trip_keeps_sentence_order() {
    let port = spawn_decoder_stub().await;
    let client = MarianClient::new("127.0.0.1", port).unwrap();

    let reply = client.translate("first\nsecond").await.unwrap();
    assert_eq!(reply, "[de] first\n[de] second");
}

#[tokio::test]
async fn test_client_reports_missing_reply() {
    let port = spawn_silent_stub().await;
    let client = MarianClient::new("127.0.0.1", port).unwrap();

    let err = client.translate("hello").await.unwrap_err();
    assert!(
        matches!(
            err,
            TranslateError::ProtocolError { .. } | TranslateError::WebSocketError(_)
        ),
        "unexpected error: {err}"
    );
}

#[tokio::test]
async fn test_client_skips_non_text_frames() {
    let port = spawn_chatty_stub().await;
    let client = MarianClient::new("127.0.0.1", port).unwrap();

    let reply = client.translate("hello").await.unwrap();
    assert_eq!(reply, "[de] hello");
}

#[tokio::test]
async fn test_translate_file_writes_line_per_input() {
    let dir = TempDir::new().unwrap();
    let port = spawn_decoder_stub().await;
    let mut config = job_config(dir.path(), "Hello World\n\nGOOD MORNING\nbye", port);
    config.case = CaseNormalization::All;
    config.validate().unwrap();

    let client = MarianClient::new("127.0.0.1", port).unwrap();
    let summary = translate_file(
        client,
        PassthroughProcessor::new("en", "de"),
        &config,
        ProcessMonitor::default(),
    )
    .await
    .unwrap();

    let output = std::fs::read_to_string(&config.output_path).unwrap();
    assert_eq!(
        output,
        "[de] hello world\n\n[de] good morning\n[de] bye\n"
    );
    assert_eq!(summary.lines_translated, 4);
    assert_eq!(summary.blank_lines, 1);
    // 16-byte blocks: "Hello World\n\nGOOD MORNING\n" then "bye"
    assert_eq!(summary.batches, 2);
}

/// Segments on "; " so one line turns into several decoder sentences.
struct ClauseProcessor;

impl ContentProcessor for ClauseProcessor {
    fn preprocess(&self, line: &str) -> Result<Vec<String>> {
        Ok(line.trim().split("; ").map(str::to_string).collect())
    }

    fn postprocess(&self, sentences: Vec<String>) -> Result<Vec<String>> {
        Ok(sentences
            .into_iter()
            .map(|s| s.trim_start_matches("[de] ").to_string())
            .collect())
    }
}

#[tokio::test]
async fn test_custom_processor_rebuilds_line() {
    let dir = TempDir::new().unwrap();
    let port = spawn_decoder_stub().await;
    let config = job_config(dir.path(), "a; b; c\n", port);

    let client = MarianClient::new("127.0.0.1", port).unwrap();
    translate_file(client, ClauseProcessor, &config, ProcessMonitor::default())
        .await
        .unwrap();

    let output = std::fs::read_to_string(&config.output_path).unwrap();
    assert_eq!(output, "a b c\n");
}

#[tokio::test]
async fn test_translate_file_fails_without_decoder() {
    let dir = TempDir::new().unwrap();
    let port = {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        listener.local_addr().unwrap().port()
    };
    let config = job_config(dir.path(), "hello\n", port);

    let client = MarianClient::new("127.0.0.1", port).unwrap();
    let err = translate_file(
        client,
        PassthroughProcessor::new("en", "de"),
        &config,
        ProcessMonitor::default(),
    )
    .await
    .unwrap_err();
    assert!(matches!(err, TranslateError::WebSocketError(_)));
}
