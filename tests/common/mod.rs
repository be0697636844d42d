#![allow(dead_code)]

use dataset_translator::{CaseNormalization, ServerConfig, TranslateConfig};
use futures::{SinkExt, StreamExt};
use std::path::{Path, PathBuf};
use std::time::Duration;
use tokio::net::TcpListener;
use tokio_tungstenite::accept_async;
use tokio_tungstenite::tungstenite::Message;

/// What the stub decoder does with each sentence.
pub fn fake_translate(sentence: &str) -> String {
    format!("[de] {}", sentence)
}

/// Starts a WebSocket server answering every text frame line by line with
/// `fake_translate`. Returns its port.
pub async fn spawn_decoder_stub() -> u16 {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let port = listener.local_addr().unwrap().port();
    tokio::spawn(serve_decoder_stub(listener));
    port
}

/// Like `spawn_decoder_stub`, but only starts listening on `port` once
/// `marker` exists, so callers can observe readiness polling.
pub fn spawn_decoder_stub_after(port: u16, marker: PathBuf) {
    tokio::spawn(async move {
        while !marker.exists() {
            tokio::time::sleep(Duration::from_millis(10)).await;
        }
        let listener = TcpListener::bind(("127.0.0.1", port)).await.unwrap();
        serve_decoder_stub(listener).await;
    });
}

/// Returns a port nothing is listening on.
pub fn free_port() -> u16 {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    listener.local_addr().unwrap().port()
}

async fn serve_decoder_stub(listener: TcpListener) {
    while let Ok((stream, _)) = listener.accept().await {
        tokio::spawn(async move {
            // readiness checks connect and hang up without a handshake
            let Ok(mut ws) = accept_async(stream).await else {
                return;
            };
            while let Some(Ok(msg)) = ws.next().await {
                if let Message::Text(text) = msg {
                    let reply = text
                        .as_str()
                        .split('\n')
                        .map(fake_translate)
                        .collect::<Vec<_>>()
                        .join("\n");
                    if ws.send(Message::Text(reply.into())).await.is_err() {
                        break;
                    }
                }
            }
        });
    }
}

/// Starts a WebSocket server that completes the handshake and closes
/// without answering.
pub async fn spawn_silent_stub() -> u16 {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let port = listener.local_addr().unwrap().port();

    tokio::spawn(async move {
        while let Ok((stream, _)) = listener.accept().await {
            tokio::spawn(async move {
                if let Ok(mut ws) = accept_async(stream).await {
                    let _ = ws.next().await;
                    let _ = ws.close(None).await;
                }
            });
        }
    });

    port
}

/// Starts a WebSocket server that sends a ping and a binary frame before
/// answering each text frame with `fake_translate`.
pub async fn spawn_chatty_stub() -> u16 {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let port = listener.local_addr().unwrap().port();

    tokio::spawn(async move {
        while let Ok((stream, _)) = listener.accept().await {
            tokio::spawn(async move {
                let Ok(mut ws) = accept_async(stream).await else {
                    return;
                };
                if let Some(Ok(Message::Text(text))) = ws.next().await {
                    let _ = ws.send(Message::Ping(b"alive".to_vec().into())).await;
                    let _ = ws.send(Message::Binary(vec![0u8, 1, 2].into())).await;
                    let reply = fake_translate(text.as_str());
                    let _ = ws.send(Message::Text(reply.into())).await;
                    while let Some(Ok(_)) = ws.next().await {}
                }
            });
        }
    });

    port
}

pub fn job_config(dir: &Path, dataset: &str, port: u16) -> TranslateConfig {
    let dataset_path = dir.join("dataset.en");
    std::fs::write(&dataset_path, dataset).unwrap();
    let decoder_path = dir.join("decoder.yml");
    std::fs::write(&decoder_path, "models: [model.npz]\n").unwrap();

    TranslateConfig {
        dataset_path,
        output_path: dir.join("out").join("dataset.de"),
        decoder_path,
        source_lang: "en".to_string(),
        target_lang: "de".to_string(),
        sourcebpe: None,
        targetbpe: None,
        sourcespm: None,
        targetspm: None,
        port,
        block_size: 16,
        case: CaseNormalization::None,
        monitor: false,
        progress: false,
        summary_path: None,
        server: ServerConfig {
            host: "127.0.0.1".to_string(),
            log_dir: dir.join("logs"),
            startup_timeout_seconds: 5,
            poll_interval_ms: 20,
            ..ServerConfig::default()
        },
    }
}
