use crate::adapters::{MarianClient, MarianServer, PassthroughProcessor};
use crate::config::TranslateConfig;
use crate::core::dataset::{count_lines, LineBatcher};
use crate::core::engine::TranslationEngine;
use crate::core::progress::ProgressTracker;
use crate::domain::model::TranslationSummary;
use crate::domain::ports::{ContentProcessor, Translator};
use crate::utils::error::{Result, TranslateError};
use crate::utils::monitor::ProcessMonitor;
use std::future::Future;
use std::path::Path;
use tokio::fs::File;
use tokio::io::{BufReader, BufWriter};

/// Launches the decoder, translates the dataset, and stops the decoder.
///
/// The decoder is shut down on every exit path, including Ctrl-C.
pub async fn translate_dataset(config: &TranslateConfig) -> Result<TranslationSummary> {
    tracing::info!("Starting marian server...");
    let mut server = MarianServer::start(&config.server, &config.decoder_path, config.port)?;

    let result = tokio::select! {
        res = serve_and_translate(config, &mut server) => res,
        _ = interrupt_signal(tokio::signal::ctrl_c()) => {
            tracing::warn!("Interrupted, stopping decoder");
            Err(TranslateError::Interrupted)
        }
    };

    tracing::info!("Terminating marian server...");
    match server.shutdown().await {
        Ok(Some(status)) => tracing::debug!("Decoder exited: {}", status),
        Ok(None) => {}
        Err(e) => tracing::warn!("Failed to stop decoder cleanly: {}", e),
    }

    let summary = result?;
    if let Some(path) = &config.summary_path {
        write_summary(path, &summary).await?;
    }
    Ok(summary)
}

/// Resolves when `signal` reports Ctrl-C. If the handler cannot be
/// installed the run continues without it.
async fn interrupt_signal<F>(signal: F)
where
    F: Future<Output = std::io::Result<()>>,
{
    match signal.await {
        Ok(()) => {}
        Err(e) => {
            tracing::warn!("Ctrl-C handler unavailable, continuing without it: {}", e);
            std::future::pending::<()>().await;
        }
    }
}

async fn serve_and_translate(config: &TranslateConfig, server: &mut MarianServer) -> Result<TranslationSummary> {
    server
        .wait_until_ready(config.server.startup_timeout(), config.server.poll_interval())
        .await?;

    tracing::info!("Dataset translation...");
    let client = MarianClient::new(&config.server.host, config.port)?;
    let processor = PassthroughProcessor::new(&config.source_lang, &config.target_lang)
        .with_subword_models(config.subword_models().into_iter().map(|(_, p)| p.clone()));

    let monitor = if config.monitor {
        ProcessMonitor::new(server.pid())
    } else {
        ProcessMonitor::default()
    };

    translate_file(client, processor, config, monitor).await
}

/// Translates `config.dataset_path` into `config.output_path` with the given
/// backend. The decoder lifecycle is the caller's concern.
pub async fn translate_file<T, P>(
    translator: T,
    processor: P,
    config: &TranslateConfig,
    monitor: ProcessMonitor,
) -> Result<TranslationSummary>
where
    T: Translator,
    P: ContentProcessor,
{
    let total = count_lines(&config.dataset_path).await?;
    tracing::info!("📄 {} lines in {}", total, config.dataset_path.display());

    let input = File::open(&config.dataset_path).await?;
    if let Some(parent) = config.output_path.parent().filter(|p| !p.as_os_str().is_empty()) {
        tokio::fs::create_dir_all(parent).await?;
    }
    let output = File::create(&config.output_path).await?;

    let mut batcher = LineBatcher::new(BufReader::new(input), config.block_size);
    let mut writer = BufWriter::new(output);
    let mut progress = ProgressTracker::new(total, config.progress);

    let engine = TranslationEngine::new(translator, processor, config.case).with_monitor(monitor);
    let summary = engine.run(&mut batcher, &mut writer, &mut progress).await?;
    if progress.current() != total {
        tracing::warn!(
            "Dataset changed while translating: counted {} lines, translated {}",
            total,
            progress.current()
        );
    }

    tracing::info!(
        "✅ Translated {} lines in {} batches ({:.1} lines/s)",
        summary.lines_translated,
        summary.batches,
        summary.lines_per_second()
    );
    Ok(summary)
}

async fn write_summary(path: &Path, summary: &TranslationSummary) -> Result<()> {
    let json = serde_json::to_string_pretty(summary)?;
    tokio::fs::write(path, json).await?;
    tracing::info!("📁 Summary saved to: {}", path.display());
    Ok(())
}
