use crate::core::dataset::LineBatcher;
use crate::core::progress::ProgressTracker;
use crate::domain::model::{Batch, CaseNormalization, TranslationSummary};
use crate::domain::ports::{ContentProcessor, Translator};
use crate::utils::error::Result;
use crate::utils::monitor::ProcessMonitor;
use chrono::Utc;
use std::time::Instant;
use tokio::io::{AsyncBufRead, AsyncWrite, AsyncWriteExt};

const MONITOR_EVERY_BATCHES: usize = 50;

pub struct TranslationEngine<T: Translator, P: ContentProcessor> {
    translator: T,
    processor: P,
    case: CaseNormalization,
    monitor: ProcessMonitor,
}

impl<T: Translator, P: ContentProcessor> TranslationEngine<T, P> {
    pub fn new(translator: T, processor: P, case: CaseNormalization) -> Self {
        Self {
            translator,
            processor,
            case,
            monitor: ProcessMonitor::default(),
        }
    }

    pub fn with_monitor(mut self, monitor: ProcessMonitor) -> Self {
        self.monitor = monitor;
        self
    }

    /// Translates one dataset line into one output line (no terminator).
    pub async fn translate_line(&self, line: &str) -> Result<String> {
        let text = strip_terminator(line);
        if text.trim().is_empty() {
            return Ok(String::new());
        }

        let normalized = self.case.apply(text);
        let sentences = self.processor.preprocess(&normalized)?;
        if sentences.is_empty() {
            return Ok(String::new());
        }

        let reply = self.translator.translate(&sentences.join("\n")).await?;
        let reply = reply.strip_suffix('\n').unwrap_or(&reply);
        let translated: Vec<String> = reply.split('\n').map(str::to_string).collect();
        if translated.len() != sentences.len() {
            tracing::warn!(
                "Decoder returned {} sentences for {} inputs",
                translated.len(),
                sentences.len()
            );
        }

        let translation = self.processor.postprocess(translated)?;
        Ok(translation.join(" "))
    }

    pub async fn translate_batch(&self, batch: &Batch) -> Result<Vec<String>> {
        let mut translated_lines = Vec::with_capacity(batch.line_count());
        for line in &batch.lines {
            translated_lines.push(self.translate_line(line).await?);
        }
        Ok(translated_lines)
    }

    /// Translates every batch from `batcher` and writes one output line per
    /// input line to `writer`.
    pub async fn run<R, W>(
        &self,
        batcher: &mut LineBatcher<R>,
        writer: &mut W,
        progress: &mut ProgressTracker,
    ) -> Result<TranslationSummary>
    where
        R: AsyncBufRead + Unpin,
        W: AsyncWrite + Unpin,
    {
        let started_at = Utc::now();
        let t0 = Instant::now();
        let mut batches = 0;
        let mut lines_translated = 0;
        let mut blank_lines = 0;
        let mut bytes_read = 0;

        while let Some(batch) = batcher.next_batch().await? {
            progress.update(batch.line_count());
            tracing::debug!(
                "Batch {}: {} lines, {} bytes",
                batches + 1,
                batch.line_count(),
                batch.byte_len
            );

            let result = self.translate_batch(&batch).await?;
            blank_lines += batch
                .lines
                .iter()
                .filter(|line| strip_terminator(line).trim().is_empty())
                .count();

            let mut chunk = result.join("\n");
            chunk.push('\n');
            writer.write_all(chunk.as_bytes()).await?;
            writer.flush().await?;

            batches += 1;
            lines_translated += batch.line_count();
            bytes_read += batch.byte_len;

            if batches % MONITOR_EVERY_BATCHES == 0 {
                self.monitor.log_stats(&format!("after {} batches", batches));
            }
        }

        progress.finish();
        self.monitor.log_final_stats();

        Ok(TranslationSummary {
            lines_translated,
            blank_lines,
            batches,
            bytes_read,
            started_at,
            finished_at: Utc::now(),
            elapsed_ms: t0.elapsed().as_millis() as u64,
        })
    }
}

fn strip_terminator(line: &str) -> &str {
    let line = line.strip_suffix('\n').unwrap_or(line);
    line.strip_suffix('\r').unwrap_or(line)
}
