use crate::domain::model::Batch;
use crate::utils::error::{Result, TranslateError};
use std::path::Path;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncReadExt};

const COUNT_BLOCK_SIZE: usize = 65536;

/// Counts dataset lines, reading in fixed-size blocks. A final line without a
/// trailing newline still counts.
pub async fn count_lines(path: &Path) -> Result<usize> {
    let mut file = tokio::fs::File::open(path).await?;
    let mut buf = vec![0u8; COUNT_BLOCK_SIZE];
    let mut count = 0;
    let mut last = None;

    loop {
        let n = file.read(&mut buf).await?;
        if n == 0 {
            break;
        }
        count += buf[..n].iter().filter(|&&b| b == b'\n').count();
        last = Some(buf[n - 1]);
    }

    if matches!(last, Some(b) if b != b'\n') {
        count += 1;
    }
    Ok(count)
}

/// Groups dataset lines into batches bounded by a byte-size hint.
///
/// A batch is closed as soon as its size reaches `block_size`, so every batch
/// holds at least one line and may overshoot the hint by its last line.
pub struct LineBatcher<R> {
    reader: R,
    block_size: usize,
    line_number: usize,
}

impl<R: AsyncBufRead + Unpin> LineBatcher<R> {
    pub fn new(reader: R, block_size: usize) -> Self {
        Self {
            reader,
            block_size: block_size.max(1),
            line_number: 0,
        }
    }

    pub async fn next_batch(&mut self) -> Result<Option<Batch>> {
        let mut lines = Vec::new();
        let mut byte_len = 0;

        while byte_len < self.block_size {
            let mut line = String::new();
            let n = self.reader.read_line(&mut line).await.map_err(|e| {
                if e.kind() == std::io::ErrorKind::InvalidData {
                    TranslateError::ProcessingError {
                        message: format!("line {} is not valid UTF-8", self.line_number + 1),
                    }
                } else {
                    TranslateError::IoError(e)
                }
            })?;
            if n == 0 {
                break;
            }
            self.line_number += 1;
            byte_len += n;
            lines.push(line);
        }

        if lines.is_empty() {
            return Ok(None);
        }
        Ok(Some(Batch { lines, byte_len }))
    }
}
