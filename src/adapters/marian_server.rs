use crate::config::ServerConfig;
use crate::utils::error::{Result, TranslateError};
use std::fs::File;
use std::path::Path;
use std::process::{ExitStatus, Stdio};
use std::time::Duration;
use tokio::net::TcpStream;
use tokio::process::{Child, Command};
use tokio::time::{sleep, timeout, Instant};

pub const STDOUT_LOG: &str = "marian-server.out";
pub const STDERR_LOG: &str = "marian-server.err";

/// Command-line arguments for serving `decoder_path` on `port`.
pub fn server_args(config: &ServerConfig, decoder_path: &Path, port: u16) -> Vec<String> {
    let mut args = vec![
        "-c".to_string(),
        decoder_path.display().to_string(),
        "-p".to_string(),
        port.to_string(),
    ];
    if config.allow_unk {
        args.push("--allow-unk".to_string());
    }
    args.extend([
        "-b".to_string(),
        config.beam_size.to_string(),
        "--mini-batch".to_string(),
        config.mini_batch.to_string(),
        "--normalize".to_string(),
        config.normalize.to_string(),
        "--maxi-batch-sort".to_string(),
        config.maxi_batch_sort.clone(),
        "--maxi-batch".to_string(),
        config.maxi_batch.to_string(),
    ]);
    args.extend(config.extra_args.iter().cloned());
    args
}

/// A running decoder process.
pub struct MarianServer {
    child: Child,
    host: String,
    port: u16,
    shutdown_timeout: Duration,
}

impl MarianServer {
    /// Spawns the decoder with output redirected into the configured log directory.
    pub fn start(config: &ServerConfig, decoder_path: &Path, port: u16) -> Result<Self> {
        std::fs::create_dir_all(&config.log_dir)?;
        let stdout = File::create(config.log_dir.join(STDOUT_LOG))?;
        let stderr = File::create(config.log_dir.join(STDERR_LOG))?;

        let args = server_args(config, decoder_path, port);
        tracing::debug!("Launching {} {}", config.binary, args.join(" "));

        let mut cmd = Command::new(&config.binary);
        cmd.args(&args)
            .stdin(Stdio::null())
            .stdout(Stdio::from(stdout))
            .stderr(Stdio::from(stderr));

        Self::spawn(cmd, &config.binary, config, port)
    }

    pub(crate) fn spawn(mut cmd: Command, binary: &str, config: &ServerConfig, port: u16) -> Result<Self> {
        let child = cmd
            .kill_on_drop(true)
            .spawn()
            .map_err(|source| TranslateError::DecoderLaunchError {
                binary: binary.to_string(),
                source,
            })?;

        tracing::info!("🚀 Decoder started (pid {:?}) on port {}", child.id(), port);
        Ok(Self {
            child,
            host: config.host.clone(),
            port,
            shutdown_timeout: config.shutdown_timeout(),
        })
    }

    pub fn pid(&self) -> Option<u32> {
        self.child.id()
    }

    /// Polls the decoder port until it accepts a TCP connection.
    pub async fn wait_until_ready(&mut self, startup_timeout: Duration, poll_interval: Duration) -> Result<()> {
        let started = Instant::now();
        loop {
            if let Some(status) = self.child.try_wait()? {
                return Err(TranslateError::DecoderExitedError {
                    status: status.to_string(),
                });
            }

            match TcpStream::connect((self.host.as_str(), self.port)).await {
                Ok(_) => {
                    tracing::info!("Decoder ready after {:?}", started.elapsed());
                    return Ok(());
                }
                Err(e) => tracing::trace!("Decoder not ready yet: {}", e),
            }

            if started.elapsed() >= startup_timeout {
                return Err(TranslateError::DecoderStartupTimeout {
                    port: self.port,
                    waited: started.elapsed(),
                });
            }
            sleep(poll_interval).await;
        }
    }

    /// Kills the decoder and waits for it to exit. Returns `None` if it did
    /// not exit within the shutdown timeout.
    pub async fn shutdown(mut self) -> Result<Option<ExitStatus>> {
        if let Some(status) = self.child.try_wait()? {
            tracing::warn!("Decoder had already exited: {}", status);
            return Ok(Some(status));
        }

        tracing::info!("Terminating decoder...");
        self.child.start_kill()?;
        match timeout(self.shutdown_timeout, self.child.wait()).await {
            Ok(status) => Ok(Some(status?)),
            Err(_) => {
                tracing::warn!(
                    "Decoder did not exit within {:?}; it is killed when dropped",
                    self.shutdown_timeout
                );
                Ok(None)
            }
        }
    }
}
