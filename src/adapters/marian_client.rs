use crate::domain::ports::Translator;
use crate::utils::error::{Result, TranslateError};
use async_trait::async_trait;
use futures::{SinkExt, StreamExt};
use tokio_tungstenite::connect_async;
use tokio_tungstenite::tungstenite::Message;
use url::Url;

/// WebSocket client for marian-server's `/translate` endpoint.
///
/// Every request opens its own connection: one text frame out, one text
/// frame back, then close.
#[derive(Debug, Clone)]
pub struct MarianClient {
    endpoint: Url,
}

impl MarianClient {
    pub fn new(host: &str, port: u16) -> Result<Self> {
        let endpoint = Url::parse(&format!("ws://{}:{}/translate", host, port))?;
        Ok(Self { endpoint })
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }
}

#[async_trait]
impl Translator for MarianClient {
    async fn translate(&self, text: &str) -> Result<String> {
        let (mut ws, _) = connect_async(self.endpoint.as_str()).await?;
        ws.send(Message::Text(text.to_string().into())).await?;

        let reply = loop {
            match ws.next().await {
                Some(Ok(Message::Text(reply))) => break reply.as_str().to_owned(),
                Some(Ok(Message::Close(frame))) => {
                    return Err(TranslateError::ProtocolError {
                        message: format!("decoder closed the connection before replying: {:?}", frame),
                    });
                }
                Some(Ok(other)) => {
                    tracing::debug!("Ignoring non-text frame from decoder: {:?}", other);
                }
                Some(Err(e)) => return Err(e.into()),
                None => {
                    return Err(TranslateError::ProtocolError {
                        message: "decoder stream ended before replying".to_string(),
                    });
                }
            }
        };

        if let Err(e) = ws.close(None).await {
            tracing::debug!("Closing decoder connection failed: {}", e);
        }
        Ok(reply)
    }
}
