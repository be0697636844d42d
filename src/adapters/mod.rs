// Adapters layer: concrete implementations for the decoder process, its
// WebSocket endpoint, and content processing.

pub mod marian_client;
pub mod marian_server;
pub mod processor;

pub use marian_client::MarianClient;
pub use marian_server::MarianServer;
pub use processor::PassthroughProcessor;
