pub mod config;
pub mod conversation;
pub mod models;
pub mod openai;
pub mod port;
pub mod prompts;

// Re-exports (public API)
pub use config::LlmConfig;
pub use conversation::{Agent, ConversationDriver, perspective};
pub use models::{ChatMessage, ChatTurn, Role};
pub use openai::OpenAiClient;
pub use port::ChatModel;
