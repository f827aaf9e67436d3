pub mod client;
pub mod config;
pub mod conversation;
pub mod error;
pub mod logging;
pub mod scraper;
pub mod utils;

pub use conversation::{
    build_conversation, Conversation, ConversationResponse, ConversationScraper, Direction, Mode,
    PostLookup, ReplyRecord, ThreadId,
};
pub use error::{AppError, ConversationError, Result};
