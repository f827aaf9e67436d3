use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Client error: {0}")]
    Client(#[from] ClientError),

    #[error("Scraping error: {0}")]
    Scraper(#[from] ScraperError),

    #[error("Conversation error: {0}")]
    Conversation(#[from] ConversationError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Request error: {0}")]
    Request(#[from] rquest::Error),

    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    FileRead(#[from] std::io::Error),

    #[error("Failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Missing required configuration: {0}")]
    MissingField(String),

    #[error("Invalid configuration value: {0}")]
    InvalidValue(String),
}

#[derive(Error, Debug)]
pub enum ClientError {
    #[error("Failed to build client: {0}")]
    BuildError(String),

    #[error("Request failed: {0}")]
    RequestFailed(String),

    #[error("Response error {status_code}")]
    ResponseError { status_code: u16, message: String },

    #[error("Invalid URL: {0}")]
    InvalidUrl(String),
}

#[derive(Error, Debug)]
pub enum ScraperError {
    #[error("Failed to parse HTML: {0}")]
    ParseError(String),

    #[error("Selector error: {0}")]
    SelectorError(String),

    #[error("Pattern error: {0}")]
    PatternError(String),
}

/// Top-level failures of a conversation fetch. Per-reply misses never end up
/// here; they are dropped from the output instead.
#[derive(Error, Debug)]
pub enum ConversationError {
    #[error("Invalid thread id specified: {0:?}")]
    InvalidIdentifier(String),

    #[error("Thread {0} not found. It may have been deleted.")]
    ThreadNotFound(u64),

    #[error("Unable to fetch conversation (status {status})")]
    FetchFailed { status: u16 },

    /// The request failed before any status line was received.
    #[error("Unable to fetch conversation: {0}")]
    Transport(String),

    #[error("Unable to parse HTML response: {0}")]
    Parse(String),
}

pub type Result<T> = std::result::Result<T, AppError>;
