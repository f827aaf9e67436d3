use clap::Parser;
use conversation_scraper::config::Config;
use conversation_scraper::error::Result;
use conversation_scraper::logging::{init_logging, parse_log_level, LoggerConfig};
use conversation_scraper::{
    log_error, log_info, utils, ConversationResponse, ConversationScraper, Direction, Mode,
};
use std::path::PathBuf;

#[derive(Clone, Copy, clap::ValueEnum)]
enum OutputMode {
    /// Reply ids and their position only
    Ids,
    /// Author, text, timestamp and avatar of each reply
    Data,
}

#[derive(Parser)]
#[command(name = "conversation-scraper")]
#[command(about = "Fetch the replies of a conversation thread from the mobile site")]
struct Args {
    /// Id of the root post
    thread_id: String,

    #[arg(short, long, value_enum, default_value_t = OutputMode::Data)]
    mode: OutputMode,

    #[arg(short, long, value_enum, default_value_t = Direction::Both)]
    direction: Direction,

    #[arg(short, long, env = "CONVERSATION_CONFIG", default_value = "config.toml")]
    config: PathBuf,

    /// Also write the JSON result to this file
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Save the fetched markup to this file
    #[arg(long)]
    dump_html: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let config = Config::load_or_default(&args.config)?;
    let logger_config = LoggerConfig {
        directory: config.logging.directory.clone(),
        file_name: config.logging.filename.clone(),
        rotation: tracing_appender::rolling::Rotation::DAILY,
        level: parse_log_level(&config.logging.level)?,
    };
    init_logging(logger_config)?;

    log_info!("[main] Fetching conversation {}", args.thread_id);

    let mode = match args.mode {
        OutputMode::Ids => Mode::Ids,
        OutputMode::Data => Mode::Data,
    };

    let mut scraper = ConversationScraper::new(&config)?;
    let result = scraper
        .fetch_conversation(&args.thread_id, mode, args.direction)
        .await;

    if let Err(err) = &result {
        log_error!(err => "[main] Conversation fetch failed");
    }

    if let (Some(path), Some(html)) = (&args.dump_html, scraper.raw_html()) {
        utils::save_html(html, path)?;
    }

    let response = ConversationResponse::from(result);
    println!("{}", serde_json::to_string_pretty(&response)?);

    if let Some(path) = &args.output {
        utils::save_json(&response, path)?;
    }

    if response.error {
        std::process::exit(1);
    }
    Ok(())
}
