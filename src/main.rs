use clap::Parser;
use simplelog::{ConfigBuilder, LevelFilter, WriteLogger};
use std::fs::File;
use ttychat::Provider;
use ttychat::core::config;
use ttychat::tui;

#[derive(Parser)]
#[command(name = "ttychat", about = "Full-screen terminal chat with a local model")]
struct Args {
    /// Reply provider to use
    #[arg(short, long, value_enum)]
    provider: Option<Provider>,

    /// Model identifier passed to the provider
    #[arg(short, long)]
    model: Option<String>,
}

#[tokio::main]
async fn main() -> std::io::Result<()> {
    let args = Args::parse();
    dotenv::dotenv().ok();

    // Initialize file logger - writes to ttychat.log in current directory
    let log_config = ConfigBuilder::new()
        .set_time_format_rfc3339()
        .build();

    if let Ok(log_file) = File::create("ttychat.log") {
        let _ = WriteLogger::init(LevelFilter::Debug, log_config, log_file);
    }

    let file_config = config::load().unwrap_or_else(|e| {
        log::warn!("{}, using defaults", e);
        config::TtyChatConfig::default()
    });
    let resolved = config::resolve(&file_config, args.provider, args.model.as_deref());

    log::info!(
        "ttychat starting up with provider: {:?}, model: {}",
        resolved.provider,
        resolved.model_name
    );

    tui::run(resolved)
}
