// src/main.rs
use clap::Parser;
use log::LevelFilter;
use log4rs::{
    append::console::{ConsoleAppender, Target},
    append::file::FileAppender,
    config::{Appender, Root},
    encode::pattern::PatternEncoder,
    filter::threshold::ThresholdFilter,
    Config,
};
use std::fs;
use std::process::ExitCode;
use wikinav::constants::{MAXLAG_RETRY_INITIAL_DELAY, MAXLAG_RETRY_MAX_DELAY};
use wikinav::{
    retry_with_backoff, Command, CommandLineInput, ErrorReport, Navigator, RevisionSpec,
    WikiConfig, WikiError, WikiUrl,
};

/// Sets up logging configuration.
///
/// Results go to stdout, so console logging is sent to stderr.
fn setup_logging(verbose: bool) -> anyhow::Result<()> {
    let log_level = if verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Warn
    };

    let log_file_path = std::env::temp_dir().join("wikinav.log");
    if let Some(parent) = log_file_path.parent() {
        fs::create_dir_all(parent)?;
    }

    let pattern = if verbose {
        "{d(%Y-%m-%d %H:%M:%S)} [{l}] {t} - {m}{n}"
    } else {
        "{m}{n}"
    };

    let stderr_appender = ConsoleAppender::builder()
        .target(Target::Stderr)
        .encoder(Box::new(PatternEncoder::new(pattern)))
        .build();

    let file_appender = FileAppender::builder()
        .encoder(Box::new(PatternEncoder::new(
            "{d(%Y-%m-%d %H:%M:%S)} [{l}] {t} - {m}{n}",
        )))
        .build(&log_file_path)?;

    let config = Config::builder()
        .appender(Appender::builder().build("stderr", Box::new(stderr_appender)))
        .appender(
            Appender::builder()
                .filter(Box::new(ThresholdFilter::new(LevelFilter::Debug)))
                .build("file", Box::new(file_appender)),
        )
        .build(
            Root::builder()
                .appender("stderr")
                .appender("file")
                .build(log_level),
        )?;

    log4rs::init_config(config)?;
    log::debug!("Logging initialized. Log file: {}", log_file_path.display());
    Ok(())
}

/// Runs one navigator operation and renders its result as JSON.
async fn run_command(
    navigator: &Navigator,
    wiki: &WikiUrl,
    command: &Command,
) -> Result<serde_json::Value, WikiError> {
    let value = match command {
        Command::Info => serde_json::to_value(&*navigator.wiki_info(wiki).await?)?,
        Command::Search { query, limit } => {
            serde_json::to_value(&*navigator.search(wiki, query, *limit).await?)?
        }
        Command::Outline { title } => {
            serde_json::to_value(&*navigator.page_outline(wiki, title).await?)?
        }
        Command::Section { title, index } => {
            serde_json::to_value(&*navigator.page_section(wiki, title, *index).await?)?
        }
        Command::Full { title } => serde_json::to_value(&*navigator.page_full(wiki, title).await?)?,
        Command::Category { category, limit } => {
            serde_json::to_value(&*navigator.category(wiki, category, *limit).await?)?
        }
        Command::Backlinks { title, limit } => {
            serde_json::to_value(&*navigator.backlinks(wiki, title, *limit).await?)?
        }
        Command::Compare { title, from, to } => {
            let from: RevisionSpec = from.parse()?;
            let to: RevisionSpec = to.parse()?;
            serde_json::to_value(&*navigator.compare(wiki, title, from, to).await?)?
        }
    };
    Ok(value)
}

async fn execute(cli: &CommandLineInput) -> Result<serde_json::Value, WikiError> {
    let config = WikiConfig::resolve(cli)?;
    let wiki = WikiUrl::parse(&cli.wiki)?;
    let navigator = Navigator::from_config(config)?;

    let result = retry_with_backoff(
        || run_command(&navigator, &wiki, &cli.command),
        cli.maxlag_retries.saturating_add(1),
        MAXLAG_RETRY_INITIAL_DELAY,
        MAXLAG_RETRY_MAX_DELAY,
    )
    .await;

    navigator.shutdown().await;
    result
}

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    let cli = CommandLineInput::parse();

    setup_logging(cli.verbose)?;

    match execute(&cli).await {
        Ok(value) => {
            println!("{}", serde_json::to_string_pretty(&value)?);
            Ok(ExitCode::SUCCESS)
        }
        Err(e) => {
            log::debug!("{:?}", e);
            let report = ErrorReport::from(&e);
            println!("{}", serde_json::to_string_pretty(&report)?);
            Ok(ExitCode::FAILURE)
        }
    }
}
