use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use eyre::Result;
use log::info;
use tokio::sync::mpsc;

mod cli;

use cli::Cli;

use ytwise::completion::{self, CompletionConfig};
use ytwise::prompt::{self, ConversationTurn};

fn setup_logging() -> Result<()> {
    let log_dir = log_dir();
    std::fs::create_dir_all(&log_dir)?;
    let log_file = log_dir.join("ytwise.log");

    let target = Box::new(std::fs::OpenOptions::new().create(true).append(true).open(&log_file)?);

    env_logger::Builder::from_default_env()
        .target(env_logger::Target::Pipe(target))
        .init();

    info!("Logging initialized: {}", log_file.display());
    Ok(())
}

fn log_dir() -> PathBuf {
    dirs::data_local_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("ytwise")
        .join("logs")
}

fn build_after_help() -> String {
    let config_path = ytwise::config::config_path();
    let log_path = log_dir().join("ytwise.log");

    format!(
        "CONFIG:\n  {}\n\nAPI KEY:\n  set `api_key` in the config file or export {}\n\nLogs are written to: {}",
        config_path.display(),
        completion::API_KEY_ENV,
        log_path.display()
    )
}

/// Print the growing suffix of each cumulative emission and return the
/// final full text.
async fn drain_stream(rx: &mut mpsc::Receiver<ytwise::Result<String>>, echo: bool) -> Result<String> {
    let mut latest = String::new();
    let mut printed = 0;

    while let Some(item) = rx.recv().await {
        let cumulative = item?;
        if echo {
            // Cumulative emissions grow monotonically, so the previous
            // text is always a prefix of the current one.
            print!("{}", &cumulative[printed..]);
            io::stdout().flush()?;
        }
        printed = cumulative.len();
        latest = cumulative;
    }

    if echo && !latest.is_empty() {
        println!();
    }
    Ok(latest)
}

async fn run_chat(
    client: &reqwest::Client,
    config: &CompletionConfig,
    title: &str,
    transcript: &str,
) -> Result<()> {
    let mut history: Vec<ConversationTurn> = Vec::new();
    let stdin = io::stdin();

    eprintln!("Ask about the video. Empty line or Ctrl-D to quit.");
    loop {
        eprint!("> ");
        io::stderr().flush()?;

        let mut line = String::new();
        if stdin.lock().read_line(&mut line)? == 0 {
            break;
        }
        let input = line.trim().to_string();
        if input.is_empty() {
            break;
        }

        let messages = prompt::chat_messages(title, transcript, &history, &input)?;
        let mut rx = completion::stream(client, config, messages);
        let answer = drain_stream(&mut rx, true).await?;

        history.push(ConversationTurn {
            user: input,
            assistant: answer,
        });
    }

    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    setup_logging()?;

    let after_help = build_after_help();
    let cmd = <Cli as clap::CommandFactory>::command().after_help(after_help);
    let matches = cmd.get_matches();
    let cli = <Cli as clap::FromArgMatches>::from_arg_matches(&matches)?;

    let url = cli.url.trim().to_string();

    if cli.embed {
        println!("{}", ytwise::embed_html(&url));
        return Ok(());
    }

    // Load config file (non-fatal if missing/invalid)
    let config = ytwise::config::Config::load().unwrap_or_default();

    let lang = cli
        .lang
        .clone()
        .or_else(|| config.default_lang.clone())
        .unwrap_or_else(|| "en".to_string());

    let client = reqwest::Client::new();

    let transcript = ytwise::youtube::fetch_transcript(&client, &url, &lang).await?;
    if cli.verbose {
        eprintln!(
            "Video: {}\nLanguage: {}\nTranscript: {} chars",
            transcript.video_id,
            transcript.language,
            transcript.text.len(),
        );
    }

    if cli.transcript {
        if let Some(ref path) = cli.output {
            std::fs::write(path, &transcript.text)?;
        } else {
            println!("{}", transcript.text);
        }
        return Ok(());
    }

    let title = ytwise::metadata::fetch_title(&client, &url).await?;
    let completion_config = config.completion_config(cli.model.as_deref(), cli.base_url.as_deref())?;
    if cli.verbose {
        eprintln!("Title: {title}\nModel: {}", completion_config.model);
    }

    if cli.chat {
        return run_chat(&client, &completion_config, &title, &transcript.text).await;
    }

    let messages = prompt::summarize_messages(&title, &transcript.text);
    let mut rx = completion::stream(&client, &completion_config, messages);
    let echo = cli.output.is_none();
    let summary = drain_stream(&mut rx, echo).await?;

    if let Some(ref path) = cli.output {
        std::fs::write(path, &summary)?;
        if cli.verbose {
            eprintln!("Summary written to: {}", path.display());
        }
    }

    Ok(())
}
