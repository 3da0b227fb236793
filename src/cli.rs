use clap::Parser;
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "ytwise",
    about = "YouTube video summarizer and transcript Q&A chat",
    version,
)]
pub struct Cli {
    /// YouTube video URL
    pub url: String,

    /// Ask questions about the video in an interactive chat session
    #[arg(short, long)]
    pub chat: bool,

    /// Print the flattened transcript instead of summarizing
    #[arg(short, long)]
    pub transcript: bool,

    /// Print an embeddable <iframe> fragment for the video and exit
    #[arg(short, long)]
    pub embed: bool,

    /// Preferred caption language
    #[arg(short, long)]
    pub lang: Option<String>,

    /// Completion model (overrides config file)
    #[arg(short, long)]
    pub model: Option<String>,

    /// Completion endpoint base URL (overrides config file)
    #[arg(long)]
    pub base_url: Option<String>,

    /// Write the summary to a file instead of stdout
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Show resolution and fetch details
    #[arg(short, long)]
    pub verbose: bool,
}
