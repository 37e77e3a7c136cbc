//! Command-line interface implementation

use clap::Parser;
use std::error::Error;
use std::io::{self, Write};

use crate::episodes::{Episode, EpisodeCatalog};
use crate::ui::time::format_duration;

/// Command-line arguments for podcastr
#[derive(Parser, Debug)]
#[command(author, version, about = "Podcast player for the terminal", long_about = None)]
pub struct Args {
    /// Episode source: API base URL or path to a server.json database
    #[arg(short, long, env = "PODCASTR_SOURCE")]
    pub source: Option<String>,

    /// Maximum number of episodes to load
    #[arg(short, long, env = "PODCASTR_LIMIT")]
    pub limit: Option<usize>,

    /// Episode number to start with (1-based); prompts when omitted
    #[arg(short, long)]
    pub episode: Option<usize>,

    /// Play the selected episode on its own instead of the whole list
    #[arg(long)]
    pub single: bool,

    /// Do not start playing when a new episode is loaded
    #[arg(long)]
    pub no_autoplay: bool,

    /// Config file path
    #[arg(short, long, env = "PODCASTR_CONFIG")]
    pub config: Option<String>,
}

/// CLI user interface for picking what to play
pub struct Cli {
    pub args: Args,
}

impl Cli {
    /// Create a new CLI instance
    pub fn new() -> Self {
        Cli {
            args: Args::parse(),
        }
    }

    /// Display the episode listing, latest releases first
    pub fn display_catalog(&self, catalog: &EpisodeCatalog) {
        println!("\nLatest releases");
        println!("{}", "-".repeat(80));
        for (index, episode) in catalog.latest.iter().enumerate() {
            println!("{}", format_episode_row(index + 1, episode));
        }

        if !catalog.others.is_empty() {
            println!("\nAll episodes");
            println!("{}", "-".repeat(80));
            for (offset, episode) in catalog.others.iter().enumerate() {
                println!("{}", format_episode_row(catalog.latest.len() + offset + 1, episode));
            }
        }
        println!();
    }

    /// Prompt user to select an episode, returning its 0-based index
    pub fn select_episode(&self, count: usize) -> Result<usize, Box<dyn Error>> {
        if count == 0 {
            return Err("No episodes available".into());
        }

        print!("Enter the number of the episode to play (1-{}): ", count);
        io::stdout().flush()?;

        let mut input = String::new();
        io::stdin().read_line(&mut input)?;

        parse_selection(&input, count)
    }

    /// Display error messages
    pub fn display_error(&self, error: &dyn Error) {
        eprintln!("Error: {}", error);
    }
}

impl Default for Cli {
    fn default() -> Self {
        Self::new()
    }
}

/// Parses a 1-based selection into a 0-based index.
pub fn parse_selection(input: &str, count: usize) -> Result<usize, Box<dyn Error>> {
    let selection = input.trim().parse::<usize>()?;
    if selection < 1 || selection > count {
        return Err(format!("Invalid selection. Please enter a number between 1 and {}", count).into());
    }
    Ok(selection - 1)
}

fn format_episode_row(number: usize, episode: &Episode) -> String {
    let title = if episode.title.chars().count() > 40 {
        format!("{}...", episode.title.chars().take(37).collect::<String>())
    } else {
        episode.title.clone()
    };
    let members = if episode.members.chars().count() > 25 {
        format!("{}...", episode.members.chars().take(22).collect::<String>())
    } else {
        episode.members.clone()
    };
    format!("{:<4} {:<40} {:<25} {}", number, title, members, format_duration(episode.duration))
}
