use clap::{Parser, Subcommand};
use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};
use vocab_core::*;

mod console;

use console::Console;

#[derive(Parser)]
#[command(name = "vocab")]
#[command(about = "Vocabulary recitation with spaced review", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Override data directory
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    /// Override config file path
    #[arg(long, global = true)]
    config: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Interactive menu (default)
    Menu,

    /// Add a new word
    Add {
        word: String,
        meaning: String,
    },

    /// Review the words due today
    Recite {
        /// Number of words for this session (defaults to the daily count)
        #[arg(long, allow_negative_numbers = true)]
        count: Option<i64>,
    },

    /// Set how many words are reviewed per session
    SetDaily {
        #[arg(allow_negative_numbers = true)]
        count: i64,
    },

    /// Show progress counts
    Status {
        /// Print as JSON
        #[arg(long)]
        json: bool,
    },

    /// List learned words
    Learned,
}

fn main() -> Result<()> {
    // Initialize logging
    vocab_core::logging::init_with_level("warn");

    let cli = Cli::parse();

    let config_path = cli.config.unwrap_or_else(Config::default_config_path);
    let mut config = Config::load_or_default(&config_path)?;
    let data_dir = cli.data_dir.unwrap_or_else(|| config.data_dir());
    tracing::debug!("Using data directory {:?}", data_dir);

    let mut trainer = Trainer::open(FileStorage::new(&data_dir), config.review.words_per_day)?;

    let stdin = io::stdin();
    let mut console = Console::new(stdin.lock(), io::stdout());

    match cli.command {
        Some(Commands::Add { word, meaning }) => {
            cmd_add(&mut trainer, &mut console, &word, &meaning)
        }
        Some(Commands::Recite { count }) => cmd_recite(&mut trainer, &mut console, count),
        Some(Commands::SetDaily { count }) => {
            cmd_set_daily(&mut trainer, &mut console, &mut config, &config_path, count)
        }
        Some(Commands::Status { json }) => cmd_status(&trainer, json),
        Some(Commands::Learned) => cmd_learned(&trainer),
        Some(Commands::Menu) | None => {
            cmd_menu(&mut trainer, &mut console, &mut config, &config_path)
        }
    }
}

fn cmd_menu<R: BufRead, W: Write>(
    trainer: &mut Trainer<FileStorage>,
    console: &mut Console<R, W>,
    config: &mut Config,
    config_path: &Path,
) -> Result<()> {
    loop {
        console.say("\nVocabulary Recitation App")?;
        console.say("1. Add new word")?;
        console.say("2. Recite words")?;
        console.say("3. Set daily word count")?;
        console.say("4. Exit")?;

        let choice = console.ask_choice(
            "Choose an option: ",
            1..=4,
            "Invalid choice. Please enter a number between 1 and 4: ",
        )?;

        match choice {
            Some(1) => {
                let Some(word) = console.ask("Enter word: ")? else {
                    break;
                };
                let Some(meaning) = console.ask("Enter meaning: ")? else {
                    break;
                };
                cmd_add(trainer, console, &word, &meaning)?;
            }
            Some(2) => cmd_recite(trainer, console, None)?,
            Some(3) => {
                let Some(count) = console.ask_choice(
                    "Enter number of words per day: ",
                    i64::MIN..=i64::MAX,
                    "Invalid input. Please enter a number: ",
                )?
                else {
                    break;
                };
                cmd_set_daily(trainer, console, config, config_path, count)?;
            }
            _ => break,
        }
    }

    console.say("Goodbye!")
}

fn cmd_add<R: BufRead, W: Write>(
    trainer: &mut Trainer<FileStorage>,
    console: &mut Console<R, W>,
    word: &str,
    meaning: &str,
) -> Result<()> {
    if let Some(problem) = invalid_input(word, meaning) {
        tracing::warn!("Refused to add {:?}: {}", word, problem);
        return console.say(problem);
    }

    match trainer.add_word(word, meaning)? {
        AddOutcome::Added => console.say("Word added successfully!"),
        AddOutcome::AlreadyExists => console.say("Word already exists in vocabulary."),
    }
}

/// Words and meanings must fit on one `word|meaning` line
fn invalid_input(word: &str, meaning: &str) -> Option<&'static str> {
    if word.is_empty() {
        Some("Word cannot be empty.")
    } else if word.contains('|') {
        Some("Word cannot contain '|'.")
    } else if word.contains('\n') || meaning.contains('\n') {
        Some("Word and meaning must be a single line.")
    } else {
        None
    }
}

fn cmd_recite<R: BufRead, W: Write>(
    trainer: &mut Trainer<FileStorage>,
    console: &mut Console<R, W>,
    count: Option<i64>,
) -> Result<()> {
    let report = trainer.recite(count, console)?;
    tracing::debug!("Review session finished: {:?}", report);

    if report.is_empty() {
        return console.say("No words to review today. Good job!");
    }

    console.say(&format!(
        "\n✓ Reviewed {} words ({} correct)",
        report.reviewed, report.correct
    ))
}

fn cmd_set_daily<R: BufRead, W: Write>(
    trainer: &mut Trainer<FileStorage>,
    console: &mut Console<R, W>,
    config: &mut Config,
    config_path: &Path,
    count: i64,
) -> Result<()> {
    trainer.set_words_per_day(count);
    config.review.words_per_day = count;
    config.save_to(config_path)?;

    console.say(&format!("Set daily word count to {}", count))
}

fn cmd_status(trainer: &Trainer<FileStorage>, json: bool) -> Result<()> {
    let summary = trainer.summary(chrono::Utc::now());

    if json {
        let mut value = serde_json::to_value(&summary)?;
        value["words_per_day"] = serde_json::json!(trainer.words_per_day());
        println!("{}", serde_json::to_string_pretty(&value)?);
        return Ok(());
    }

    println!("Words: {}", summary.total);
    println!("  Learned: {}", summary.learned);
    println!("  Active:  {} ({} due now)", summary.active, summary.due);
    println!("Daily word count: {}", trainer.words_per_day());
    Ok(())
}

fn cmd_learned(trainer: &Trainer<FileStorage>) -> Result<()> {
    let learned = trainer.learned_words();

    if learned.is_empty() {
        println!("No learned words yet.");
        return Ok(());
    }

    for entry in learned {
        println!("{} - {}", entry.word, entry.meaning);
    }
    Ok(())
}
