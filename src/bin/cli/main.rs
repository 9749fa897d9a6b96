mod app;
mod commands;
mod render;

use std::io::IsTerminal;
use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tango_lib::quiz::{QuizFilter, QuizMode};

#[derive(Parser)]
#[command(name = "tango-cli", about = "Vocabulary flashcards and quizzes", version)]
struct Cli {
    /// Settings file (default: platform config dir)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Card data directory (overrides the settings file)
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    /// Output format
    #[arg(long, global = true, default_value = "plain")]
    format: OutputFormat,

    /// Disable ANSI colors
    #[arg(long, global = true)]
    no_color: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Clone, Debug, clap::ValueEnum)]
pub enum OutputFormat {
    Plain,
    Json,
}

#[derive(Subcommand)]
enum Command {
    /// List cards
    List {
        /// Only cards in this genre
        #[arg(long)]
        genre: Option<String>,
        /// Case-insensitive text search
        #[arg(long)]
        search: Option<String>,
    },

    /// Add a card
    Add {
        /// Prompt in your native language
        native: String,
        /// Answer in the language you are learning
        target: String,
        #[arg(long)]
        pronunciation: Option<String>,
        /// Comma-separated genres
        #[arg(long)]
        genre: Option<String>,
        #[arg(long)]
        memo: Option<String>,
    },

    /// Edit a card (empty string clears an optional field)
    Edit {
        /// Card id or unambiguous id prefix
        id: String,
        #[arg(long)]
        native: Option<String>,
        #[arg(long)]
        target: Option<String>,
        #[arg(long)]
        pronunciation: Option<String>,
        #[arg(long)]
        genre: Option<String>,
        #[arg(long)]
        memo: Option<String>,
    },

    /// Delete a card
    Delete {
        /// Card id or unambiguous id prefix
        id: String,
    },

    /// Toggle a card's favourite flag
    Fav {
        /// Card id or unambiguous id prefix
        id: String,
    },

    /// List favourite cards
    Favorites,

    /// List cards with outstanding mistakes, most-missed first
    Weak {
        /// Reset every mistake count to zero
        #[arg(long)]
        reset: bool,
    },

    /// List genres with card counts
    Genres,

    /// Collection overview
    Stats,

    /// Import cards from a JSON backup (upsert by id)
    Import {
        file: PathBuf,
    },

    /// Export all cards as a JSON backup
    Export {
        /// Output file (default: stdout)
        file: Option<PathBuf>,
    },

    /// Delete every card
    Erase {
        /// Confirm the deletion
        #[arg(long)]
        yes: bool,
    },

    /// Run an interactive quiz
    Quiz {
        /// all, _fav, _weak, or a genre name
        #[arg(long, default_value = "all")]
        filter: QuizFilter,
        /// native-to-target or target-to-native (default from settings)
        #[arg(long)]
        mode: Option<QuizMode>,
        /// Cards per session (default from settings)
        #[arg(long)]
        size: Option<usize>,
    },

    /// Show or change settings
    #[command(subcommand)]
    Config(ConfigCommand),
}

#[derive(Subcommand)]
enum ConfigCommand {
    /// Print the effective settings
    Show,

    /// Change settings
    Set {
        #[arg(long)]
        session_size: Option<usize>,
        #[arg(long)]
        mode: Option<QuizMode>,
        /// Card data directory to store in the settings file
        #[arg(long)]
        cards_dir: Option<PathBuf>,
        /// Speech program (empty string disables it)
        #[arg(long)]
        voice_command: Option<String>,
        /// Arguments for the speech program; may use {voice}, {rate}, {lang}
        #[arg(long, allow_hyphen_values = true, num_args = 1..)]
        voice_args: Option<Vec<String>>,
        #[arg(long)]
        voice: Option<String>,
        #[arg(long)]
        voice_rate: Option<f32>,
        #[arg(long)]
        voice_lang: Option<String>,
        /// Turn speech on or off
        #[arg(long)]
        voice_enabled: Option<bool>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    env_logger::init();

    let cli = Cli::parse();
    let use_color = !cli.no_color && std::io::stdout().is_terminal();

    let app = app::App::new(cli.config.clone(), cli.data_dir.clone()).await?;

    match cli.command {
        Command::List { genre, search } => {
            commands::list::run(&app, genre.as_deref(), search.as_deref(), &cli.format, use_color)
                .await?;
        }
        Command::Add { native, target, pronunciation, genre, memo } => {
            commands::card::run_add(
                &app,
                native,
                target,
                pronunciation,
                genre,
                memo,
                &cli.format,
            )
            .await?;
        }
        Command::Edit { id, native, target, pronunciation, genre, memo } => {
            let edit = commands::card::CardEdit { native, target, pronunciation, genre, memo };
            commands::card::run_edit(&app, &id, edit, &cli.format).await?;
        }
        Command::Delete { id } => {
            commands::card::run_delete(&app, &id).await?;
        }
        Command::Fav { id } => {
            commands::favorites::run_toggle(&app, &id, &cli.format).await?;
        }
        Command::Favorites => {
            commands::favorites::run_list(&app, &cli.format, use_color).await?;
        }
        Command::Weak { reset } => {
            commands::weak::run(&app, reset, &cli.format, use_color).await?;
        }
        Command::Genres => {
            commands::genres::run(&app, &cli.format).await?;
        }
        Command::Stats => {
            commands::stats::run(&app, &cli.format).await?;
        }
        Command::Import { file } => {
            commands::transfer::run_import(&app, &file, &cli.format).await?;
        }
        Command::Export { file } => {
            commands::transfer::run_export(&app, file.as_deref()).await?;
        }
        Command::Erase { yes } => {
            commands::card::run_erase(&app, yes).await?;
        }
        Command::Quiz { filter, mode, size } => {
            commands::quiz::run(&app, filter, mode, size, &cli.format, use_color).await?;
        }
        Command::Config(subcmd) => match subcmd {
            ConfigCommand::Show => {
                commands::settings::run_show(&app, &cli.format)?;
            }
            ConfigCommand::Set {
                session_size,
                mode,
                cards_dir,
                voice_command,
                voice_args,
                voice,
                voice_rate,
                voice_lang,
                voice_enabled,
            } => {
                let change = commands::settings::SettingsChange {
                    session_size,
                    mode,
                    data_dir: cards_dir,
                    voice_command,
                    voice_args,
                    voice,
                    voice_rate,
                    voice_lang,
                    voice_enabled,
                };
                commands::settings::run_set(&app, change)?;
            }
        },
    }

    Ok(())
}
