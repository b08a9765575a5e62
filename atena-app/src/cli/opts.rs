use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Debug, Parser, Clone)]
#[command(name = "atena", version, about = "Atena flashcards CLI/API")]
pub struct Cli {
    /// Data directory (defaults to the platform app data dir, or $ATENA_DATA_DIR)
    #[arg(long)]
    pub data_dir: Option<PathBuf>,

    #[command(subcommand)]
    pub cmd: Command,
}

#[derive(Debug, Subcommand, Clone)]
pub enum Command {
    /// Deck operations
    #[command(subcommand)]
    Deck(DeckCmd),
    /// Card operations
    #[command(subcommand)]
    Card(CardCmd),
    /// Interactive review loop
    Review(ReviewCmd),
    /// Per-deck statistics
    Stats {
        /// Deck id or title; all decks when omitted
        deck: Option<String>,
    },
    /// Cards due across all decks
    Due,
    /// Export data
    #[command(subcommand)]
    Export(ExportCmd),
    /// Import data
    #[command(subcommand)]
    Import(ImportCmd),
    /// Launch the HTTP API
    Api(ApiCmd),
}

#[derive(Debug, Subcommand, Clone)]
pub enum DeckCmd {
    Add(DeckAdd),
    List,
    Show { deck: String },
    Edit(DeckEdit),
    Rm { deck: String },
}

#[derive(Debug, Args, Clone)]
pub struct DeckAdd {
    pub title: String,
    #[arg(long, default_value = "")]
    pub description: String,
    #[arg(long, default_value = "")]
    pub category: String,
}

#[derive(Debug, Args, Clone)]
pub struct DeckEdit {
    pub deck: String,
    #[arg(long)]
    pub title: Option<String>,
    #[arg(long)]
    pub description: Option<String>,
    #[arg(long)]
    pub category: Option<String>,
}

#[derive(Debug, Subcommand, Clone)]
pub enum CardCmd {
    Add(CardAdd),
    List(CardList),
    Edit(CardEdit),
    Rm { deck: String, card_id: String },
}

#[derive(Debug, Args, Clone)]
pub struct CardAdd {
    #[arg(long)]
    pub deck: String,
    #[arg(long)]
    pub front: String,
    #[arg(long)]
    pub back: String,
    /// easy, medium, or hard
    #[arg(long, default_value = "medium")]
    pub difficulty: String,
}

#[derive(Debug, Args, Clone)]
pub struct CardList {
    #[arg(long)]
    pub deck: String,
    /// Substring match on front/back text
    #[arg(long)]
    pub search: Option<String>,
    #[arg(long)]
    pub difficulty: Option<String>,
    /// Only cards currently due
    #[arg(long)]
    pub due: bool,
}

#[derive(Debug, Args, Clone)]
pub struct CardEdit {
    pub deck: String,
    pub card_id: String,
    #[arg(long)]
    pub front: Option<String>,
    #[arg(long)]
    pub back: Option<String>,
    #[arg(long)]
    pub difficulty: Option<String>,
}

#[derive(Debug, Args, Clone)]
pub struct ReviewCmd {
    #[arg(long)]
    pub deck: Option<String>,
    #[arg(long, default_value_t = 50)]
    pub max: usize,
}

#[derive(Debug, Subcommand, Clone)]
pub enum ExportCmd {
    Json { path: PathBuf },
    Csv { path: PathBuf, #[arg(long)] deck: Option<String> },
}

#[derive(Debug, Subcommand, Clone)]
pub enum ImportCmd {
    Json { path: PathBuf },
    Csv { path: PathBuf, #[arg(long)] deck: Option<String> },
}

#[derive(Debug, Args, Clone)]
pub struct ApiCmd {
    /// Bind address (host:port)
    #[arg(long, default_value = "127.0.0.1:8080")]
    pub addr: String,
}
