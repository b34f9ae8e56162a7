use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "cardstore")]
#[command(about = "Make, keep and share birthday cards", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// File holding the key-value data
    #[arg(long, global = true, env = "CARDSTORE_DATA_FILE", default_value = "cards.json")]
    pub data_file: PathBuf,

    /// Key the card collection is stored under
    #[arg(long, global = true, env = "CARDSTORE_KEY")]
    pub key: Option<String>,

    /// Print JSON instead of text
    #[arg(long, global = true)]
    pub json: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// List saved cards
    #[command(alias = "ls")]
    List,

    /// Show one card
    #[command(alias = "v")]
    Show { id: String },

    /// Save a new card
    #[command(alias = "n")]
    New {
        #[command(flatten)]
        fields: FieldArgs,
    },

    /// Edit a saved card (unset options keep their current value)
    #[command(alias = "e")]
    Edit {
        id: String,

        #[command(flatten)]
        fields: FieldArgs,
    },

    /// Delete a card
    #[command(alias = "rm")]
    Delete { id: String },

    /// Print the text and photo that would be shared
    Share { id: String },

    /// List the available background colors and fonts
    Palette,
}

#[derive(Args, Debug, Default)]
pub struct FieldArgs {
    /// Title at the top of the card
    #[arg(short, long)]
    pub title: Option<String>,

    /// Text at the bottom of the card
    #[arg(short, long)]
    pub bottom_text: Option<String>,

    /// Reference to the photo (path or URI); pass "" to remove it
    #[arg(short, long)]
    pub photo: Option<String>,

    /// Background color: palette name (e.g. "tomato") or any color value
    #[arg(short, long)]
    pub color: Option<String>,

    /// Font family (Arial, Courier, Georgia, "Times New Roman", Verdana)
    #[arg(short, long)]
    pub font: Option<String>,
}
