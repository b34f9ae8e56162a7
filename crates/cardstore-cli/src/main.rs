use std::process::ExitCode;

use anyhow::{Context, Result, bail};
use cardstore_core::domain::{BackgroundColor, FontFamily, Swatch};
use cardstore_core::impls::FileKeyValueStore;
use cardstore_core::ports::{SystemClock, UlidGenerator};
use cardstore_core::share::ShareMessage;
use cardstore_core::{Card, CardFields, CardId, CardStore, StoreConfig, StoreError};
use clap::Parser;
use tracing_subscriber::EnvFilter;

mod args;
use args::{Cli, Commands, FieldArgs};

type Store = CardStore<FileKeyValueStore, UlidGenerator<SystemClock>>;

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e:#}");
            if let Some(StoreError::CorruptState(_)) = e.downcast_ref::<StoreError>() {
                eprintln!("the saved data was left untouched; fix or move the file and retry");
            }
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> Result<()> {
    let mut config = StoreConfig::from_env();
    if let Some(key) = cli.key {
        config.key = key;
    }
    let store: Store = CardStore::new(
        FileKeyValueStore::new(&cli.data_file),
        UlidGenerator::new(SystemClock),
        config,
    );
    tracing::debug!(path = %cli.data_file.display(), key = %store.config().key, "opening card store");
    // Palette は保存データを読まない
    if !matches!(cli.command, Commands::Palette) {
        store
            .load()
            .await
            .with_context(|| format!("failed to load cards from {}", cli.data_file.display()))?;
    }

    match cli.command {
        Commands::List => {
            let cards = store.list().await?;
            if cli.json {
                println!("{}", serde_json::to_string_pretty(&cards)?);
            } else if cards.is_empty() {
                println!("no saved cards");
            } else {
                for card in &cards {
                    println!("{}  {}", card.id(), card.title);
                }
            }
        }
        Commands::Show { id } => {
            let card = find(&store, &id).await?;
            print_card(&card, cli.json)?;
        }
        Commands::New { fields } => {
            let fields = apply(CardFields::default(), fields)?;
            let card = store.create(fields).await.context("failed to save card")?;
            print_card(&card, cli.json)?;
        }
        Commands::Edit { id, fields } => {
            let current = find(&store, &id).await?;
            let fields = apply(current.fields(), fields)?;
            let card = store
                .update(current.id(), fields)
                .await
                .context("failed to update card")?;
            print_card(&card, cli.json)?;
        }
        Commands::Delete { id } => {
            let removed = store
                .delete(&CardId::new(id.as_str()))
                .await
                .context("failed to delete card")?;
            if removed {
                println!("deleted {id}");
            } else {
                println!("no card with id {id}");
            }
        }
        Commands::Share { id } => {
            let card = find(&store, &id).await?;
            let share = ShareMessage::for_card(&card);
            if cli.json {
                println!("{}", serde_json::to_string_pretty(&share)?);
            } else {
                println!("{}", share.message);
                if let Some(url) = share.url {
                    println!("{url}");
                }
            }
        }
        Commands::Palette => {
            println!("colors:");
            for swatch in Swatch::ALL {
                println!("  {:<12} {}", swatch.name(), swatch.hex());
            }
            println!("fonts:");
            for font in FontFamily::ALL {
                println!("  {font}");
            }
        }
    }
    Ok(())
}

async fn find(store: &Store, id: &str) -> Result<Card> {
    match store.get(&CardId::new(id)).await? {
        Some(card) => Ok(card),
        None => bail!(StoreError::NotFound(CardId::new(id))),
    }
}

/// 指定されたオプションだけを上書きした完全なフィールド一式を作る
fn apply(mut fields: CardFields, args: FieldArgs) -> Result<CardFields> {
    if let Some(title) = args.title {
        fields.title = title;
    }
    if let Some(bottom_text) = args.bottom_text {
        fields.bottom_text = bottom_text;
    }
    if let Some(photo) = args.photo {
        fields.photo = Some(photo);
    }
    if let Some(color) = args.color {
        fields.background_color = BackgroundColor::from_user_input(&color);
    }
    if let Some(font) = args.font {
        fields.font_family = font.parse()?;
    }
    Ok(fields)
}

fn print_card(card: &Card, json: bool) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(card)?);
        return Ok(());
    }
    println!("id:         {}", card.id());
    println!("title:      {}", card.title);
    println!("bottom:     {}", card.bottom_text);
    println!("photo:      {}", card.photo.as_deref().unwrap_or("(none)"));
    let color = match card.background_color.swatch() {
        Some(swatch) => format!("{} ({})", card.background_color, swatch.name()),
        None => card.background_color.to_string(),
    };
    println!("background: {color}");
    println!("font:       {}", card.font_family);
    Ok(())
}
