use std::path::Path;

use anyhow::{Context, Result};

use tango_lib::flashcards::storage::parse_backup;
use tango_lib::flashcards::CardStore;

use crate::app::App;
use crate::OutputFormat;

pub async fn run_import(app: &App, file: &Path, format: &OutputFormat) -> Result<()> {
    let content = tokio::fs::read_to_string(file)
        .await
        .with_context(|| format!("Failed to read {}", file.display()))?;
    let cards = parse_backup(&content).context("Failed to parse backup")?;
    let count = app.store.import(cards).await.context("Failed to import cards")?;

    match format {
        OutputFormat::Json => {
            println!("{}", serde_json::json!({ "imported": count }));
        }
        OutputFormat::Plain => {
            println!("Imported {} cards from {}", count, file.display());
        }
    }

    Ok(())
}

pub async fn run_export(app: &App, file: Option<&Path>) -> Result<()> {
    let cards = app.cards().await?;
    let json = serde_json::to_string_pretty(&cards)?;

    match file {
        Some(path) => {
            tokio::fs::write(path, json)
                .await
                .with_context(|| format!("Failed to write {}", path.display()))?;
            eprintln!("Exported {} cards to {}", cards.len(), path.display());
        }
        None => println!("{}", json),
    }

    Ok(())
}
