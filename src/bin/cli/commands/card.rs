use anyhow::{bail, Context, Result};

use tango_lib::flashcards::{Card, CardStore, CardUpdate, NewCard};

use crate::app::App;
use crate::OutputFormat;

/// Field changes requested by `tango-cli edit`
pub struct CardEdit {
    pub native: Option<String>,
    pub target: Option<String>,
    pub pronunciation: Option<String>,
    pub genre: Option<String>,
    pub memo: Option<String>,
}

impl CardEdit {
    fn into_update(self) -> Result<CardUpdate> {
        let required = |value: Option<String>, name: &str| -> Result<Option<String>> {
            match value.map(|v| v.trim().to_string()) {
                Some(v) if v.is_empty() => bail!("{} text cannot be empty", name),
                other => Ok(other),
            }
        };
        // An empty string clears an optional field
        let optional = |value: Option<String>| {
            value.map(|v| {
                let v = v.trim().to_string();
                if v.is_empty() { None } else { Some(v) }
            })
        };

        Ok(CardUpdate {
            native_text: required(self.native, "Native")?,
            target_text: required(self.target, "Target")?,
            pronunciation: optional(self.pronunciation),
            genre: optional(self.genre),
            memo: optional(self.memo),
            ..Default::default()
        })
    }
}

fn print_card(card: &Card, verb: &str, format: &OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(card)?);
        }
        OutputFormat::Plain => {
            println!("{} \"{}\" \u{2192} \"{}\"", verb, card.native_text, card.target_text);
            if let Some(genre) = &card.genre {
                println!("  Genre: {}", genre);
            }
            println!("  ID: {}", card.id);
        }
    }
    Ok(())
}

pub async fn run_add(
    app: &App,
    native: String,
    target: String,
    pronunciation: Option<String>,
    genre: Option<String>,
    memo: Option<String>,
    format: &OutputFormat,
) -> Result<()> {
    let new_card = NewCard {
        native_text: native,
        target_text: target,
        pronunciation,
        genre,
        memo,
    };

    let card = app.store.add(new_card).await.context("Failed to add card")?;
    print_card(&card, "Added", format)
}

pub async fn run_edit(app: &App, id: &str, edit: CardEdit, format: &OutputFormat) -> Result<()> {
    let card = app.find_card(id).await?;
    let update = edit.into_update()?;
    if update.is_empty() {
        bail!("Nothing to change. Pass at least one of --native, --target, --pronunciation, --genre, --memo");
    }

    let card = app
        .store
        .update_by_id(card.id, update)
        .await
        .context("Failed to update card")?;
    print_card(&card, "Updated", format)
}

pub async fn run_delete(app: &App, id: &str) -> Result<()> {
    let card = app.find_card(id).await?;
    app.store.delete(card.id).await.context("Failed to delete card")?;
    println!("Deleted \"{}\"", card.native_text);
    Ok(())
}

pub async fn run_erase(app: &App, yes: bool) -> Result<()> {
    if !yes {
        bail!("This deletes every card and cannot be undone. Re-run with --yes to confirm.");
    }

    let count = app.cards().await?.len();
    app.store.delete_all().await.context("Failed to erase cards")?;
    println!("Deleted {} cards", count);
    Ok(())
}
