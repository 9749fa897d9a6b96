use anyhow::{Context, Result};

use tango_lib::flashcards::collection::{favorite_cards, toggle_favorite};

use crate::app::App;
use crate::commands::list::print_cards;
use crate::OutputFormat;

pub async fn run_toggle(app: &App, id: &str, format: &OutputFormat) -> Result<()> {
    let card = app.find_card(id).await?;
    let favorite = toggle_favorite(&app.store, card.id)
        .await
        .context("Failed to update favourite")?;

    match format {
        OutputFormat::Json => {
            let output = serde_json::json!({
                "id": card.id.to_string(),
                "favorite": favorite,
            });
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
        OutputFormat::Plain => {
            let state = if favorite { "added to" } else { "removed from" };
            println!("\"{}\" {} favourites", card.native_text, state);
        }
    }

    Ok(())
}

pub async fn run_list(app: &App, format: &OutputFormat, use_color: bool) -> Result<()> {
    let cards = favorite_cards(&app.cards().await?);
    print_cards(&cards, "No favourite cards.", format, use_color)
}
