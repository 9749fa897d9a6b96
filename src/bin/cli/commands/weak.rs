use anyhow::{Context, Result};

use tango_lib::flashcards::collection::{reset_weak, weak_cards};

use crate::app::App;
use crate::commands::list::print_cards;
use crate::OutputFormat;

pub async fn run(app: &App, reset: bool, format: &OutputFormat, use_color: bool) -> Result<()> {
    if reset {
        let count = reset_weak(&app.store)
            .await
            .context("Failed to reset mistake counts")?;

        match format {
            OutputFormat::Json => {
                println!("{}", serde_json::json!({ "reset": count }));
            }
            OutputFormat::Plain => {
                println!("Reset mistake count on {} cards", count);
            }
        }
        return Ok(());
    }

    let cards = weak_cards(&app.cards().await?);
    print_cards(&cards, "No cards with mistakes.", format, use_color)
}
