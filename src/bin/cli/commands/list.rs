use anyhow::Result;

use tango_lib::flashcards::collection::search;
use tango_lib::flashcards::Card;

use crate::app::App;
use crate::render::terminal::print_card_table;
use crate::OutputFormat;

/// Print cards as a table or JSON array
pub fn print_cards(
    cards: &[Card],
    empty_message: &str,
    format: &OutputFormat,
    use_color: bool,
) -> Result<()> {
    match format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(cards)?);
        }
        OutputFormat::Plain => {
            if cards.is_empty() {
                println!("{}", empty_message);
                return Ok(());
            }
            print_card_table(cards, use_color);
        }
    }
    Ok(())
}

pub async fn run(
    app: &App,
    genre: Option<&str>,
    query: Option<&str>,
    format: &OutputFormat,
    use_color: bool,
) -> Result<()> {
    let cards = app.cards().await?;
    let matches = search(&cards, query, genre);

    print_cards(&matches, "No cards found.", format, use_color)
}
