use anyhow::Result;

use tango_lib::flashcards::collection::collection_stats;

use crate::app::App;
use crate::OutputFormat;

pub async fn run(app: &App, format: &OutputFormat) -> Result<()> {
    let stats = collection_stats(&app.cards().await?);

    match format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&stats)?);
        }
        OutputFormat::Plain => {
            println!("Cards:      {}", stats.total_cards);
            println!("Genres:     {}", stats.genres);
            println!("Weak:       {}", stats.weak_cards);
            println!("Favourites: {}", stats.favorite_cards);
            println!("Data:       {}", app.store.data_dir().display());
        }
    }

    Ok(())
}
