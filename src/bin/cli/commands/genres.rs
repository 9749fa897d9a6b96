use anyhow::Result;
use serde_json::json;

use tango_lib::flashcards::collection::genre_counts;

use crate::app::App;
use crate::OutputFormat;

pub async fn run(app: &App, format: &OutputFormat) -> Result<()> {
    let mut genres = genre_counts(&app.cards().await?);
    // Biggest genres first, ties by name
    genres.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));

    if let OutputFormat::Json = format {
        let entries: Vec<_> = genres
            .iter()
            .map(|(genre, count)| json!({ "genre": genre, "cards": count }))
            .collect();
        println!("{}", serde_json::to_string_pretty(&entries)?);
        return Ok(());
    }

    if genres.is_empty() {
        println!("No genres yet. Add one with `tango-cli add ... --genre NAME`.");
        return Ok(());
    }

    let width = genres
        .iter()
        .map(|(genre, _)| genre.chars().count())
        .chain(std::iter::once("Genre".len()))
        .max()
        .unwrap_or_default();

    println!("{:<width$}  Cards", "Genre");
    for (genre, count) in &genres {
        println!("{:<width$}  {:>5}", genre, count);
    }

    Ok(())
}
