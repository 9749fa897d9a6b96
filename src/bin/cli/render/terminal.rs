use tango_lib::flashcards::Card;

/// ANSI color codes
#[allow(dead_code)]
pub struct Color;

#[allow(dead_code)]
impl Color {
    pub const RESET: &'static str = "\x1b[0m";
    pub const BOLD: &'static str = "\x1b[1m";
    pub const DIM: &'static str = "\x1b[2m";
    pub const RED: &'static str = "\x1b[31m";
    pub const GREEN: &'static str = "\x1b[32m";
    pub const YELLOW: &'static str = "\x1b[33m";
    pub const CYAN: &'static str = "\x1b[36m";
    pub const GRAY: &'static str = "\x1b[90m";
}

/// Wrap `text` in a color code when color output is on
pub fn paint(text: &str, color: &str, use_color: bool) -> String {
    if use_color {
        format!("{}{}{}", color, text, Color::RESET)
    } else {
        text.to_string()
    }
}

/// Shorten to `width` characters, marking the cut with "..."
pub fn truncate(text: &str, width: usize) -> String {
    if text.chars().count() <= width {
        return text.to_string();
    }
    let keep = width.saturating_sub(3);
    format!("{}...", text.chars().take(keep).collect::<String>())
}

/// Truncate and left-align `text` in a column of `width` characters
fn pad(text: &str, width: usize) -> String {
    let text = truncate(text, width);
    let fill = width.saturating_sub(text.chars().count());
    format!("{}{}", text, " ".repeat(fill))
}

/// Print cards as a table: id prefix, native, target, genre, mistakes
pub fn print_card_table(cards: &[Card], use_color: bool) {
    let native_width = column_width(cards.iter().map(|c| c.native_text.as_str()), 6, 24);
    let target_width = column_width(cards.iter().map(|c| c.target_text.as_str()), 6, 24);
    let genre_width = column_width(cards.iter().filter_map(|c| c.genre.as_deref()), 5, 20);

    println!(
        "{} {} {} {} {} {}",
        pad("Id", 8),
        pad("Native", native_width),
        pad("Target", target_width),
        pad("Genre", genre_width),
        "Miss",
        "Fav"
    );
    println!(
        "{} {} {} {} {} {}",
        "\u{2500}".repeat(8),
        "\u{2500}".repeat(native_width),
        "\u{2500}".repeat(target_width),
        "\u{2500}".repeat(genre_width),
        "\u{2500}".repeat(4),
        "\u{2500}".repeat(3)
    );

    for card in cards {
        let id = card.id.to_string();
        let misses = if card.wrong_count > 0 {
            paint(&format!("{:<4}", card.wrong_count), Color::RED, use_color)
        } else {
            format!("{:<4}", "")
        };
        let favorite = if card.favorite {
            paint("\u{2605}", Color::YELLOW, use_color)
        } else {
            String::new()
        };

        println!(
            "{} {} {} {} {} {}",
            paint(&id[..8], Color::GRAY, use_color),
            pad(&card.native_text, native_width),
            pad(&card.target_text, target_width),
            pad(card.genre.as_deref().unwrap_or("-"), genre_width),
            misses,
            favorite
        );
    }

    println!("\n{} cards total", cards.len());
}

fn column_width<'a>(values: impl Iterator<Item = &'a str>, min: usize, max: usize) -> usize {
    values
        .map(|v| v.chars().count())
        .max()
        .unwrap_or(min)
        .clamp(min, max)
}
