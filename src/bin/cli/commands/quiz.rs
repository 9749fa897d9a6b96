use std::io::{self, BufRead, Write};

use anyhow::Result;

use tango_lib::quiz::{
    start_session, Hint, QuizError, QuizFilter, QuizMode, QuizRequest, QuizSession, SessionSummary,
    SystemClock,
};
use tango_lib::speech::perform;

use crate::app::App;
use crate::render::terminal::{paint, Color};
use crate::OutputFormat;

/// How a single session ended
enum Outcome {
    Finished,
    Quit,
}

/// Read one trimmed, lowercased line; `None` on end of input
fn read_key(prompt: &str) -> Result<Option<String>> {
    print!("{}", prompt);
    io::stdout().flush()?;

    let mut line = String::new();
    if io::stdin().lock().read_line(&mut line)? == 0 {
        return Ok(None);
    }
    Ok(Some(line.trim().to_lowercase()))
}

pub async fn run(
    app: &App,
    filter: QuizFilter,
    mode: Option<QuizMode>,
    size: Option<usize>,
    format: &OutputFormat,
    use_color: bool,
) -> Result<()> {
    let mut request = QuizRequest::new(filter, mode.unwrap_or(app.settings.default_mode))
        .with_size(size.unwrap_or(app.settings.session_size));
    let mut rng = rand::thread_rng();

    loop {
        let mut session = match start_session(&app.store, request, &mut rng).await {
            Ok(session) => session,
            Err(QuizError::EmptyPool { filter }) => {
                println!("No cards to study for '{}'. Pick another selection.", filter);
                return Ok(());
            }
            Err(e) => return Err(e.into()),
        };

        if let Outcome::Quit = run_session(app, &mut session, use_color).await? {
            let (answered, total) = session.progress();
            println!("\nQuiz stopped after {} of {} cards.", answered, total);
            return Ok(());
        }

        let summary = session.summary()?;
        print_summary(&summary, format, use_color)?;

        match read_key("\n[r] replay this set, [Enter] exit: ")?.as_deref() {
            Some("r") => request = session.replay_request(),
            _ => return Ok(()),
        }
    }
}

async fn run_session(app: &App, session: &mut QuizSession, use_color: bool) -> Result<Outcome> {
    let clock = SystemClock;

    while !session.is_complete() {
        let prompt = session.prompt()?;
        perform(&prompt.effects, app.speaker());

        let star = if prompt.favorite { " \u{2605}" } else { "" };
        println!(
            "\n{} {}{}",
            paint(&format!("[{}/{}]", prompt.position, prompt.total), Color::GRAY, use_color),
            paint(&prompt.text, Color::BOLD, use_color),
            star
        );

        // Unrevealed: wait for the reveal
        loop {
            match read_key("[Enter] answer, [h] hint, [f] favourite, [q] quit: ")?.as_deref() {
                None | Some("q") => return Ok(Outcome::Quit),
                Some("h") => match session.hint() {
                    Ok(Hint::Answer(text)) => println!("  Hint: {}", text),
                    Ok(Hint::Pronunciation(Some(text))) => println!("  Hint: {}", text),
                    Ok(Hint::Pronunciation(None)) => println!("  Hint: no pronunciation recorded"),
                    Err(e) => println!("  {}", e),
                },
                Some("f") => toggle_favorite(app, session).await,
                Some("") | Some("a") => break,
                Some(other) => println!("  Unknown key '{}'", other),
            }
        }

        let reveal = session.reveal()?;
        println!("  {}", paint(&reveal.answer, Color::CYAN, use_color));
        if let Some(pronunciation) = &reveal.pronunciation {
            println!("  {}", paint(pronunciation, Color::GRAY, use_color));
        }
        if let Some(memo) = &reveal.memo {
            println!("  Memo: {}", memo);
        }
        perform(&reveal.effects, app.speaker());

        // Revealed: wait for the judgement
        let correct = loop {
            match read_key("[y] correct, [n] wrong, [s] speak, [f] favourite, [q] quit: ")?.as_deref() {
                None | Some("q") => return Ok(Outcome::Quit),
                Some("y") => break true,
                Some("n") => break false,
                Some("s") => {
                    let card = session.current_card()?;
                    if let Err(e) = app.speaker().speak(&card.target_text) {
                        println!("  {}", e);
                    }
                }
                Some("f") => toggle_favorite(app, session).await,
                Some(other) => println!("  Unknown key '{}'", other),
            }
        };

        let judgement = session.judge(&app.store, &clock, correct).await?;
        if let Some(e) = judgement.persistence_error {
            eprintln!(
                "{}",
                paint(&format!("  Warning: answer not saved: {}", e), Color::YELLOW, use_color)
            );
        }
    }

    Ok(Outcome::Finished)
}

async fn toggle_favorite(app: &App, session: &mut QuizSession) {
    match session.toggle_favorite(&app.store).await {
        Ok(true) => println!("  \u{2605} Added to favourites"),
        Ok(false) => println!("  \u{2606} Removed from favourites"),
        Err(e) => println!("  {}", e),
    }
}

fn print_summary(summary: &SessionSummary, format: &OutputFormat, use_color: bool) -> Result<()> {
    match format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(summary)?);
        }
        OutputFormat::Plain => {
            let color = if summary.percent >= 80 { Color::GREEN } else { Color::YELLOW };
            println!(
                "\n{}  {} correct, {} wrong",
                paint(&format!("{}%", summary.percent), color, use_color),
                summary.correct,
                summary.total - summary.correct
            );

            if !summary.wrong_cards.is_empty() {
                println!("\nReview these:");
                for card in &summary.wrong_cards {
                    let pronunciation = card.pronunciation.as_deref().unwrap_or("");
                    println!(
                        "  {} \u{2192} {} {}",
                        card.native_text,
                        paint(&card.target_text, Color::CYAN, use_color),
                        paint(pronunciation, Color::GRAY, use_color)
                    );
                }
            }
        }
    }
    Ok(())
}
