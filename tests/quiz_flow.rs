use std::collections::HashSet;

use chrono::{TimeZone, Utc};
use rand::rngs::StdRng;
use rand::SeedableRng;
use tempfile::TempDir;

use tango_lib::flashcards::collection::weak_cards;
use tango_lib::flashcards::{CardStore, JsonCardStore, NewCard};
use tango_lib::quiz::{
    start_session, FixedClock, QuizError, QuizFilter, QuizMode, QuizRequest, SessionState,
};

async fn seeded_store(temp: &TempDir) -> JsonCardStore {
    let store = JsonCardStore::new(temp.path().join("tango"));
    store.init().await.unwrap();

    let words = [
        ("こんにちは", "สวัสดี", "greeting"),
        ("ありがとう", "ขอบคุณ", "greeting, basics"),
        ("水", "น้ำ", "food"),
        ("ご飯", "ข้าว", "food"),
        ("猫", "แมว", "animals"),
    ];
    for (native, target, genre) in words {
        let mut card = NewCard::new(native, target);
        card.genre = Some(genre.to_string());
        store.add(card).await.unwrap();
    }
    store
}

#[tokio::test]
async fn full_session_feeds_mistakes_back_into_the_store() {
    let temp = TempDir::new().unwrap();
    let store = seeded_store(&temp).await;
    let clock = FixedClock(Utc.with_ymd_and_hms(2026, 5, 4, 12, 0, 0).unwrap());
    let mut rng = StdRng::seed_from_u64(99);

    let request = QuizRequest::new(QuizFilter::All, QuizMode::NativeToTarget).with_size(4);
    let mut session = start_session(&store, request, &mut rng).await.unwrap();
    assert_eq!(session.progress(), (0, 4));

    let ids: HashSet<_> = session.cards().iter().map(|c| c.id).collect();
    assert_eq!(ids.len(), 4);

    // Miss every other card
    let mut turn = 0;
    while !session.is_complete() {
        session.reveal().unwrap();
        let judgement = session.judge(&store, &clock, turn % 2 == 0).await.unwrap();
        assert!(judgement.persistence_error.is_none());
        turn += 1;
    }

    assert_eq!(session.state(), SessionState::Complete);
    let summary = session.summary().unwrap();
    assert_eq!(summary.correct, 2);
    assert_eq!(summary.total, 4);
    assert_eq!(summary.percent, 50);
    assert_eq!(summary.correct + summary.wrong_cards.len(), summary.total);

    // A reload after the session reflects every judgement
    let reloaded = store.get_all().await.unwrap();
    let weak = weak_cards(&reloaded);
    assert_eq!(weak.len(), 2);
    let missed: HashSet<_> = summary.wrong_cards.iter().map(|c| c.id).collect();
    assert!(weak.iter().all(|c| missed.contains(&c.id) && c.wrong_count == 1));

    let answered = reloaded.iter().filter(|c| c.last_answered.is_some()).count();
    assert_eq!(answered, 4);

    // Replaying the weak set only draws the missed cards
    let replay = QuizRequest::new(QuizFilter::Weak, session.mode());
    let weak_session = start_session(&store, replay, &mut rng).await.unwrap();
    let drawn: HashSet<_> = weak_session.cards().iter().map(|c| c.id).collect();
    assert_eq!(drawn, missed);
}

#[tokio::test]
async fn genre_and_empty_selections() {
    let temp = TempDir::new().unwrap();
    let store = seeded_store(&temp).await;
    let mut rng = StdRng::seed_from_u64(5);

    let greeting = QuizRequest::new(QuizFilter::from("greeting"), QuizMode::TargetToNative);
    let session = start_session(&store, greeting, &mut rng).await.unwrap();
    assert_eq!(session.cards().len(), 2);

    let favorites = QuizRequest::new(QuizFilter::Favorites, QuizMode::NativeToTarget);
    let result = start_session(&store, favorites, &mut rng).await;
    assert!(matches!(result, Err(QuizError::EmptyPool { .. })));
}
