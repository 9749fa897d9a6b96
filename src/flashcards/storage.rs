//! Storage operations for flashcards
//!
//! Directory structure:
//! ```text
//! {data-dir}/
//! └── cards.json    # Array of all cards
//! ```

use std::path::{Path, PathBuf};
use std::sync::Mutex;

use async_trait::async_trait;
use thiserror::Error;
use tokio::fs;
use uuid::Uuid;

use super::models::*;

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Card not found: {0}")]
    CardNotFound(Uuid),

    #[error("Invalid card: {0}")]
    InvalidCard(String),

    #[error("Invalid import: {0}")]
    InvalidImport(String),

    #[error("Data directory not found")]
    DataDirNotFound,

    #[error("Card store lock poisoned")]
    Poisoned,
}

pub type Result<T> = std::result::Result<T, StoreError>;

/// The card collection as seen by the quiz engine and the CLI.
///
/// The quiz engine only reads the whole collection and applies partial
/// updates; creation and deletion are used by the management commands.
#[async_trait]
pub trait CardStore: Send + Sync {
    /// Load every card in the collection
    async fn get_all(&self) -> Result<Vec<Card>>;

    /// Merge `update` into the card with `id` and return the stored card
    async fn update_by_id(&self, id: Uuid, update: CardUpdate) -> Result<Card>;

    /// Create a card with a fresh id and zeroed study state
    async fn add(&self, card: NewCard) -> Result<Card>;

    async fn delete(&self, id: Uuid) -> Result<()>;

    async fn delete_all(&self) -> Result<()>;

    /// Upsert cards by id, returning how many were written
    async fn import(&self, cards: Vec<Card>) -> Result<usize>;
}

/// Parse a JSON backup (an array of cards)
pub fn parse_backup(json: &str) -> Result<Vec<Card>> {
    let value: serde_json::Value = serde_json::from_str(json)?;
    if !value.is_array() {
        return Err(StoreError::InvalidImport(
            "expected a JSON array of cards".to_string(),
        ));
    }
    Ok(serde_json::from_value(value)?)
}

fn validate_new(card: &NewCard) -> Result<()> {
    if card.native_text.trim().is_empty() || card.target_text.trim().is_empty() {
        return Err(StoreError::InvalidCard(
            "native and target text are required".to_string(),
        ));
    }
    Ok(())
}

fn validate_import(cards: &[Card]) -> Result<()> {
    if let Some(pos) = cards
        .iter()
        .position(|c| c.native_text.trim().is_empty() || c.target_text.trim().is_empty())
    {
        return Err(StoreError::InvalidImport(format!(
            "card #{} is missing native or target text",
            pos + 1
        )));
    }
    Ok(())
}

fn upsert_all(existing: &mut Vec<Card>, incoming: Vec<Card>) -> usize {
    let count = incoming.len();
    for card in incoming {
        match existing.iter_mut().find(|c| c.id == card.id) {
            Some(slot) => *slot = card,
            None => existing.push(card),
        }
    }
    count
}

fn update_in(cards: &mut [Card], id: Uuid, update: CardUpdate) -> Result<Card> {
    let card = cards
        .iter_mut()
        .find(|c| c.id == id)
        .ok_or(StoreError::CardNotFound(id))?;
    card.apply(update);
    Ok(card.clone())
}

// ==================== JSON file store ====================

/// Card store persisted as a single JSON array on disk
pub struct JsonCardStore {
    data_dir: PathBuf,
    /// Serializes read-modify-write cycles on `cards.json`
    write_lock: tokio::sync::Mutex<()>,
}

impl JsonCardStore {
    pub fn new(data_dir: PathBuf) -> Self {
        Self {
            data_dir,
            write_lock: tokio::sync::Mutex::new(()),
        }
    }

    /// Get the default data directory (e.g., ~/.local/share/tango)
    pub fn default_data_dir() -> Result<PathBuf> {
        dirs::data_local_dir()
            .map(|p| p.join("tango"))
            .ok_or(StoreError::DataDirNotFound)
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    /// Get the cards.json path
    fn cards_path(&self) -> PathBuf {
        self.data_dir.join("cards.json")
    }

    /// Create the data directory and an empty cards.json if missing
    pub async fn init(&self) -> Result<()> {
        fs::create_dir_all(&self.data_dir).await?;

        let cards_path = self.cards_path();
        if !fs::try_exists(&cards_path).await? {
            self.write_cards(&[]).await?;
        }

        Ok(())
    }

    async fn read_cards(&self) -> Result<Vec<Card>> {
        let cards_path = self.cards_path();
        if !fs::try_exists(&cards_path).await? {
            return Ok(Vec::new());
        }

        let content = fs::read_to_string(&cards_path).await?;
        let cards: Vec<Card> = serde_json::from_str(&content)?;
        Ok(cards)
    }

    /// Write to a sibling temp file, then rename over cards.json so readers
    /// only ever see a complete file
    async fn write_cards(&self, cards: &[Card]) -> Result<()> {
        fs::create_dir_all(&self.data_dir).await?;
        let tmp_path = self.data_dir.join("cards.json.tmp");
        fs::write(&tmp_path, serde_json::to_string_pretty(cards)?).await?;
        fs::rename(&tmp_path, self.cards_path()).await?;
        Ok(())
    }
}

#[async_trait]
impl CardStore for JsonCardStore {
    async fn get_all(&self) -> Result<Vec<Card>> {
        self.read_cards().await
    }

    async fn update_by_id(&self, id: Uuid, update: CardUpdate) -> Result<Card> {
        let _guard = self.write_lock.lock().await;
        let mut cards = self.read_cards().await?;
        let updated = update_in(&mut cards, id, update)?;
        self.write_cards(&cards).await?;
        Ok(updated)
    }

    async fn add(&self, card: NewCard) -> Result<Card> {
        validate_new(&card)?;

        let _guard = self.write_lock.lock().await;
        let mut cards = self.read_cards().await?;
        let card = card.into_card();
        cards.push(card.clone());
        self.write_cards(&cards).await?;

        Ok(card)
    }

    async fn delete(&self, id: Uuid) -> Result<()> {
        let _guard = self.write_lock.lock().await;
        let mut cards = self.read_cards().await?;
        let before = cards.len();
        cards.retain(|c| c.id != id);
        if cards.len() == before {
            return Err(StoreError::CardNotFound(id));
        }
        self.write_cards(&cards).await
    }

    async fn delete_all(&self) -> Result<()> {
        let _guard = self.write_lock.lock().await;
        self.write_cards(&[]).await
    }

    async fn import(&self, incoming: Vec<Card>) -> Result<usize> {
        validate_import(&incoming)?;

        let _guard = self.write_lock.lock().await;
        let mut cards = self.read_cards().await?;
        let count = upsert_all(&mut cards, incoming);
        self.write_cards(&cards).await?;

        log::info!("Imported {} cards into {:?}", count, self.cards_path());
        Ok(count)
    }
}

// ==================== In-memory store ====================

/// Card store held entirely in memory
#[derive(Default)]
pub struct MemoryCardStore {
    cards: Mutex<Vec<Card>>,
}

impl MemoryCardStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_cards(cards: Vec<Card>) -> Self {
        Self {
            cards: Mutex::new(cards),
        }
    }

    fn lock(&self) -> Result<std::sync::MutexGuard<'_, Vec<Card>>> {
        self.cards.lock().map_err(|_| StoreError::Poisoned)
    }
}

#[async_trait]
impl CardStore for MemoryCardStore {
    async fn get_all(&self) -> Result<Vec<Card>> {
        Ok(self.lock()?.clone())
    }

    async fn update_by_id(&self, id: Uuid, update: CardUpdate) -> Result<Card> {
        update_in(&mut self.lock()?, id, update)
    }

    async fn add(&self, card: NewCard) -> Result<Card> {
        validate_new(&card)?;
        let card = card.into_card();
        self.lock()?.push(card.clone());
        Ok(card)
    }

    async fn delete(&self, id: Uuid) -> Result<()> {
        let mut cards = self.lock()?;
        let before = cards.len();
        cards.retain(|c| c.id != id);
        if cards.len() == before {
            return Err(StoreError::CardNotFound(id));
        }
        Ok(())
    }

    async fn delete_all(&self) -> Result<()> {
        self.lock()?.clear();
        Ok(())
    }

    async fn import(&self, incoming: Vec<Card>) -> Result<usize> {
        validate_import(&incoming)?;
        let mut cards = self.lock()?;
        Ok(upsert_all(&mut cards, incoming))
    }
}
