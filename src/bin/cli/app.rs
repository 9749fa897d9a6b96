use std::path::PathBuf;

use anyhow::{Context, Result};

use tango_lib::config::Settings;
use tango_lib::flashcards::collection::find_by_id_prefix;
use tango_lib::flashcards::{Card, CardStore, JsonCardStore};
use tango_lib::speech::{speaker_from_settings, Speaker};

/// Shared application state for CLI commands
pub struct App {
    pub settings: Settings,
    pub settings_path: PathBuf,
    pub store: JsonCardStore,
    pub speaker: Box<dyn Speaker>,
}

impl App {
    /// Load settings and open the card store
    pub async fn new(config_path: Option<PathBuf>, data_dir: Option<PathBuf>) -> Result<Self> {
        let settings_path = match config_path {
            Some(path) => path,
            None => Settings::default_path().context("Failed to get config directory")?,
        };
        let settings = Settings::load(&settings_path)
            .with_context(|| format!("Failed to load settings from {}", settings_path.display()))?;

        let data_dir = match data_dir {
            Some(dir) => dir,
            None => settings.data_dir().context("Failed to get data directory")?,
        };

        let store = JsonCardStore::new(data_dir);
        store.init().await.context("Failed to initialize card storage")?;

        let speaker = speaker_from_settings(&settings.voice);

        Ok(Self {
            settings,
            settings_path,
            store,
            speaker,
        })
    }

    /// All cards in the collection
    pub async fn cards(&self) -> Result<Vec<Card>> {
        self.store.get_all().await.context("Failed to load cards")
    }

    /// Find a card by id or unambiguous id prefix
    pub async fn find_card(&self, id: &str) -> Result<Card> {
        let cards = self.cards().await?;
        let card = find_by_id_prefix(&cards, id)?;
        Ok(card.clone())
    }

    pub fn speaker(&self) -> &dyn Speaker {
        self.speaker.as_ref()
    }
}
