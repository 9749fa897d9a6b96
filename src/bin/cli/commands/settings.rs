use std::path::PathBuf;

use anyhow::{Context, Result};

use tango_lib::quiz::QuizMode;

use crate::app::App;
use crate::OutputFormat;

/// Settings changes requested by `tango-cli config set`
pub struct SettingsChange {
    pub session_size: Option<usize>,
    pub mode: Option<QuizMode>,
    pub data_dir: Option<PathBuf>,
    pub voice_command: Option<String>,
    pub voice_args: Option<Vec<String>>,
    pub voice: Option<String>,
    pub voice_rate: Option<f32>,
    pub voice_lang: Option<String>,
    pub voice_enabled: Option<bool>,
}

pub fn run_show(app: &App, format: &OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&app.settings)?);
        }
        OutputFormat::Plain => {
            println!("# {}", app.settings_path.display());
            println!("# cards: {}", app.store.data_dir().display());
            print!("{}", toml::to_string_pretty(&app.settings)?);
        }
    }
    Ok(())
}

pub fn run_set(app: &App, change: SettingsChange) -> Result<()> {
    let mut settings = app.settings.clone();

    if let Some(size) = change.session_size {
        settings.session_size = size.max(1);
    }
    if let Some(mode) = change.mode {
        settings.default_mode = mode;
    }
    if let Some(dir) = change.data_dir {
        settings.data_dir = Some(dir);
    }
    if let Some(command) = change.voice_command {
        let command = command.trim().to_string();
        settings.voice.command = if command.is_empty() { None } else { Some(command) };
    }
    if let Some(args) = change.voice_args {
        settings.voice.args = args;
    }
    if let Some(voice) = change.voice {
        settings.voice.voice = Some(voice).filter(|v| !v.trim().is_empty());
    }
    if let Some(rate) = change.voice_rate {
        settings.voice.rate = rate.clamp(0.1, 10.0);
    }
    if let Some(lang) = change.voice_lang {
        settings.voice.lang = lang;
    }
    if let Some(enabled) = change.voice_enabled {
        settings.voice.enabled = enabled;
    }

    settings
        .save(&app.settings_path)
        .with_context(|| format!("Failed to save settings to {}", app.settings_path.display()))?;
    println!("Saved settings to {}", app.settings_path.display());
    Ok(())
}
