//! Text-to-speech playback for quiz effects
//!
//! Speech is fire-and-forget: a new utterance interrupts the previous one,
//! and failures are logged rather than interrupting the quiz.

use std::process::{Child, Command, Stdio};
use std::sync::Mutex;

use thiserror::Error;

use crate::config::VoiceSettings;
use crate::quiz::SessionEffect;

#[derive(Error, Debug)]
pub enum SpeechError {
    #[error("Failed to start speech command '{command}': {source}")]
    Spawn {
        command: String,
        #[source]
        source: std::io::Error,
    },
}

pub type Result<T> = std::result::Result<T, SpeechError>;

pub trait Speaker: Send + Sync {
    fn speak(&self, text: &str) -> Result<()>;
}

/// Speaker that stays quiet
#[derive(Debug, Default)]
pub struct SilentSpeaker;

impl Speaker for SilentSpeaker {
    fn speak(&self, text: &str) -> Result<()> {
        log::debug!("Speech disabled, skipping: {}", text);
        Ok(())
    }
}

/// Speaks by running an external program (espeak-ng, say, ...).
///
/// Arguments may contain `{voice}`, `{rate}` and `{lang}` placeholders; the
/// text is passed as the final argument.
pub struct CommandSpeaker {
    command: String,
    args: Vec<String>,
    voice: String,
    rate: f32,
    lang: String,
    current: Mutex<Option<Child>>,
}

impl CommandSpeaker {
    pub fn new(command: String, settings: &VoiceSettings) -> Self {
        Self {
            command,
            args: settings.args.clone(),
            voice: settings.voice.clone().unwrap_or_default(),
            rate: settings.rate,
            lang: settings.lang.clone(),
            current: Mutex::new(None),
        }
    }

    fn expand(&self, arg: &str) -> String {
        arg.replace("{voice}", &self.voice)
            .replace("{rate}", &self.rate.to_string())
            .replace("{lang}", &self.lang)
    }

    /// Full argument list for speaking `text`
    pub fn command_args(&self, text: &str) -> Vec<String> {
        let mut args: Vec<String> = self.args.iter().map(|a| self.expand(a)).collect();
        args.push(text.to_string());
        args
    }

    /// Stop the utterance that is still playing, if any
    fn cancel(&self, current: &mut Option<Child>) {
        if let Some(mut child) = current.take() {
            if let Ok(None) = child.try_wait() {
                let _ = child.kill();
            }
            let _ = child.wait();
        }
    }
}

impl Drop for CommandSpeaker {
    /// Let the last utterance finish and reap it
    fn drop(&mut self) {
        let current = match self.current.get_mut() {
            Ok(current) => current,
            Err(poisoned) => poisoned.into_inner(),
        };
        if let Some(mut child) = current.take() {
            if let Err(e) = child.wait() {
                log::debug!("Failed to wait for speech command: {}", e);
            }
        }
    }
}

impl Speaker for CommandSpeaker {
    fn speak(&self, text: &str) -> Result<()> {
        let mut current = match self.current.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        self.cancel(&mut current);

        let child = Command::new(&self.command)
            .args(self.command_args(text))
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn()
            .map_err(|source| SpeechError::Spawn {
                command: self.command.clone(),
                source,
            })?;

        *current = Some(child);
        Ok(())
    }
}

/// Build the speaker described by the voice settings
pub fn speaker_from_settings(settings: &VoiceSettings) -> Box<dyn Speaker> {
    match (&settings.command, settings.enabled) {
        (Some(command), true) if !command.trim().is_empty() => {
            Box::new(CommandSpeaker::new(command.trim().to_string(), settings))
        }
        _ => Box::new(SilentSpeaker),
    }
}

/// Run the effects returned by the quiz engine
pub fn perform(effects: &[SessionEffect], speaker: &dyn Speaker) {
    for effect in effects {
        match effect {
            SessionEffect::Speak { text } => {
                if let Err(e) = speaker.speak(text) {
                    log::warn!("{}", e);
                }
            }
        }
    }
}
