//! Viola - voice-activated personal assistant
//!
//! Listens for a wake word, transcribes the follow-up utterance, and
//! dispatches it through a small command interpreter:
//!
//! ```text
//! ┌──────────────────────────────────────────────────┐
//! │                  Listen loop                      │
//! │  capture ──▶ transcribe ──▶ wake/exit decision    │
//! └───────────────────────┬──────────────────────────┘
//!                         │ (awake)
//! ┌───────────────────────▼──────────────────────────┐
//! │              Command interpreter                  │
//! │  ordered intent rules ──▶ one action              │
//! └───────────────────────┬──────────────────────────┘
//!                         │
//! ┌───────────────────────▼──────────────────────────┐
//! │   Collaborators: search │ news │ catalog │ TTS    │
//! └──────────────────────────────────────────────────┘
//! ```
//!
//! All external services (STT, TTS, search, news) are black boxes behind
//! trait seams; every failure comes back as speakable text.

pub mod assistant;
pub mod browser;
pub mod catalog;
pub mod config;
pub mod error;
pub mod intent;
pub mod interpreter;
pub mod news;
pub mod search;
pub mod voice;

pub use assistant::Assistant;
pub use browser::{Navigator, SystemBrowser};
pub use catalog::{SongCatalog, SongEntry};
pub use config::{ApiKeys, Config, ListenConfig, SiteLinks, VoiceConfig};
pub use error::{Error, Result};
pub use intent::{Intent, Site, classify};
pub use interpreter::{Action, CommandInterpreter};
pub use news::{Headline, HeadlineRequest, NewsClient, NewsCollaborator, NewsError};
pub use search::{SearchClient, SearchCollaborator, SearchError};
pub use voice::{
    AudioCapture, AudioPlayback, ConsoleSpeaker, PhraseSource, SpeechToText, Speaker,
    TextToSpeech, Transcriber, VoiceOutput, WakeDecision, WakeGate,
};
