//! Voice processing module
//!
//! Audio capture, wake word decisions, STT, TTS, and playback. The traits
//! here are the collaborator boundaries: the listen loop and interpreter
//! only ever see [`PhraseSource`], [`Transcriber`], and [`Speaker`].

mod capture;
mod playback;
mod stt;
mod tts;
mod wake;

use std::time::Duration;

use async_trait::async_trait;

use crate::Result;

pub use capture::{AudioCapture, SAMPLE_RATE, rms_level, samples_to_wav};
pub use playback::AudioPlayback;
pub use stt::SpeechToText;
pub use tts::TextToSpeech;
pub use wake::{WakeDecision, WakeGate};

/// Captures one bounded phrase of audio as WAV bytes
///
/// `Ok(None)` means the window passed without any speech.
#[async_trait(?Send)]
pub trait PhraseSource {
    /// Capture a phrase, waiting at most `window`
    ///
    /// # Errors
    ///
    /// Returns error if the audio device fails
    async fn capture_phrase(&mut self, window: Duration) -> Result<Option<Vec<u8>>>;

    /// Measure ambient noise for `duration`; no-op by default
    ///
    /// # Errors
    ///
    /// Returns error if the audio device fails
    async fn calibrate(&mut self, duration: Duration) -> Result<()> {
        let _ = duration;
        Ok(())
    }
}

/// Turns WAV audio into a transcript
#[async_trait]
pub trait Transcriber: Send + Sync {
    /// Transcribe WAV bytes
    ///
    /// # Errors
    ///
    /// Returns error if the speech could not be recognized
    async fn transcribe(&self, audio: &[u8]) -> Result<String>;
}

/// Speaks text out loud
#[async_trait(?Send)]
pub trait Speaker {
    /// Speak `text`, returning once it has been delivered
    ///
    /// # Errors
    ///
    /// Returns error if synthesis or playback fails
    async fn say(&mut self, text: &str) -> Result<()>;
}

/// Speaker backed by TTS synthesis and speaker playback
pub struct VoiceOutput {
    tts: TextToSpeech,
    playback: AudioPlayback,
}

impl VoiceOutput {
    /// Combine a TTS client and a playback device
    #[must_use]
    pub fn new(tts: TextToSpeech, playback: AudioPlayback) -> Self {
        Self { tts, playback }
    }
}

#[async_trait(?Send)]
impl Speaker for VoiceOutput {
    async fn say(&mut self, text: &str) -> Result<()> {
        tracing::info!(text, "speaking");
        let audio = self.tts.synthesize(text).await?;
        self.playback.play_mp3(&audio).await
    }
}

/// Speaker that prints to stdout, for headless use and diagnostics
#[derive(Debug, Default, Clone, Copy)]
pub struct ConsoleSpeaker;

#[async_trait(?Send)]
impl Speaker for ConsoleSpeaker {
    async fn say(&mut self, text: &str) -> Result<()> {
        println!("{text}");
        Ok(())
    }
}
