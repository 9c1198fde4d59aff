//! Shared test doubles for the collaborator boundaries
#![allow(dead_code)]

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;

use viola::news::{Headline, HeadlineRequest, NewsCollaborator, NewsError};
use viola::search::SearchCollaborator;
use viola::voice::{PhraseSource, Speaker, Transcriber};
use viola::{Error, Navigator, Result};

/// Speaker that records everything it is asked to say
#[derive(Clone, Default)]
pub struct RecordingSpeaker {
    lines: Arc<Mutex<Vec<String>>>,
}

impl RecordingSpeaker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn lines(&self) -> Vec<String> {
        self.lines.lock().unwrap().clone()
    }
}

#[async_trait(?Send)]
impl Speaker for RecordingSpeaker {
    async fn say(&mut self, text: &str) -> Result<()> {
        self.lines.lock().unwrap().push(text.to_string());
        Ok(())
    }
}

/// Navigator that records opened URLs instead of launching a browser
#[derive(Clone, Default)]
pub struct RecordingNavigator {
    urls: Arc<Mutex<Vec<String>>>,
}

impl RecordingNavigator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn urls(&self) -> Vec<String> {
        self.urls.lock().unwrap().clone()
    }
}

impl Navigator for RecordingNavigator {
    fn open(&self, url: &str) -> Result<()> {
        self.urls.lock().unwrap().push(url.to_string());
        Ok(())
    }
}

/// Search collaborator that answers with a fixed string and records queries
pub struct StubSearch {
    answer: String,
    queries: Arc<Mutex<Vec<String>>>,
}

impl StubSearch {
    pub fn new(answer: &str) -> Self {
        Self {
            answer: answer.to_string(),
            queries: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub fn queries_handle(&self) -> Arc<Mutex<Vec<String>>> {
        Arc::clone(&self.queries)
    }
}

#[async_trait]
impl SearchCollaborator for StubSearch {
    async fn summary(&self, query: &str) -> String {
        self.queries.lock().unwrap().push(query.to_string());
        self.answer.clone()
    }
}

/// News collaborator that yields one scripted outcome
pub struct StubNews {
    outcome: Mutex<Option<std::result::Result<Vec<Headline>, NewsError>>>,
}

impl StubNews {
    pub fn with_headlines(titles: &[(&str, &str)]) -> Self {
        let headlines = titles
            .iter()
            .enumerate()
            .map(|(i, (title, source))| Headline {
                rank: i + 1,
                title: (*title).to_string(),
                source: (*source).to_string(),
            })
            .collect();
        Self {
            outcome: Mutex::new(Some(Ok(headlines))),
        }
    }

    pub fn failing(error: NewsError) -> Self {
        Self {
            outcome: Mutex::new(Some(Err(error))),
        }
    }
}

#[async_trait]
impl NewsCollaborator for StubNews {
    async fn top_headlines(
        &self,
        _request: &HeadlineRequest,
    ) -> std::result::Result<Vec<Headline>, NewsError> {
        self.outcome
            .lock()
            .unwrap()
            .take()
            .unwrap_or(Err(NewsError::Empty))
    }
}

/// Phrase source that replays scripted utterances as fake audio
///
/// Each entry is `Some(transcript bytes)` or `None` for a silent window.
/// When the script runs out it keeps producing the exit phrase so a
/// runaway loop still terminates.
pub struct ScriptedSource {
    script: VecDeque<Option<Vec<u8>>>,
}

impl ScriptedSource {
    pub fn new(utterances: &[Option<&str>]) -> Self {
        Self {
            script: utterances
                .iter()
                .map(|u| u.map(|s| s.as_bytes().to_vec()))
                .collect(),
        }
    }
}

#[async_trait(?Send)]
impl PhraseSource for ScriptedSource {
    async fn capture_phrase(&mut self, _window: Duration) -> Result<Option<Vec<u8>>> {
        Ok(self
            .script
            .pop_front()
            .unwrap_or_else(|| Some(b"stop listening".to_vec())))
    }
}

/// Transcriber that decodes the scripted fake audio back into text
#[derive(Default)]
pub struct ScriptedTranscriber;

#[async_trait]
impl Transcriber for ScriptedTranscriber {
    async fn transcribe(&self, audio: &[u8]) -> Result<String> {
        String::from_utf8(audio.to_vec()).map_err(|_| Error::Stt("unintelligible".to_string()))
    }
}
