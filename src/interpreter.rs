//! Command interpreter
//!
//! Turns a transcript into exactly one [`Action`] and executes it. Each
//! action produces at most one spoken response (the news action speaks a
//! short sequence) and at most one browser navigation. Collaborator
//! failures surface as spoken text; nothing here escalates past the loop.

use crate::browser::Navigator;
use crate::catalog::SongCatalog;
use crate::config::SiteLinks;
use crate::intent::{self, Intent};
use crate::news::{HeadlineRequest, NewsCollaborator};
use crate::search::SearchCollaborator;
use crate::voice::Speaker;
use crate::Result;

/// Spoken when nothing in the transcript was usable
const NOT_UNDERSTOOD: &str = "I didn't understand that command";

/// What executing a transcript will do
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// Announce and open a fixed site
    OpenSite {
        /// Spoken announcement
        message: String,
        /// Destination URL
        url: String,
    },
    /// Speak the current local time
    ReportTime,
    /// Speak the self-introduction
    Introduce,
    /// Announce and open a catalog song
    PlaySong {
        /// Song name as extracted from the transcript
        name: String,
        /// Resolved playable URL
        url: String,
    },
    /// Apologize for an unknown song, listing the catalog
    SongNotFound {
        /// The name that failed to resolve
        name: String,
    },
    /// Speak the full catalog listing
    ListSongs,
    /// Fetch and speak the top headlines
    ReportNews,
    /// Delegate to the search collaborator and speak its answer
    Search {
        /// Query text sent to the collaborator
        query: String,
    },
    /// Speak the not-understood message
    Unrecognized,
}

/// Classifies transcripts and runs the resulting actions
pub struct CommandInterpreter {
    catalog: SongCatalog,
    sites: SiteLinks,
    search: Box<dyn SearchCollaborator>,
    news: Box<dyn NewsCollaborator>,
}

impl CommandInterpreter {
    /// Create an interpreter over its collaborators
    #[must_use]
    pub fn new(
        catalog: SongCatalog,
        sites: SiteLinks,
        search: Box<dyn SearchCollaborator>,
        news: Box<dyn NewsCollaborator>,
    ) -> Self {
        Self {
            catalog,
            sites,
            search,
            news,
        }
    }

    /// Derive the single action for a transcript
    ///
    /// Pure apart from the catalog lookup; no side effects happen here.
    #[must_use]
    pub fn interpret(&self, transcript: &str) -> Action {
        match intent::classify(transcript) {
            Intent::OpenSite(site) => {
                let url = match site {
                    intent::Site::Google => &self.sites.google,
                    intent::Site::Youtube => &self.sites.youtube,
                    intent::Site::Github => &self.sites.github,
                };
                Action::OpenSite {
                    message: site.announcement().to_string(),
                    url: url.clone(),
                }
            }
            Intent::ReportTime => Action::ReportTime,
            Intent::Introduce => Action::Introduce,
            Intent::PlaySong(name) => match self.catalog.resolve(&name) {
                Some(url) => Action::PlaySong {
                    name,
                    url: url.to_string(),
                },
                None => Action::SongNotFound { name },
            },
            Intent::PlayList => Action::ListSongs,
            Intent::ReportNews => Action::ReportNews,
            Intent::DistanceQuery {
                origin,
                destination,
            } => Action::Search {
                query: format!("distance from {origin} to {destination}"),
            },
            Intent::GenericSearch(text) => Action::Search { query: text },
            Intent::Unrecognized => Action::Unrecognized,
        }
    }

    /// Execute an action: speak, and navigate when called for
    ///
    /// # Errors
    ///
    /// Returns error only if speaking fails; navigation and collaborator
    /// failures are reported through speech
    pub async fn execute<S: Speaker, N: Navigator>(
        &self,
        action: Action,
        speaker: &mut S,
        navigator: &N,
    ) -> Result<()> {
        match action {
            Action::OpenSite { message, url } => {
                speaker.say(&message).await?;
                navigate(navigator, &url);
            }
            Action::ReportTime => {
                let time = chrono::Local::now().format("%I:%M %p");
                speaker.say(&format!("The time is {time}")).await?;
            }
            Action::Introduce => {
                speaker.say("I am Viola, your AI assistant").await?;
            }
            Action::PlaySong { name, url } => {
                speaker.say(&format!("Playing {name}")).await?;
                navigate(navigator, &url);
            }
            Action::SongNotFound { name } => {
                speaker
                    .say(&format!(
                        "Sorry, I don't have {name} in my library. Available songs are: {}",
                        self.catalog.names_joined()
                    ))
                    .await?;
            }
            Action::ListSongs => {
                speaker
                    .say(&format!(
                        "Available songs are: {}",
                        self.catalog.names_joined()
                    ))
                    .await?;
            }
            Action::ReportNews => {
                speaker
                    .say("Fetching the latest news from India. Please wait...")
                    .await?;
                match self.news.top_headlines(&HeadlineRequest::default()).await {
                    Ok(headlines) => {
                        for headline in &headlines {
                            speaker.say(&headline.to_string()).await?;
                        }
                        speaker.say("That's all the news for now.").await?;
                    }
                    Err(e) => {
                        tracing::warn!(error = %e, "news fetch failed");
                        speaker.say(&e.to_string()).await?;
                    }
                }
            }
            Action::Search { query } => {
                let answer = self.search.summary(&query).await;
                speaker.say(&answer).await?;
            }
            Action::Unrecognized => {
                speaker.say(NOT_UNDERSTOOD).await?;
            }
        }

        Ok(())
    }

    /// Interpret and execute a transcript in one step
    ///
    /// # Errors
    ///
    /// Returns error only if speaking fails
    pub async fn handle<S: Speaker, N: Navigator>(
        &self,
        transcript: &str,
        speaker: &mut S,
        navigator: &N,
    ) -> Result<()> {
        tracing::info!(transcript, "processing command");
        let action = self.interpret(transcript);
        self.execute(action, speaker, navigator).await
    }
}

/// Best-effort navigation; failures are logged, never raised
fn navigate<N: Navigator>(navigator: &N, url: &str) {
    if let Err(e) = navigator.open(url) {
        tracing::warn!(url, error = %e, "navigation failed");
    }
}
