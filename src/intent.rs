//! Intent classification
//!
//! Transcripts are classified by an explicit, ordered rule table.
//! First match wins; the table order is load-bearing (site-opening rules
//! must precede the music and news rules, and the distance rule must
//! precede the generic question rule).

use std::sync::LazyLock;

use regex::Regex;

/// A site the assistant can open on request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Site {
    /// Google search
    Google,
    /// The YouTube channel
    Youtube,
    /// The GitHub profile
    Github,
}

impl Site {
    /// Spoken announcement for the navigation
    #[must_use]
    pub const fn announcement(self) -> &'static str {
        match self {
            Self::Google => "Opening Google...",
            Self::Youtube => "Opening Youtube...",
            Self::Github => "Opening GitHub...",
        }
    }
}

/// The classified meaning of a transcript
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Intent {
    /// Open a fixed site in the browser
    OpenSite(Site),
    /// Speak the current local time
    ReportTime,
    /// Speak the self-introduction
    Introduce,
    /// Play a named song from the catalog
    PlaySong(String),
    /// List the song catalog ("play" with no song name)
    PlayList,
    /// Fetch and speak the top headlines
    ReportNews,
    /// Ask the search collaborator for the distance between two places
    DistanceQuery {
        /// Starting point
        origin: String,
        /// End point
        destination: String,
    },
    /// Fall back to a generic web search
    GenericSearch(String),
    /// Nothing usable in the transcript
    Unrecognized,
}

static HOW_FAR_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"how far is (.+?) from (.+)").expect("valid regex"));

static DISTANCE_BETWEEN_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"distance between (.+?) and (.+)").expect("valid regex"));

static QUESTION_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(?:where|what|who|when|why|how)\b").expect("valid regex"));

/// One classification rule: predicate plus intent builder
struct Rule {
    name: &'static str,
    matches: fn(&str) -> bool,
    build: fn(&str) -> Intent,
}

/// The ordered rule table; first match wins
static RULES: &[Rule] = &[
    Rule {
        name: "open-google",
        matches: |c| c.contains("open google"),
        build: |_| Intent::OpenSite(Site::Google),
    },
    Rule {
        name: "open-youtube",
        matches: |c| c.contains("open youtube"),
        build: |_| Intent::OpenSite(Site::Youtube),
    },
    Rule {
        name: "open-github",
        matches: |c| c.contains("open github"),
        build: |_| Intent::OpenSite(Site::Github),
    },
    Rule {
        name: "report-time",
        matches: |c| c.contains("what is the time") || c.contains("tell me the time"),
        build: |_| Intent::ReportTime,
    },
    Rule {
        name: "introduce",
        matches: |c| c.contains("what is your name") || c.contains("who are you"),
        build: |_| Intent::Introduce,
    },
    Rule {
        name: "play",
        matches: |c| c.contains("play"),
        build: |c| {
            let name = extract_song_name(c);
            if name.is_empty() {
                Intent::PlayList
            } else {
                Intent::PlaySong(name)
            }
        },
    },
    Rule {
        name: "news",
        matches: |c| c.contains("news") || c.contains("headlines"),
        build: |_| Intent::ReportNews,
    },
    Rule {
        name: "distance",
        matches: |c| HOW_FAR_RE.is_match(c) || DISTANCE_BETWEEN_RE.is_match(c),
        build: build_distance,
    },
    Rule {
        name: "question",
        matches: |c| QUESTION_RE.is_match(c),
        build: |c| Intent::GenericSearch(c.to_string()),
    },
];

/// Classify a transcript into an [`Intent`]
///
/// Matching is case-insensitive; anything unmatched falls back to a
/// generic web search of the whole transcript.
#[must_use]
pub fn classify(transcript: &str) -> Intent {
    let normalized = transcript.to_lowercase();
    let normalized = normalized.trim();

    if normalized.is_empty() {
        return Intent::Unrecognized;
    }

    for rule in RULES {
        if (rule.matches)(normalized) {
            let intent = (rule.build)(normalized);
            tracing::debug!(rule = rule.name, ?intent, "transcript classified");
            return intent;
        }
    }

    tracing::debug!("no rule matched, falling back to search");
    Intent::GenericSearch(normalized.to_string())
}

fn build_distance(c: &str) -> Intent {
    let caps = HOW_FAR_RE
        .captures(c)
        .or_else(|| DISTANCE_BETWEEN_RE.captures(c));

    match caps {
        Some(caps) => Intent::DistanceQuery {
            origin: caps[1].trim().to_string(),
            destination: caps[2].trim().to_string(),
        },
        None => Intent::GenericSearch(c.to_string()),
    }
}

/// Extract the song name from a "play ..." transcript
///
/// Removes the first occurrence of the literal "play", then strips a
/// leading "the " as a whole word only, so "play theatre" keeps "theatre".
#[must_use]
pub fn extract_song_name(command: &str) -> String {
    let remainder = command.replacen("play", "", 1);
    let remainder = remainder.trim();

    match remainder.strip_prefix("the ") {
        Some(rest) => rest.trim().to_string(),
        None => remainder.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_site_rules_precede_music_and_news() {
        assert_eq!(classify("open google play music"), Intent::OpenSite(Site::Google));
        assert_eq!(classify("OPEN YOUTUBE and play something"), Intent::OpenSite(Site::Youtube));
        assert_eq!(classify("open github news"), Intent::OpenSite(Site::Github));
    }

    #[test]
    fn test_time_and_introduction() {
        assert_eq!(classify("What is the time"), Intent::ReportTime);
        assert_eq!(classify("please tell me the time now"), Intent::ReportTime);
        assert_eq!(classify("what is your name"), Intent::Introduce);
        assert_eq!(classify("who are you"), Intent::Introduce);
    }

    #[test]
    fn test_play_extracts_song_name() {
        assert_eq!(classify("play the virtual"), Intent::PlaySong("virtual".to_string()));
        assert_eq!(classify("play checkpoint"), Intent::PlaySong("checkpoint".to_string()));
        // only a leading "the " word is special-cased
        assert_eq!(classify("play theatre"), Intent::PlaySong("theatre".to_string()));
    }

    #[test]
    fn test_bare_play_lists_catalog() {
        assert_eq!(classify("play"), Intent::PlayList);
        // a trailing bare "the" is not the "the " prefix, so it stays a lookup
        assert_eq!(classify("play the"), Intent::PlaySong("the".to_string()));
    }

    #[test]
    fn test_news_keywords() {
        assert_eq!(classify("tell me the news"), Intent::ReportNews);
        assert_eq!(classify("latest headlines"), Intent::ReportNews);
    }

    #[test]
    fn test_distance_query() {
        assert_eq!(
            classify("how far is Paris from London"),
            Intent::DistanceQuery {
                origin: "paris".to_string(),
                destination: "london".to_string(),
            }
        );
        assert_eq!(
            classify("distance between delhi and mumbai"),
            Intent::DistanceQuery {
                origin: "delhi".to_string(),
                destination: "mumbai".to_string(),
            }
        );
    }

    #[test]
    fn test_question_falls_back_to_search() {
        assert_eq!(
            classify("who invented the telephone"),
            Intent::GenericSearch("who invented the telephone".to_string())
        );
        // "whoever" must not match the question rule's word boundary,
        // but still falls through to the generic search
        assert_eq!(
            classify("whoever said that"),
            Intent::GenericSearch("whoever said that".to_string())
        );
    }

    #[test]
    fn test_unmatched_goes_to_search() {
        assert_eq!(
            classify("turn on the lights"),
            Intent::GenericSearch("turn on the lights".to_string())
        );
    }

    #[test]
    fn test_empty_transcript() {
        assert_eq!(classify("   "), Intent::Unrecognized);
    }

    #[test]
    fn test_extract_song_name() {
        assert_eq!(extract_song_name("play the virtual"), "virtual");
        assert_eq!(extract_song_name("play theatre"), "theatre");
        assert_eq!(extract_song_name("play"), "");
        assert_eq!(extract_song_name("play   the   "), "the");
    }
}
