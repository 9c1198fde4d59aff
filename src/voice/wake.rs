//! Wake word and exit phrase decisions
//!
//! The exit phrase is a plain substring check and always takes precedence.
//! The wake word must appear as a whole word, so "violation" never wakes a
//! "viola" assistant while "Viola, what time is it" does.

/// What the idle loop should do with a transcript
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WakeDecision {
    /// Wake word heard; capture a follow-up command
    Wake,
    /// Exit phrase heard; say goodbye and stop
    Terminate,
    /// Neither; keep listening
    Ignore,
}

/// Decides wake/exit transitions from transcripts
#[derive(Debug, Clone)]
pub struct WakeGate {
    wake_word: String,
    exit_phrase: String,
}

impl WakeGate {
    /// Create a gate for the given wake word and exit phrase
    #[must_use]
    pub fn new(wake_word: &str, exit_phrase: &str) -> Self {
        Self {
            wake_word: normalize(wake_word),
            exit_phrase: exit_phrase.to_lowercase().trim().to_string(),
        }
    }

    /// Assess a transcript heard while idle
    #[must_use]
    pub fn assess(&self, transcript: &str) -> WakeDecision {
        let lowered = transcript.to_lowercase();

        if lowered.contains(&self.exit_phrase) {
            tracing::info!(transcript, "exit phrase detected");
            return WakeDecision::Terminate;
        }

        if contains_phrase(&lowered, &self.wake_word) {
            tracing::info!(wake_word = %self.wake_word, transcript, "wake word detected");
            return WakeDecision::Wake;
        }

        WakeDecision::Ignore
    }

    /// The configured wake word
    #[must_use]
    pub fn wake_word(&self) -> &str {
        &self.wake_word
    }
}

/// Collapse text to lowercase words separated by single spaces
fn normalize(text: &str) -> String {
    text.to_lowercase()
        .split(|c: char| !c.is_alphanumeric())
        .filter(|w| !w.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}

/// Whole-word phrase containment: both sides are normalized to word
/// sequences, so punctuation does not defeat the boundary check
fn contains_phrase(haystack: &str, phrase: &str) -> bool {
    if phrase.is_empty() {
        return false;
    }
    let padded = format!(" {} ", normalize(haystack));
    padded.contains(&format!(" {phrase} "))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_whole_word_only() {
        let gate = WakeGate::new("viola", "stop listening");

        // embedded inside another word must not wake
        assert_eq!(gate.assess("that is a violation"), WakeDecision::Ignore);
        assert_eq!(gate.assess("violas are flowers"), WakeDecision::Ignore);

        // punctuation after the word is fine
        assert_eq!(gate.assess("Viola, what time is it"), WakeDecision::Wake);
        assert_eq!(gate.assess("hey VIOLA"), WakeDecision::Wake);
    }

    #[test]
    fn test_exit_phrase_takes_precedence() {
        let gate = WakeGate::new("viola", "stop listening");
        assert_eq!(gate.assess("viola stop listening"), WakeDecision::Terminate);
        assert_eq!(gate.assess("please STOP LISTENING now"), WakeDecision::Terminate);
    }

    #[test]
    fn test_multi_word_wake_phrase() {
        let gate = WakeGate::new("Hey Viola", "stop listening");
        assert_eq!(gate.assess("hey viola, open google"), WakeDecision::Wake);
        assert_eq!(gate.assess("they violate rules"), WakeDecision::Ignore);
    }

    #[test]
    fn test_ignore_without_wake_word() {
        let gate = WakeGate::new("viola", "stop listening");
        assert_eq!(gate.assess("what is the time"), WakeDecision::Ignore);
    }
}
