//! Configuration management for Viola
//!
//! Everything is carried in an explicit [`Config`] passed into component
//! constructors at startup; there is no module-level global state.
//! Precedence is env > `~/.config/viola/config.toml` > defaults.

use std::path::PathBuf;
use std::time::Duration;

use serde::Deserialize;

use crate::Result;

/// Sentinel value meaning "no NewsAPI key configured"
pub const NEWS_KEY_PLACEHOLDER: &str = "YOUR_NEWSAPI_KEY";

/// Viola configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// Wake word that transitions the assistant from idle to awake
    pub wake_word: String,

    /// Spoken phrase that terminates the assistant
    pub exit_phrase: String,

    /// API keys for external services
    pub api_keys: ApiKeys,

    /// Voice (STT/TTS) configuration
    pub voice: VoiceConfig,

    /// Listen loop timing configuration
    pub listen: ListenConfig,

    /// Sites opened by the "open ..." commands
    pub sites: SiteLinks,

    /// Optional song catalog file (TOML); built-in catalog when absent
    pub catalog_path: Option<PathBuf>,
}

/// API keys for external services
#[derive(Debug, Clone, Default)]
pub struct ApiKeys {
    /// `OpenAI` API key (Whisper STT and TTS)
    pub openai: Option<String>,

    /// NewsAPI key; `None` when missing or set to the placeholder
    pub news: Option<String>,
}

/// Voice processing configuration
#[derive(Debug, Clone)]
pub struct VoiceConfig {
    /// STT model (e.g. "whisper-1")
    pub stt_model: String,

    /// TTS model (e.g. "tts-1")
    pub tts_model: String,

    /// TTS voice identifier
    pub tts_voice: String,

    /// TTS speed multiplier (0.25 to 4.0)
    pub tts_speed: f32,
}

impl Default for VoiceConfig {
    fn default() -> Self {
        Self {
            stt_model: "whisper-1".to_string(),
            tts_model: "tts-1".to_string(),
            tts_voice: "nova".to_string(),
            tts_speed: 1.0,
        }
    }
}

/// Listen loop timing configuration
///
/// The windows are tunable rather than fixed behavior; the defaults match
/// the values the assistant has always used.
#[derive(Debug, Clone)]
pub struct ListenConfig {
    /// Bounded phrase window while waiting for the wake word
    pub wake_window: Duration,

    /// Longer bounded window for the follow-up command after waking
    pub command_window: Duration,

    /// Ambient noise calibration duration at startup
    pub calibration: Duration,
}

impl Default for ListenConfig {
    fn default() -> Self {
        Self {
            wake_window: Duration::from_secs(2),
            command_window: Duration::from_secs(10),
            calibration: Duration::from_secs(1),
        }
    }
}

/// Fixed destinations for the site-opening commands
#[derive(Debug, Clone)]
pub struct SiteLinks {
    /// Google search URL
    pub google: String,

    /// YouTube channel URL
    pub youtube: String,

    /// GitHub profile URL
    pub github: String,
}

impl Default for SiteLinks {
    fn default() -> Self {
        Self {
            google: "https://www.google.com".to_string(),
            youtube: "https://www.youtube.com/@LotusOutlook".to_string(),
            github: "https://github.com/lotus-outlook-6".to_string(),
        }
    }
}

/// On-disk configuration file shape (all fields optional)
#[derive(Debug, Default, Deserialize)]
struct FileConfig {
    wake_word: Option<String>,
    exit_phrase: Option<String>,
    catalog_path: Option<PathBuf>,
    #[serde(default)]
    api_keys: FileApiKeys,
    #[serde(default)]
    voice: FileVoice,
    #[serde(default)]
    listen: FileListen,
    #[serde(default)]
    sites: FileSites,
}

#[derive(Debug, Default, Deserialize)]
struct FileApiKeys {
    openai: Option<String>,
    news: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
struct FileVoice {
    stt_model: Option<String>,
    tts_model: Option<String>,
    tts_voice: Option<String>,
    tts_speed: Option<f32>,
}

#[derive(Debug, Default, Deserialize)]
struct FileListen {
    wake_window_secs: Option<u64>,
    command_window_secs: Option<u64>,
    calibration_secs: Option<u64>,
}

#[derive(Debug, Default, Deserialize)]
struct FileSites {
    google: Option<String>,
    youtube: Option<String>,
    github: Option<String>,
}

/// Path of the optional config file: `~/.config/viola/config.toml`
fn config_file_path() -> Option<PathBuf> {
    directories::BaseDirs::new().map(|d| d.config_dir().join("viola").join("config.toml"))
}

/// Load the optional TOML config file, falling back to defaults on any error
fn load_config_file() -> FileConfig {
    let Some(path) = config_file_path() else {
        return FileConfig::default();
    };

    if !path.exists() {
        return FileConfig::default();
    }

    match std::fs::read_to_string(&path) {
        Ok(content) => match toml::from_str(&content) {
            Ok(fc) => {
                tracing::debug!(path = %path.display(), "loaded config file");
                fc
            }
            Err(e) => {
                tracing::warn!(
                    path = %path.display(),
                    error = %e,
                    "failed to parse config file, using defaults"
                );
                FileConfig::default()
            }
        },
        Err(e) => {
            tracing::warn!(
                path = %path.display(),
                error = %e,
                "failed to read config file"
            );
            FileConfig::default()
        }
    }
}

/// Treat missing and placeholder keys the same way
fn normalize_news_key(key: Option<String>) -> Option<String> {
    key.filter(|k| !k.trim().is_empty() && k != NEWS_KEY_PLACEHOLDER)
}

impl Default for Config {
    fn default() -> Self {
        Self {
            wake_word: "viola".to_string(),
            exit_phrase: "stop listening".to_string(),
            api_keys: ApiKeys::default(),
            voice: VoiceConfig::default(),
            listen: ListenConfig::default(),
            sites: SiteLinks::default(),
            catalog_path: None,
        }
    }
}

impl Config {
    /// Load configuration (env > config file > defaults)
    ///
    /// # Errors
    ///
    /// Currently infallible but returns `Result` so future sources can fail
    pub fn load() -> Result<Self> {
        let fc = load_config_file();
        let defaults = Self::default();

        let api_keys = ApiKeys {
            openai: std::env::var("OPENAI_API_KEY").ok().or(fc.api_keys.openai),
            news: normalize_news_key(std::env::var("NEWS_API_KEY").ok().or(fc.api_keys.news)),
        };

        let voice = VoiceConfig {
            stt_model: std::env::var("VIOLA_STT_MODEL")
                .ok()
                .or(fc.voice.stt_model)
                .unwrap_or(defaults.voice.stt_model),
            tts_model: std::env::var("VIOLA_TTS_MODEL")
                .ok()
                .or(fc.voice.tts_model)
                .unwrap_or(defaults.voice.tts_model),
            tts_voice: std::env::var("VIOLA_TTS_VOICE")
                .ok()
                .or(fc.voice.tts_voice)
                .unwrap_or(defaults.voice.tts_voice),
            tts_speed: std::env::var("VIOLA_TTS_SPEED")
                .ok()
                .and_then(|s| s.parse().ok())
                .or(fc.voice.tts_speed)
                .unwrap_or(defaults.voice.tts_speed),
        };

        let secs = |env: &str, file: Option<u64>, default: Duration| {
            std::env::var(env)
                .ok()
                .and_then(|s| s.parse().ok())
                .or(file)
                .map_or(default, Duration::from_secs)
        };

        let listen = ListenConfig {
            wake_window: secs(
                "VIOLA_WAKE_WINDOW_SECS",
                fc.listen.wake_window_secs,
                defaults.listen.wake_window,
            ),
            command_window: secs(
                "VIOLA_COMMAND_WINDOW_SECS",
                fc.listen.command_window_secs,
                defaults.listen.command_window,
            ),
            calibration: secs(
                "VIOLA_CALIBRATION_SECS",
                fc.listen.calibration_secs,
                defaults.listen.calibration,
            ),
        };

        let sites = SiteLinks {
            google: fc.sites.google.unwrap_or(defaults.sites.google),
            youtube: fc.sites.youtube.unwrap_or(defaults.sites.youtube),
            github: fc.sites.github.unwrap_or(defaults.sites.github),
        };

        Ok(Self {
            wake_word: std::env::var("VIOLA_WAKE_WORD")
                .ok()
                .or(fc.wake_word)
                .unwrap_or(defaults.wake_word),
            exit_phrase: std::env::var("VIOLA_EXIT_PHRASE")
                .ok()
                .or(fc.exit_phrase)
                .unwrap_or(defaults.exit_phrase),
            api_keys,
            voice,
            listen,
            sites,
            catalog_path: std::env::var("VIOLA_CATALOG_PATH")
                .ok()
                .map(PathBuf::from)
                .or(fc.catalog_path),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.wake_word, "viola");
        assert_eq!(config.exit_phrase, "stop listening");
        assert_eq!(config.listen.wake_window, Duration::from_secs(2));
        assert_eq!(config.listen.command_window, Duration::from_secs(10));
        assert!(config.api_keys.news.is_none());
    }

    #[test]
    fn test_placeholder_news_key_is_unconfigured() {
        assert_eq!(normalize_news_key(Some(NEWS_KEY_PLACEHOLDER.to_string())), None);
        assert_eq!(normalize_news_key(Some(String::new())), None);
        assert_eq!(
            normalize_news_key(Some("abc123def456".to_string())),
            Some("abc123def456".to_string())
        );
    }
}
