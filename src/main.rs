use std::process::ExitCode;
use std::time::Duration;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use viola::voice::{AudioCapture, AudioPlayback, SpeechToText, TextToSpeech, VoiceOutput, WakeGate};
use viola::{
    Assistant, CommandInterpreter, Config, ConsoleSpeaker, HeadlineRequest, NewsClient,
    SearchClient, SongCatalog, SystemBrowser,
};

/// Viola - voice-activated personal assistant
#[derive(Parser)]
#[command(name = "viola", version, about)]
struct Cli {
    /// Wake word to listen for
    #[arg(short, long, env = "VIOLA_WAKE_WORD")]
    wake_word: Option<String>,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Run a single transcript through the interpreter (no microphone)
    Ask {
        /// The transcript, e.g. "play the virtual"
        transcript: String,
    },
    /// Test TTS output
    Say {
        /// Text to speak
        #[arg(default_value = "Hello! This is a test of the text to speech system.")]
        text: String,
    },
    /// Print the current top headlines
    News,
    /// Test microphone input
    TestMic {
        /// Duration in seconds
        #[arg(short, long, default_value = "5")]
        duration: u64,
    },
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    // Set up logging based on verbosity
    let filter = match cli.verbose {
        0 => "info,viola=info",
        1 => "info,viola=debug",
        2 => "debug",
        _ => "trace",
    };

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(filter))
        .init();

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!("fatal: {e}");
            ExitCode::FAILURE
        }
    }
}

#[allow(clippy::future_not_send)]
async fn run(cli: Cli) -> anyhow::Result<()> {
    let mut config = Config::load()?;
    if let Some(wake_word) = cli.wake_word {
        config.wake_word = wake_word;
    }

    if let Some(cmd) = cli.command {
        return match cmd {
            Command::Ask { transcript } => ask(&config, &transcript).await,
            Command::Say { text } => say(&config, &text).await,
            Command::News => news(&config).await,
            Command::TestMic { duration } => test_mic(duration).await,
        };
    }

    run_assistant(config).await
}

/// Build the interpreter over its production collaborators
fn build_interpreter(config: &Config) -> anyhow::Result<CommandInterpreter> {
    let catalog = match &config.catalog_path {
        Some(path) => SongCatalog::load(path)?,
        None => SongCatalog::builtin(),
    };

    let search = SearchClient::new()?;
    let news = NewsClient::new(config.api_keys.news.clone())?;

    Ok(CommandInterpreter::new(
        catalog,
        config.sites.clone(),
        Box::new(search),
        Box::new(news),
    ))
}

/// Run the full wake-word listen loop
#[allow(clippy::future_not_send)]
async fn run_assistant(config: Config) -> anyhow::Result<()> {
    let openai_key = config
        .api_keys
        .openai
        .clone()
        .ok_or_else(|| anyhow::anyhow!("OPENAI_API_KEY required for voice mode"))?;

    let interpreter = build_interpreter(&config)?;
    let gate = WakeGate::new(&config.wake_word, &config.exit_phrase);

    let capture = AudioCapture::new()?;
    let transcriber = SpeechToText::new(openai_key.clone(), config.voice.stt_model.clone())?;
    let tts = TextToSpeech::new(
        openai_key,
        config.voice.tts_model.clone(),
        config.voice.tts_voice.clone(),
        config.voice.tts_speed,
    )?;
    let speaker = VoiceOutput::new(tts, AudioPlayback::new()?);

    tracing::info!(wake_word = %config.wake_word, "viola ready - say the wake word");

    let mut assistant = Assistant::new(
        gate,
        config.listen.clone(),
        interpreter,
        capture,
        transcriber,
        speaker,
        SystemBrowser,
    );

    assistant.run().await?;
    Ok(())
}

/// Run one transcript through the interpreter, answering on stdout
async fn ask(config: &Config, transcript: &str) -> anyhow::Result<()> {
    let interpreter = build_interpreter(config)?;
    let mut speaker = ConsoleSpeaker;
    interpreter
        .handle(transcript, &mut speaker, &SystemBrowser)
        .await?;
    Ok(())
}

/// Synthesize and play a line of text
async fn say(config: &Config, text: &str) -> anyhow::Result<()> {
    let openai_key = config
        .api_keys
        .openai
        .clone()
        .ok_or_else(|| anyhow::anyhow!("OPENAI_API_KEY required for TTS"))?;

    let tts = TextToSpeech::new(
        openai_key,
        config.voice.tts_model.clone(),
        config.voice.tts_voice.clone(),
        config.voice.tts_speed,
    )?;

    println!("Synthesizing: \"{text}\"");
    let audio = tts.synthesize(text).await?;
    println!("Got {} bytes of audio data", audio.len());

    let mut playback = AudioPlayback::new()?;
    playback.play_mp3(&audio).await?;
    Ok(())
}

/// Print the current headlines without speaking them
async fn news(config: &Config) -> anyhow::Result<()> {
    let client = NewsClient::new(config.api_keys.news.clone())?;
    for line in client.spoken_headlines(&HeadlineRequest::default()).await {
        println!("{line}");
    }
    Ok(())
}

/// Microphone level meter
async fn test_mic(duration: u64) -> anyhow::Result<()> {
    println!("Testing microphone for {duration} seconds...");
    println!("Speak into your microphone!\n");

    let mut capture = AudioCapture::new()?;
    capture.start()?;

    for i in 0..duration {
        tokio::time::sleep(Duration::from_secs(1)).await;

        let samples = capture.take_buffer();
        let energy = viola::voice::rms_level(&samples);
        let peak = samples.iter().map(|s| s.abs()).fold(0.0f32, f32::max);

        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        let meter_len = (energy * 100.0).min(50.0) as usize;
        let meter: String = "#".repeat(meter_len) + &" ".repeat(50 - meter_len);

        println!("[{:2}s] RMS: {energy:.4} | Peak: {peak:.4} | [{meter}]", i + 1);
    }

    capture.stop();

    println!("\n---");
    println!("If you saw movement in the meter, your mic is working.");
    Ok(())
}
