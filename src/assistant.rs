//! The always-on listen loop
//!
//! Idle: capture a short phrase and check it for the exit phrase or the
//! wake word. Awake: capture a longer follow-up phrase and hand it to the
//! command interpreter, then go back to idle. Only the exit phrase ends
//! the loop; anything else that goes wrong is logged and the loop keeps
//! listening.

use crate::browser::Navigator;
use crate::config::ListenConfig;
use crate::interpreter::CommandInterpreter;
use crate::voice::{PhraseSource, Speaker, Transcriber, WakeDecision, WakeGate};
use crate::Result;

/// Spoken acknowledgment after the wake word
const WAKE_ACK: &str = "Yes, how can I help you?";

/// Spoken before terminating on the exit phrase
const GOODBYE: &str = "Stopping Viola. Goodbye!";

/// Spoken when a command phrase could not be transcribed
const NOT_UNDERSTOOD: &str = "I didn't understand that command";

/// Outcome of one idle-loop iteration
enum LoopOutcome {
    Continue,
    Terminate,
}

/// The assistant's listen loop over its collaborator boundaries
pub struct Assistant<A, T, S, N>
where
    A: PhraseSource,
    T: Transcriber,
    S: Speaker,
    N: Navigator,
{
    gate: WakeGate,
    listen: ListenConfig,
    interpreter: CommandInterpreter,
    source: A,
    transcriber: T,
    speaker: S,
    navigator: N,
}

impl<A, T, S, N> Assistant<A, T, S, N>
where
    A: PhraseSource,
    T: Transcriber,
    S: Speaker,
    N: Navigator,
{
    /// Assemble an assistant
    pub fn new(
        gate: WakeGate,
        listen: ListenConfig,
        interpreter: CommandInterpreter,
        source: A,
        transcriber: T,
        speaker: S,
        navigator: N,
    ) -> Self {
        Self {
            gate,
            listen,
            interpreter,
            source,
            transcriber,
            speaker,
            navigator,
        }
    }

    /// Run until the exit phrase is heard
    ///
    /// # Errors
    ///
    /// Returns error only if the initial calibration fails; iteration
    /// errors are logged and the loop continues
    pub async fn run(&mut self) -> Result<()> {
        self.source.calibrate(self.listen.calibration).await?;
        tracing::info!(wake_word = %self.gate.wake_word(), "listening for wake word");

        loop {
            match self.listen_once().await {
                Ok(LoopOutcome::Continue) => {}
                Ok(LoopOutcome::Terminate) => break,
                Err(e) => {
                    tracing::error!(error = %e, "listen loop error");
                }
            }
        }

        tracing::info!("assistant stopped");
        Ok(())
    }

    /// One idle-state iteration: capture, transcribe, decide
    async fn listen_once(&mut self) -> Result<LoopOutcome> {
        let Some(audio) = self.source.capture_phrase(self.listen.wake_window).await? else {
            return Ok(LoopOutcome::Continue);
        };

        let transcript = match self.transcriber.transcribe(&audio).await {
            Ok(t) if !t.trim().is_empty() => t,
            Ok(_) => return Ok(LoopOutcome::Continue),
            Err(e) => {
                tracing::debug!(error = %e, "could not understand, retrying");
                return Ok(LoopOutcome::Continue);
            }
        };

        tracing::debug!(transcript, "heard");

        match self.gate.assess(&transcript) {
            WakeDecision::Terminate => {
                self.speaker.say(GOODBYE).await?;
                Ok(LoopOutcome::Terminate)
            }
            WakeDecision::Wake => {
                self.speaker.say(WAKE_ACK).await?;
                self.capture_command().await?;
                Ok(LoopOutcome::Continue)
            }
            WakeDecision::Ignore => Ok(LoopOutcome::Continue),
        }
    }

    /// Awake state: capture the follow-up command and route it
    async fn capture_command(&mut self) -> Result<()> {
        let Some(audio) = self
            .source
            .capture_phrase(self.listen.command_window)
            .await?
        else {
            tracing::debug!("timed out waiting for a command");
            return Ok(());
        };

        match self.transcriber.transcribe(&audio).await {
            Ok(t) if !t.trim().is_empty() => {
                self.interpreter
                    .handle(&t, &mut self.speaker, &self.navigator)
                    .await
            }
            _ => self.speaker.say(NOT_UNDERSTOOD).await,
        }
    }
}
