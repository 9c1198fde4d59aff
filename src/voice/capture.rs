//! Audio capture from the microphone
//!
//! A cpal input stream feeds a shared sample buffer; phrase capture polls
//! that buffer, waits for speech energy above the calibrated noise floor,
//! and stops after trailing silence or when the window expires.

use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use cpal::traits::{DeviceTrait, HostTrait, StreamTrait};
use cpal::{Device, SampleRate, Stream, StreamConfig};

use crate::voice::PhraseSource;
use crate::{Error, Result};

/// Sample rate for audio capture (16kHz for speech)
pub const SAMPLE_RATE: u32 = 16000;

/// Absolute minimum RMS energy to ever count as speech
const ENERGY_FLOOR: f32 = 0.01;

/// Calibrated noise floor is scaled by this before comparison
const NOISE_MARGIN: f32 = 3.0;

/// Trailing silence that ends a phrase once speech has started
const TRAILING_SILENCE: Duration = Duration::from_millis(600);

/// Buffer poll interval
const POLL_INTERVAL: Duration = Duration::from_millis(100);

/// Captures audio from the default input device
pub struct AudioCapture {
    #[allow(dead_code)]
    device: Device,
    config: StreamConfig,
    buffer: Arc<Mutex<Vec<f32>>>,
    stream: Option<Stream>,
    noise_floor: f32,
}

impl AudioCapture {
    /// Create a new audio capture instance
    ///
    /// # Errors
    ///
    /// Returns error if no suitable input device is available
    pub fn new() -> Result<Self> {
        let host = cpal::default_host();

        let device = host
            .default_input_device()
            .ok_or_else(|| Error::Audio("no input device available".to_string()))?;

        let supported_config = device
            .supported_input_configs()
            .map_err(|e| Error::Audio(e.to_string()))?
            .find(|c| {
                c.channels() == 1
                    && c.min_sample_rate() <= SampleRate(SAMPLE_RATE)
                    && c.max_sample_rate() >= SampleRate(SAMPLE_RATE)
            })
            .ok_or_else(|| Error::Audio("no suitable audio config found".to_string()))?;

        let config = supported_config
            .with_sample_rate(SampleRate(SAMPLE_RATE))
            .config();

        tracing::debug!(
            device = device.name().unwrap_or_default(),
            sample_rate = SAMPLE_RATE,
            "audio capture initialized"
        );

        Ok(Self {
            device,
            config,
            buffer: Arc::new(Mutex::new(Vec::new())),
            stream: None,
            noise_floor: 0.0,
        })
    }

    /// Start the input stream
    ///
    /// # Errors
    ///
    /// Returns error if the stream cannot be built or started
    pub fn start(&mut self) -> Result<()> {
        if self.stream.is_some() {
            return Ok(());
        }

        let buffer = Arc::clone(&self.buffer);
        let host = cpal::default_host();
        let device = host
            .default_input_device()
            .ok_or_else(|| Error::Audio("no input device".to_string()))?;

        let stream = device
            .build_input_stream(
                &self.config,
                move |data: &[f32], _: &cpal::InputCallbackInfo| {
                    if let Ok(mut buf) = buffer.lock() {
                        buf.extend_from_slice(data);
                    }
                },
                |err| {
                    tracing::error!(error = %err, "audio capture error");
                },
                None,
            )
            .map_err(|e| Error::Audio(e.to_string()))?;

        stream.play().map_err(|e| Error::Audio(e.to_string()))?;
        self.stream = Some(stream);

        tracing::debug!("audio capture started");
        Ok(())
    }

    /// Stop the input stream
    pub fn stop(&mut self) {
        if let Some(stream) = self.stream.take() {
            drop(stream);
            tracing::debug!("audio capture stopped");
        }
    }

    /// Take the captured samples, clearing the buffer
    #[must_use]
    pub fn take_buffer(&self) -> Vec<f32> {
        self.buffer
            .lock()
            .map(|mut buf| std::mem::take(&mut *buf))
            .unwrap_or_default()
    }

    /// Captured samples without clearing
    #[must_use]
    pub fn peek_buffer(&self) -> Vec<f32> {
        self.buffer
            .lock()
            .map(|buf| buf.clone())
            .unwrap_or_default()
    }

    /// Clear the sample buffer
    pub fn clear_buffer(&self) {
        if let Ok(mut buf) = self.buffer.lock() {
            buf.clear();
        }
    }

    /// The energy threshold speech must exceed
    fn speech_threshold(&self) -> f32 {
        (self.noise_floor * NOISE_MARGIN).max(ENERGY_FLOOR)
    }
}

#[async_trait(?Send)]
impl PhraseSource for AudioCapture {
    /// Measure the ambient noise floor over `duration`
    async fn calibrate(&mut self, duration: Duration) -> Result<()> {
        self.start()?;
        self.clear_buffer();
        tokio::time::sleep(duration).await;
        let samples = self.take_buffer();

        self.noise_floor = rms_level(&samples);
        tracing::debug!(noise_floor = self.noise_floor, "ambient noise calibrated");
        Ok(())
    }

    async fn capture_phrase(&mut self, window: Duration) -> Result<Option<Vec<u8>>> {
        self.start()?;
        self.clear_buffer();

        let threshold = self.speech_threshold();
        let deadline = tokio::time::Instant::now() + window;

        let mut phrase: Vec<f32> = Vec::new();
        let mut speech_started = false;
        let mut silence = Duration::ZERO;

        loop {
            tokio::time::sleep(POLL_INTERVAL).await;

            let chunk = self.take_buffer();
            let is_speech = rms_level(&chunk) > threshold;
            phrase.extend_from_slice(&chunk);

            if is_speech {
                speech_started = true;
                silence = Duration::ZERO;
            } else if speech_started {
                silence += POLL_INTERVAL;
                if silence >= TRAILING_SILENCE {
                    break;
                }
            }

            if tokio::time::Instant::now() >= deadline {
                break;
            }
        }

        if !speech_started {
            tracing::trace!("no speech in capture window");
            return Ok(None);
        }

        tracing::debug!(samples = phrase.len(), "phrase captured");
        Ok(Some(samples_to_wav(&phrase, SAMPLE_RATE)?))
    }
}

/// RMS energy of audio samples
#[allow(clippy::cast_precision_loss)]
pub fn rms_level(samples: &[f32]) -> f32 {
    if samples.is_empty() {
        return 0.0;
    }
    let sum_squares: f32 = samples.iter().map(|s| s * s).sum();
    (sum_squares / samples.len() as f32).sqrt()
}

/// Convert f32 samples to WAV bytes for the STT API
///
/// # Errors
///
/// Returns error if WAV encoding fails
pub fn samples_to_wav(samples: &[f32], sample_rate: u32) -> Result<Vec<u8>> {
    let spec = hound::WavSpec {
        channels: 1,
        sample_rate,
        bits_per_sample: 16,
        sample_format: hound::SampleFormat::Int,
    };

    let mut cursor = std::io::Cursor::new(Vec::new());
    {
        let mut writer =
            hound::WavWriter::new(&mut cursor, spec).map_err(|e| Error::Audio(e.to_string()))?;

        for &sample in samples {
            #[allow(clippy::cast_possible_truncation)]
            let sample_i16 = (sample * 32767.0).clamp(-32768.0, 32767.0) as i16;
            writer
                .write_sample(sample_i16)
                .map_err(|e| Error::Audio(e.to_string()))?;
        }

        writer.finalize().map_err(|e| Error::Audio(e.to_string()))?;
    }

    Ok(cursor.into_inner())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rms_level() {
        assert!(rms_level(&[]) < f32::EPSILON);
        assert!(rms_level(&vec![0.0; 100]) < 0.001);
        assert!(rms_level(&vec![0.5; 100]) > 0.4);
    }

    #[test]
    fn test_samples_to_wav_header() {
        let samples = vec![0.0f32, 0.5, -0.5, 1.0];
        let wav = samples_to_wav(&samples, SAMPLE_RATE).unwrap();
        assert_eq!(&wav[0..4], b"RIFF");
        assert_eq!(&wav[8..12], b"WAVE");
        assert!(wav.len() > 44);
    }
}
