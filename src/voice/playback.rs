//! Audio playback to speakers

use std::io::Cursor;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;

use cpal::traits::{DeviceTrait, HostTrait, StreamTrait};
use cpal::{Device, SampleRate, StreamConfig};

use crate::{Error, Result};

/// Sample rate for playback (matches common TTS output)
const PLAYBACK_SAMPLE_RATE: u32 = 24000;

/// Plays audio on the default output device
pub struct AudioPlayback {
    #[allow(dead_code)]
    device: Device,
    config: StreamConfig,
}

impl AudioPlayback {
    /// Create a new audio playback instance
    ///
    /// # Errors
    ///
    /// Returns error if no suitable output device is available
    pub fn new() -> Result<Self> {
        let host = cpal::default_host();

        let device = host
            .default_output_device()
            .ok_or_else(|| Error::Audio("no output device available".to_string()))?;

        let supported_config = device
            .supported_output_configs()
            .map_err(|e| Error::Audio(e.to_string()))?
            .find(|c| {
                (c.channels() == 1 || c.channels() == 2)
                    && c.min_sample_rate() <= SampleRate(PLAYBACK_SAMPLE_RATE)
                    && c.max_sample_rate() >= SampleRate(PLAYBACK_SAMPLE_RATE)
            })
            .ok_or_else(|| Error::Audio("no suitable output config found".to_string()))?;

        let config = supported_config
            .with_sample_rate(SampleRate(PLAYBACK_SAMPLE_RATE))
            .config();

        tracing::debug!(
            device = device.name().unwrap_or_default(),
            sample_rate = PLAYBACK_SAMPLE_RATE,
            channels = config.channels,
            "audio playback initialized"
        );

        Ok(Self { device, config })
    }

    /// Decode MP3 bytes and play them, blocking until done
    ///
    /// # Errors
    ///
    /// Returns error if decoding or playback fails
    pub async fn play_mp3(&mut self, mp3_data: &[u8]) -> Result<()> {
        let samples = decode_mp3(mp3_data)?;
        self.play_samples(samples).await
    }

    /// Play mono f32 samples, blocking until done
    ///
    /// # Errors
    ///
    /// Returns error if the output stream fails
    #[allow(clippy::unused_async)]
    pub async fn play_samples(&mut self, samples: Vec<f32>) -> Result<()> {
        if samples.is_empty() {
            return Ok(());
        }

        let host = cpal::default_host();
        let device = host
            .default_output_device()
            .ok_or_else(|| Error::Audio("no output device".to_string()))?;

        let channels = self.config.channels as usize;
        let sample_count = samples.len();

        let samples = Arc::new(samples);
        let position = Arc::new(AtomicUsize::new(0));
        let finished = Arc::new(AtomicBool::new(false));

        let cb_samples = Arc::clone(&samples);
        let cb_position = Arc::clone(&position);
        let cb_finished = Arc::clone(&finished);

        let stream = device
            .build_output_stream(
                &self.config,
                move |data: &mut [f32], _: &cpal::OutputCallbackInfo| {
                    for frame in data.chunks_mut(channels) {
                        let pos = cb_position.load(Ordering::Relaxed);
                        let sample = if pos < cb_samples.len() {
                            cb_position.store(pos + 1, Ordering::Relaxed);
                            cb_samples[pos]
                        } else {
                            cb_finished.store(true, Ordering::Relaxed);
                            0.0
                        };
                        for out in frame.iter_mut() {
                            *out = sample;
                        }
                    }
                },
                |err| {
                    tracing::error!(error = %err, "audio playback error");
                },
                None,
            )
            .map_err(|e| Error::Audio(e.to_string()))?;

        stream.play().map_err(|e| Error::Audio(e.to_string()))?;

        // Wait out the clip with a small grace period
        let duration_ms = (sample_count as u64 * 1000) / u64::from(PLAYBACK_SAMPLE_RATE);
        let deadline = std::time::Instant::now() + std::time::Duration::from_millis(duration_ms + 500);

        while !finished.load(Ordering::Relaxed) {
            if std::time::Instant::now() > deadline {
                break;
            }
            std::thread::sleep(std::time::Duration::from_millis(50));
        }
        std::thread::sleep(std::time::Duration::from_millis(100));

        drop(stream);
        tracing::debug!(samples = sample_count, "playback complete");
        Ok(())
    }
}

/// Decode MP3 bytes into mono f32 samples
fn decode_mp3(mp3_data: &[u8]) -> Result<Vec<f32>> {
    let mut decoder = minimp3::Decoder::new(Cursor::new(mp3_data));
    let mut samples = Vec::new();

    loop {
        match decoder.next_frame() {
            Ok(frame) => {
                if frame.channels == 2 {
                    samples.extend(frame.data.chunks(2).map(|chunk| {
                        let left = f32::from(chunk[0]) / 32768.0;
                        let right = f32::from(chunk.get(1).copied().unwrap_or(chunk[0])) / 32768.0;
                        f32::midpoint(left, right)
                    }));
                } else {
                    samples.extend(frame.data.iter().map(|&s| f32::from(s) / 32768.0));
                }
            }
            Err(minimp3::Error::Eof) => break,
            Err(e) => return Err(Error::Audio(format!("MP3 decode error: {e}"))),
        }
    }

    Ok(samples)
}
