//! Tone renderer
//!
//! Plays a tone sequence into a mono sample stream, one generator per
//! event, concatenated in order. Processing is frame-based; a frame may
//! span several events.

use std::path::Path;

use thiserror::Error;

use crate::generator::{SignalGenerator, SilenceGenerator, SineGenerator};
use crate::pipeline::sequencer::ToneEvent;
use crate::wav::write_wav_file;

/// Configuration for the renderer
#[derive(Debug, Clone)]
pub struct RenderConfig {
    /// Sample rate in Hz
    pub sample_rate: u32,
    /// Number of samples per frame
    pub frame_size: usize,
    /// Peak tone amplitude (0.0 to 1.0)
    pub amplitude: f32,
    /// Fade-in/fade-out length of each tone in milliseconds
    pub fade_ms: f32,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            sample_rate: 44100,
            frame_size: 64,
            amplitude: 0.5,
            fade_ms: 5.0,
        }
    }
}

impl RenderConfig {
    /// Convert a length in milliseconds to samples
    pub fn samples(&self, ms: f64) -> usize {
        (ms * self.sample_rate as f64 / 1000.0).round() as usize
    }
}

/// Render errors
#[derive(Error, Debug)]
pub enum RenderError {
    #[error("event {index} has no playable duration ({duration_ms} ms)")]
    UnboundedTone { index: usize, duration_ms: f64 },
    #[error("event {index} has an invalid frequency ({frequency_hz} Hz)")]
    InvalidFrequency { index: usize, frequency_hz: f64 },
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// Renders tone events into audio samples
pub struct Renderer {
    config: RenderConfig,
    events: Vec<ToneEvent>,
    /// Generator for the event being played
    current: Option<Box<dyn SignalGenerator>>,
    /// Index of the next event to start
    event_index: usize,
    /// Samples left in the current event
    samples_left: usize,
    /// Current sample position
    current_sample: usize,
}

impl Renderer {
    /// Create a new renderer
    ///
    /// Fails if an event cannot be rendered: a duration that is infinite,
    /// NaN or negative (e.g. a note with no duration and no inherited
    /// default), or a tone frequency that is not finite.
    ///
    /// # Example
    /// ```
    /// use rtttl::pipeline::renderer::{RenderConfig, Renderer};
    /// use rtttl::pipeline::sequencer::ToneEvent;
    ///
    /// let events = vec![ToneEvent::tone(880.0, 100.0), ToneEvent::silence(50.0)];
    /// let mut renderer = Renderer::new(RenderConfig::default(), events).unwrap();
    /// assert_eq!(renderer.render().len(), 6615);
    /// ```
    pub fn new(config: RenderConfig, events: Vec<ToneEvent>) -> Result<Self, RenderError> {
        for (index, event) in events.iter().enumerate() {
            if !event.duration_ms.is_finite() || event.duration_ms < 0.0 {
                return Err(RenderError::UnboundedTone {
                    index,
                    duration_ms: event.duration_ms,
                });
            }
            if !event.is_silence && !event.frequency_hz.is_finite() {
                return Err(RenderError::InvalidFrequency {
                    index,
                    frequency_hz: event.frequency_hz,
                });
            }
        }

        Ok(Self {
            config,
            events,
            current: None,
            event_index: 0,
            samples_left: 0,
            current_sample: 0,
        })
    }

    /// Total length of the rendered sequence in samples
    pub fn total_samples(&self) -> usize {
        self.events
            .iter()
            .map(|e| self.config.samples(e.duration_ms))
            .sum()
    }

    /// Current sample position
    pub fn position(&self) -> usize {
        self.current_sample
    }

    /// Check if there are samples left to render
    pub fn is_active(&self) -> bool {
        self.samples_left > 0
            || self.events[self.event_index..]
                .iter()
                .any(|e| self.config.samples(e.duration_ms) > 0)
    }

    fn create_generator(&self, event: &ToneEvent, duration: usize) -> Box<dyn SignalGenerator> {
        if event.is_silence {
            Box::new(SilenceGenerator::new(duration))
        } else {
            let fade = self.config.samples(self.config.fade_ms as f64);
            Box::new(SineGenerator::new(
                event.frequency_hz as f32,
                duration,
                self.config.sample_rate,
                self.config.amplitude,
                fade,
            ))
        }
    }

    /// Start the next event with a non-zero length
    ///
    /// Returns false when the sequence is exhausted.
    fn start_next_event(&mut self) -> bool {
        while self.event_index < self.events.len() {
            let event = self.events[self.event_index];
            self.event_index += 1;

            let duration = self.config.samples(event.duration_ms);
            if duration > 0 {
                self.current = Some(self.create_generator(&event, duration));
                self.samples_left = duration;
                return true;
            }
        }

        self.current = None;
        false
    }

    /// Process one frame of audio
    ///
    /// Samples past the end of the sequence are written as silence.
    pub fn process_frame(&mut self, buffer: &mut [f32]) {
        let mut filled = 0;

        while filled < buffer.len() {
            if self.samples_left == 0 && !self.start_next_event() {
                buffer[filled..].fill(0.0);
                break;
            }

            let chunk = self.samples_left.min(buffer.len() - filled);
            if let Some(generator) = self.current.as_mut() {
                generator.process(&mut buffer[filled..filled + chunk]);
            }

            filled += chunk;
            self.samples_left -= chunk;
        }

        self.current_sample += buffer.len();
    }

    /// Render the whole sequence
    ///
    /// The result holds exactly `total_samples()` samples.
    pub fn render(&mut self) -> Vec<f32> {
        let total = self.total_samples();
        let mut samples = Vec::with_capacity(total);
        let mut frame_buffer = vec![0.0f32; self.config.frame_size.max(1)];

        while self.is_active() {
            self.process_frame(&mut frame_buffer);
            samples.extend_from_slice(&frame_buffer);
        }

        samples.truncate(total);
        samples
    }

    /// Render the whole sequence and write it to a WAV file
    ///
    /// # Arguments
    /// * `output_path` - Path for output WAV file
    pub fn generate_wav<P: AsRef<Path>>(&mut self, output_path: P) -> Result<(), RenderError> {
        let samples = self.render();
        write_wav_file(output_path, &samples, self.config.sample_rate)?;
        Ok(())
    }
}
