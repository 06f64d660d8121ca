use super::{GeneratorState, SignalGenerator};
use std::f32::consts::PI;

/// Timed sine tone generator
///
/// Produces a sine wave at a fixed frequency for a fixed number of samples.
/// The amplitude ramps linearly from 0 over the first `fade_samples` and
/// back to 0 over the last `fade_samples`, so that back-to-back tones do
/// not click. The fade is clamped to half the tone length.
pub struct SineGenerator {
    // Configuration
    frequency: f32,
    phase_per_sample: f32,
    duration: usize,
    amplitude: f32,
    fade: usize,

    // State
    phase: f32,
    position: usize,
}

impl SineGenerator {
    /// Create a new sine generator
    ///
    /// # Arguments
    /// * `frequency` - Tone frequency in Hz
    /// * `duration_samples` - Tone length in samples
    /// * `sample_rate` - Sample rate in Hz
    /// * `amplitude` - Peak amplitude (0.0 to 1.0)
    /// * `fade_samples` - Length of the fade-in and fade-out ramps
    ///
    /// # Example
    /// ```
    /// use rtttl::generator::SineGenerator;
    ///
    /// // 500ms of A at 44.1kHz with 5ms fades
    /// let tone = SineGenerator::new(440.0, 22050, 44100, 0.5, 220);
    /// ```
    pub fn new(
        frequency: f32,
        duration_samples: usize,
        sample_rate: u32,
        amplitude: f32,
        fade_samples: usize,
    ) -> Self {
        let nyquist = sample_rate as f32 / 2.0;
        if frequency >= nyquist {
            eprintln!(
                "WARNING: {:.2} Hz is above the Nyquist frequency ({} Hz) and will alias",
                frequency, nyquist
            );
        }

        Self {
            frequency,
            phase_per_sample: 2.0 * PI * frequency / sample_rate as f32,
            duration: duration_samples,
            amplitude: amplitude.clamp(0.0, 1.0),
            fade: fade_samples.min(duration_samples / 2),
            phase: 0.0,
            position: 0,
        }
    }

    pub fn frequency(&self) -> f32 {
        self.frequency
    }

    /// Get the current phase in radians, within [0, 2π)
    pub fn phase(&self) -> f32 {
        self.phase
    }

    /// Envelope gain at a sample position
    fn gain(&self, position: usize) -> f32 {
        if self.fade == 0 {
            return 1.0;
        }
        let fade_in = position as f32 / self.fade as f32;
        let fade_out = (self.duration - position) as f32 / self.fade as f32;
        fade_in.min(fade_out).min(1.0)
    }
}

impl SignalGenerator for SineGenerator {
    fn process(&mut self, buffer: &mut [f32]) -> GeneratorState {
        let two_pi = 2.0f32 * PI;

        for sample in buffer.iter_mut() {
            if self.position >= self.duration {
                *sample = 0.0;
                continue;
            }

            *sample = self.phase.sin() * self.amplitude * self.gain(self.position);

            self.phase = (self.phase + self.phase_per_sample) % two_pi;
            self.position += 1;
        }

        if self.is_complete() {
            GeneratorState::Complete
        } else {
            GeneratorState::Running
        }
    }

    fn is_complete(&self) -> bool {
        self.position >= self.duration
    }

    fn reset(&mut self) {
        self.phase = 0.0;
        self.position = 0;
    }
}
