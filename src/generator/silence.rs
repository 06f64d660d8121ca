use super::{GeneratorState, SignalGenerator};

/// Timed silence, used for pauses
pub struct SilenceGenerator {
    position: usize,
    duration: usize,
}

impl SilenceGenerator {
    /// Create a new silence generator
    ///
    /// # Example
    /// ```
    /// use rtttl::generator::SilenceGenerator;
    ///
    /// let pause = SilenceGenerator::new(11025); // 250ms at 44.1kHz
    /// ```
    pub fn new(duration_samples: usize) -> Self {
        Self {
            position: 0,
            duration: duration_samples,
        }
    }

    pub fn duration(&self) -> usize {
        self.duration
    }
}

impl SignalGenerator for SilenceGenerator {
    fn process(&mut self, buffer: &mut [f32]) -> GeneratorState {
        buffer.fill(0.0);
        self.position = (self.position + buffer.len()).min(self.duration);

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
        self.position = 0;
    }
}
