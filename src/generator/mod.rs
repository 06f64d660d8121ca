pub mod silence;
pub mod sine;

pub use silence::SilenceGenerator;
pub use sine::SineGenerator;

/// Represents the current state of a signal generator
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GeneratorState {
    /// Generator is still producing samples
    Running,
    /// Generator has completed and will produce no more samples
    Complete,
}

/// Core trait for all signal generators
///
/// Signal generators produce audio samples frame by frame.
/// A frame may be any length; the renderer shortens the last frame of a
/// tone so that consecutive generators line up sample-exactly.
pub trait SignalGenerator {
    /// Process the next frame of samples
    ///
    /// # Arguments
    /// * `buffer` - Mutable slice to write samples into. The length determines frame size.
    ///
    /// # Returns
    /// * `GeneratorState::Running` if the generator is still active
    /// * `GeneratorState::Complete` if the generator has finished
    ///
    /// Samples past the end of the generator are written as silence.
    fn process(&mut self, buffer: &mut [f32]) -> GeneratorState;

    /// Check if this generator has completed
    fn is_complete(&self) -> bool;

    /// Reset the generator to its initial state
    fn reset(&mut self);
}
