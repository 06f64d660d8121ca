//! Ringtone pipeline
//!
//! Turns RTTTL text into audio:
//! - Parser: Parse RTTTL text into a ringtone
//! - Sequencer: Convert notes into timed tone events
//! - Renderer: Concatenate tone events into audio samples

pub mod parser;
pub mod renderer;
pub mod sequencer;

pub use parser::{parse, parse_note, Note, ParseError, Ringtone};
pub use renderer::{RenderConfig, RenderError, Renderer};
pub use sequencer::{to_tone_sequence, to_tone_sequence_with, SequencerConfig, ToneEvent};
