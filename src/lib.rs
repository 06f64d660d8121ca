//! RTTTL ringtone parsing and tone rendering

pub mod generator;
pub mod pipeline;
pub mod wav;

pub use pipeline::{
    parse, to_tone_sequence, to_tone_sequence_with, Note, ParseError, Ringtone, SequencerConfig,
    ToneEvent,
};
