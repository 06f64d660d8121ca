//! Tone sequencer
//!
//! Converts parsed notes into timed tone events: a frequency (or silence)
//! and a duration in milliseconds, in playback order.

use crate::pipeline::parser::{Note, Ringtone};

/// Octave the frequency table is expressed in
pub const REFERENCE_OCTAVE: i32 = 4;

/// A playable unit handed to the renderer
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ToneEvent {
    pub is_silence: bool,
    pub frequency_hz: f64,
    pub duration_ms: f64,
}

impl ToneEvent {
    pub fn tone(frequency_hz: f64, duration_ms: f64) -> Self {
        Self {
            is_silence: false,
            frequency_hz,
            duration_ms,
        }
    }

    pub fn silence(duration_ms: f64) -> Self {
        Self {
            is_silence: true,
            frequency_hz: 0.0,
            duration_ms,
        }
    }
}

/// Sequencer settings
#[derive(Debug, Clone, Default)]
pub struct SequencerConfig {
    /// Substitute the ringtone's default duration for notes without
    /// duration digits. When false such notes keep a zero denominator and
    /// come out with an infinite length.
    pub inherit_default_duration: bool,
}

/// Base frequency of a pitch name in the reference octave
pub fn base_frequency(pitch: &str) -> Option<f64> {
    let frequency = match pitch {
        "A" => 440.00,
        "A#" => 466.16,
        "B" => 493.88,
        "C" => 261.63,
        "C#" => 277.18,
        "D" => 293.66,
        "D#" => 311.13,
        "E" => 329.63,
        "F" => 349.23,
        "F#" => 369.99,
        "G" => 392.00,
        "G#" => 415.30,
        "P" => 0.0,
        _ => return None,
    };
    Some(frequency)
}

/// Frequency for a pitch at the given octave
///
/// Formula: f = base + base * 2^(octave - 4)
///
/// The added base term puts every note one octave above equal
/// temperament. Unknown pitch names have a base of 0 Hz.
pub fn note_frequency(pitch: &str, octave: i32) -> f64 {
    let base = base_frequency(pitch).unwrap_or(0.0);
    base + base * 2f64.powi(octave - REFERENCE_OCTAVE)
}

/// Duration denominator after applying the dot
///
/// A dot adds half the note's value, approximated with truncating
/// integer division on the denominator: 4 -> 2, 3 -> 2, 8 -> 4.
pub fn effective_duration(duration: u32, dotted: bool) -> u32 {
    if dotted {
        duration - duration / 2
    } else {
        duration
    }
}

/// Length of a note in milliseconds, a quarter note being one beat
pub fn note_length_ms(bpm: u32, effective_duration: u32) -> f64 {
    (60.0 / bpm as f64) / effective_duration as f64 * 4.0 * 1000.0
}

fn note_event(note: &Note, ringtone: &Ringtone, config: &SequencerConfig) -> ToneEvent {
    let raw = if note.duration == 0 && config.inherit_default_duration {
        ringtone.default_duration
    } else {
        note.duration
    };
    let duration_ms = note_length_ms(ringtone.bpm, effective_duration(raw, note.dotted));

    if note.is_rest() {
        ToneEvent::silence(duration_ms)
    } else {
        ToneEvent::tone(note_frequency(&note.pitch, note.octave), duration_ms)
    }
}

/// Convert a ringtone into tone events with the given settings
pub fn to_tone_sequence_with(ringtone: &Ringtone, config: &SequencerConfig) -> Vec<ToneEvent> {
    ringtone
        .notes
        .iter()
        .map(|note| note_event(note, ringtone, config))
        .collect()
}

/// Convert a ringtone into tone events
///
/// # Example
/// ```
/// use rtttl::pipeline::parser::parse;
/// use rtttl::pipeline::sequencer::to_tone_sequence;
///
/// let ringtone = parse("T:d=4,o=5,b=120:4c6,8p").unwrap();
/// let events = to_tone_sequence(&ringtone);
/// assert_eq!(events[0].duration_ms, 500.0);
/// assert!(events[1].is_silence);
/// ```
pub fn to_tone_sequence(ringtone: &Ringtone) -> Vec<ToneEvent> {
    to_tone_sequence_with(ringtone, &SequencerConfig::default())
}

/// Total playback time of a sequence in milliseconds
pub fn total_duration_ms(events: &[ToneEvent]) -> f64 {
    events.iter().map(|e| e.duration_ms).sum()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pipeline::parser::parse;

    #[test]
    fn test_single_tone() {
        let ringtone = parse("T:d=4,o=5,b=120:4c6").unwrap();
        let events = to_tone_sequence(&ringtone);

        assert_eq!(events.len(), 1);
        assert!(!events[0].is_silence);
        assert_eq!(events[0].duration_ms, 500.0);
        assert!((events[0].frequency_hz - (261.63 + 261.63 * 4.0)).abs() < 1e-9);
    }

    #[test]
    fn test_rest_is_silence() {
        let ringtone = parse("T:d=4,o=5,b=120:8p").unwrap();
        let events = to_tone_sequence(&ringtone);

        assert_eq!(events, vec![ToneEvent::silence(250.0)]);
    }

    #[test]
    fn test_effective_duration_truncates() {
        assert_eq!(effective_duration(4, true), 2);
        assert_eq!(effective_duration(3, true), 2);
        assert_eq!(effective_duration(8, true), 4);
        assert_eq!(effective_duration(1, true), 1);
        assert_eq!(effective_duration(3, false), 3);
    }

    #[test]
    fn test_dotted_note_length() {
        let ringtone = parse("T:d=4,o=5,b=120:4.g").unwrap();
        let events = to_tone_sequence(&ringtone);

        // 4. plays as a half note under the truncating rule
        assert_eq!(events[0].duration_ms, 1000.0);
    }

    #[test]
    fn test_octave_scaling() {
        // Reference octave sounds at twice the table value
        assert_eq!(note_frequency("A", 4), 880.0);
        assert_eq!(note_frequency("A", 5), 440.0 + 880.0);
        assert_eq!(note_frequency("A", 3), 440.0 + 220.0);
        assert_eq!(note_frequency("P", 6), 0.0);
        assert_eq!(note_frequency("H", 5), 0.0);
    }

    #[test]
    fn test_base_frequency_table() {
        assert_eq!(base_frequency("C#"), Some(277.18));
        assert_eq!(base_frequency("G#"), Some(415.30));
        assert_eq!(base_frequency("E#"), None);
    }

    #[test]
    fn test_missing_duration_is_not_inherited() {
        // Notes without duration digits keep a zero denominator, so their
        // length is unbounded unless inheritance is turned on
        let ringtone = parse("T:d=4,o=5,b=120:e,8e").unwrap();

        let events = to_tone_sequence(&ringtone);
        assert!(events[0].duration_ms.is_infinite());
        assert_eq!(events[1].duration_ms, 250.0);

        let config = SequencerConfig {
            inherit_default_duration: true,
        };
        let events = to_tone_sequence_with(&ringtone, &config);
        assert_eq!(events[0].duration_ms, 500.0);
        assert_eq!(events[1].duration_ms, 250.0);
    }

    #[test]
    fn test_inherited_duration_applies_dot() {
        let ringtone = parse("T:d=8,o=5,b=120:e.").unwrap();
        let config = SequencerConfig {
            inherit_default_duration: true,
        };
        let events = to_tone_sequence_with(&ringtone, &config);

        // 8 dotted -> 4
        assert_eq!(events[0].duration_ms, 500.0);
    }

    #[test]
    fn test_total_duration() {
        let ringtone = parse("T:d=4,o=5,b=120:4c,8p,8d,2e").unwrap();
        let events = to_tone_sequence(&ringtone);

        assert_eq!(total_duration_ms(&events), 500.0 + 250.0 + 250.0 + 1000.0);
    }
}
