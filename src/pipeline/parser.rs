//! Parser for the RTTTL ringtone format
//!
//! Format:
//! <name>:<settings>:<notes>
//!
//! Settings (comma-separated `key=value`):
//! - d: default duration (4 = quarter note, 8 = eighth, ...)
//! - o: default octave
//! - b: beats per minute
//!
//! Notes (comma-separated):
//! [duration][.]<pitch>[#][.][octave][.]   (e.g., 16e6, 4.g6, 8p, a#)
//!
//! - Pitches: a-g, p for a pause
//! - Duration: one or two digits
//! - Octave: a single digit, the default octave when omitted

use std::str::FromStr;

use thiserror::Error;

/// A parsed ringtone
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Ringtone {
    /// First section, kept verbatim
    pub name: String,
    pub default_duration: u32,
    pub default_octave: i32,
    pub bpm: u32,
    /// Notes in playback order
    pub notes: Vec<Note>,
}

/// A single note (or pause) of a ringtone
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Note {
    /// Duration denominator, 0 when the token carries no duration digits
    pub duration: u32,
    /// Uppercase pitch name ("A", "C#", ...) or "P" for a pause
    pub pitch: String,
    pub octave: i32,
    pub dotted: bool,
}

impl Note {
    /// Check if this note is a pause
    pub fn is_rest(&self) -> bool {
        self.pitch == "P"
    }
}

/// Parse errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    #[error("invalid rtttl string: expected 3 sections, found {0}")]
    MalformedSections(usize),
    #[error("invalid settings format: {0:?}")]
    MalformedSetting(String),
    #[error("invalid number: {0:?}")]
    InvalidNumber(String),
    #[error("invalid format: expected pitch but found {0:?}")]
    ExpectedPitch(char),
    #[error("invalid octave specifier: {0:?}")]
    InvalidOctave(char),
    #[error("unexpected end of note")]
    UnexpectedEnd,
}

/// Character cursor over a single note token
struct Cursor {
    chars: Vec<char>,
    pos: usize,
}

impl Cursor {
    fn new(token: &str) -> Self {
        Self {
            chars: token.chars().collect(),
            pos: 0,
        }
    }

    fn peek(&self) -> Option<char> {
        self.chars.get(self.pos).copied()
    }

    fn advance(&mut self) -> Option<char> {
        let c = self.peek()?;
        self.pos += 1;
        Some(c)
    }

    /// Consume the next character only if it matches
    fn next_if(&mut self, pred: impl Fn(char) -> bool) -> Option<char> {
        match self.peek() {
            Some(c) if pred(c) => {
                self.pos += 1;
                Some(c)
            }
            _ => None,
        }
    }

    fn skip_dot(&mut self) -> bool {
        self.next_if(|c| c == '.').is_some()
    }
}

fn digit_value(c: char) -> u32 {
    c.to_digit(10).unwrap_or(0)
}

/// Parse a single note token
///
/// The token is trimmed and uppercased before scanning. `default_octave`
/// is used when the token has no octave digit; the duration is left at 0
/// when the token has no duration digits.
///
/// # Example
/// ```
/// use rtttl::pipeline::parser::parse_note;
///
/// let note = parse_note("4.g6", 5).unwrap();
/// assert_eq!(note.duration, 4);
/// assert_eq!(note.pitch, "G");
/// assert_eq!(note.octave, 6);
/// assert!(note.dotted);
/// ```
pub fn parse_note(token: &str, default_octave: i32) -> Result<Note, ParseError> {
    let token = token.trim_matches(' ').to_uppercase();
    let mut cursor = Cursor::new(&token);

    // Duration: one digit, or two for 16 and 32
    let mut duration = 0;
    if let Some(first) = cursor.next_if(|c| c.is_ascii_digit()) {
        duration = digit_value(first);
        if let Some(second) = cursor.next_if(|c| c.is_ascii_digit()) {
            duration = duration * 10 + digit_value(second);
        }
    }

    let mut dotted = cursor.skip_dot();

    let letter = cursor.advance().ok_or(ParseError::UnexpectedEnd)?;
    if !letter.is_alphabetic() {
        return Err(ParseError::ExpectedPitch(letter));
    }

    let mut pitch = String::from(letter);
    if let Some(sharp) = cursor.next_if(|c| c == '#') {
        pitch.push(sharp);
    }

    dotted |= cursor.skip_dot();

    let octave = match cursor.advance() {
        None => default_octave,
        Some(c) if c.is_ascii_digit() => digit_value(c) as i32,
        Some(c) => return Err(ParseError::InvalidOctave(c)),
    };

    dotted |= cursor.skip_dot();

    Ok(Note {
        duration,
        pitch,
        octave,
        dotted,
    })
}

fn parse_number<T: FromStr>(value: &str) -> Result<T, ParseError> {
    value
        .parse()
        .map_err(|_| ParseError::InvalidNumber(value.to_string()))
}

/// Parse the settings section into the ringtone defaults
fn parse_settings(section: &str, ringtone: &mut Ringtone) -> Result<(), ParseError> {
    for setting in section.split(',') {
        let parts: Vec<&str> = setting.split('=').collect();
        if parts.len() != 2 {
            return Err(ParseError::MalformedSetting(setting.to_string()));
        }

        let value = parts[1];
        match parts[0].trim_matches(' ') {
            "d" => ringtone.default_duration = parse_number(value)?,
            "o" => ringtone.default_octave = parse_number(value)?,
            "b" => ringtone.bpm = parse_number(value)?,
            _ => {}
        }
    }

    Ok(())
}

/// Parse a complete RTTTL string
///
/// # Example
/// ```
/// use rtttl::pipeline::parser::parse;
///
/// let ringtone = parse("Beep:d=4,o=5,b=120:8c6,8p,8c6").unwrap();
/// assert_eq!(ringtone.name, "Beep");
/// assert_eq!(ringtone.bpm, 120);
/// assert_eq!(ringtone.notes.len(), 3);
/// ```
pub fn parse(input: &str) -> Result<Ringtone, ParseError> {
    let sections: Vec<&str> = input.split(':').collect();
    if sections.len() != 3 {
        return Err(ParseError::MalformedSections(sections.len()));
    }

    let mut ringtone = Ringtone {
        name: sections[0].to_string(),
        ..Default::default()
    };

    parse_settings(sections[1], &mut ringtone)?;

    ringtone.notes = sections[2]
        .split(',')
        .map(|token| parse_note(token, ringtone.default_octave))
        .collect::<Result<Vec<_>, _>>()?;

    Ok(ringtone)
}

impl FromStr for Ringtone {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const HAUNT_HOUSE: &str = "HauntHouse: d=4,o=5,b=108: 2a4, 2e, 2d#, 2b4, 2a4, 2c, 2d, 2a#4, 2e., e, 1f4, 1a4, 1d#, 2e., d, 2c., b4, 1a4, 1p";

    fn note(duration: u32, pitch: &str, octave: i32, dotted: bool) -> Note {
        Note {
            duration,
            pitch: pitch.to_string(),
            octave,
            dotted,
        }
    }

    #[test]
    fn test_parse_settings() {
        let ringtone = parse(HAUNT_HOUSE).unwrap();
        assert_eq!(ringtone.name, "HauntHouse");
        assert_eq!(ringtone.default_duration, 4);
        assert_eq!(ringtone.default_octave, 5);
        assert_eq!(ringtone.bpm, 108);
        assert_eq!(ringtone.notes.len(), 19);
    }

    #[test]
    fn test_name_is_verbatim() {
        let ringtone = parse(" Haunt House :d=4,o=5,b=108:a").unwrap();
        assert_eq!(ringtone.name, " Haunt House ");
    }

    #[test]
    fn test_notes_keep_source_order() {
        let ringtone = parse(HAUNT_HOUSE).unwrap();
        assert_eq!(ringtone.notes[0], note(2, "A", 4, false));
        assert_eq!(ringtone.notes[1], note(2, "E", 5, false));
        assert_eq!(ringtone.notes[2], note(2, "D#", 5, false));
        assert_eq!(ringtone.notes[7], note(2, "A#", 4, false));
        assert_eq!(ringtone.notes[8], note(2, "E", 5, true));
        assert!(ringtone.notes[18].is_rest());
    }

    #[test]
    fn test_parse_note_two_digit_duration() {
        assert_eq!(parse_note("16E6", 5).unwrap(), note(16, "E", 6, false));
        assert_eq!(parse_note("32f7", 5).unwrap(), note(32, "F", 7, false));
    }

    #[test]
    fn test_parse_note_dot_positions() {
        assert_eq!(parse_note("4.G6", 5).unwrap(), note(4, "G", 6, true));
        assert_eq!(parse_note("4g.6", 5).unwrap(), note(4, "G", 6, true));
        assert_eq!(parse_note("4g6.", 5).unwrap(), note(4, "G", 6, true));
        assert_eq!(parse_note("4c#.", 5).unwrap(), note(4, "C#", 5, true));
        assert_eq!(parse_note("4.c.5.", 5).unwrap(), note(4, "C", 5, true));
    }

    #[test]
    fn test_parse_note_defaults() {
        // Octave falls back to the default, duration stays unresolved
        assert_eq!(parse_note("e", 5).unwrap(), note(0, "E", 5, false));
        assert_eq!(parse_note(" a# ", 6).unwrap(), note(0, "A#", 6, false));
        assert_eq!(parse_note("8P", 5).unwrap(), note(8, "P", 5, false));
    }

    #[test]
    fn test_parse_note_third_digit_is_octave() {
        // Duration is never more than two digits
        assert_eq!(
            parse_note("123", 5).unwrap_err(),
            ParseError::ExpectedPitch('3')
        );
    }

    #[test]
    fn test_parse_note_missing_pitch() {
        assert_eq!(parse_note("16", 5).unwrap_err(), ParseError::UnexpectedEnd);
        assert_eq!(parse_note("", 5).unwrap_err(), ParseError::UnexpectedEnd);
        assert_eq!(
            parse_note("4#c", 5).unwrap_err(),
            ParseError::ExpectedPitch('#')
        );
    }

    #[test]
    fn test_parse_note_invalid_octave() {
        assert_eq!(
            parse_note("4c##", 5).unwrap_err(),
            ParseError::InvalidOctave('#')
        );
        assert_eq!(
            parse_note("4cx", 5).unwrap_err(),
            ParseError::InvalidOctave('X')
        );
    }

    #[test]
    fn test_invalid_sections() {
        assert_eq!(
            parse("d=4,o=5,b=108:a").unwrap_err(),
            ParseError::MalformedSections(2)
        );
        assert_eq!(
            parse("a:b:c:d").unwrap_err(),
            ParseError::MalformedSections(4)
        );
    }

    #[test]
    fn test_invalid_settings() {
        assert_eq!(
            parse("T:d=x:a").unwrap_err(),
            ParseError::InvalidNumber("x".to_string())
        );
        assert_eq!(
            parse("T:d=4,o5:a").unwrap_err(),
            ParseError::MalformedSetting("o5".to_string())
        );
        assert_eq!(
            parse("T:d=4=4:a").unwrap_err(),
            ParseError::MalformedSetting("d=4=4".to_string())
        );
    }

    #[test]
    fn test_unknown_and_missing_settings() {
        let ringtone = parse("T: l=15 , b=90:a").unwrap();
        assert_eq!(ringtone.bpm, 90);
        assert_eq!(ringtone.default_duration, 0);
        assert_eq!(ringtone.default_octave, 0);
        assert_eq!(ringtone.notes[0].octave, 0);
    }

    #[test]
    fn test_bad_note_fails_whole_ringtone() {
        assert_eq!(
            parse("T:d=4,o=5,b=120:4c,4d,4z?,4e").unwrap_err(),
            ParseError::InvalidOctave('?')
        );
        // Trailing comma leaves an empty token
        assert_eq!(
            parse("T:d=4,o=5,b=120:4c,").unwrap_err(),
            ParseError::UnexpectedEnd
        );
    }

    #[test]
    fn test_from_str() {
        let ringtone: Ringtone = "T:d=4,o=5,b=120:4c6".parse().unwrap();
        assert_eq!(ringtone.notes, vec![note(4, "C", 6, false)]);
    }
}
