use crate::parser::primitive_parser::{parse_pitch, parse_prefix, Prefix};
use crate::parser::symbols::{Accidental, DurationModifier, DurationSpecifier};
use crate::GodsongError;
use std::collections::VecDeque;

// TempleOS `Play` documentation: notes are capital letters, octaves are digits
// (middle C is octave 4), durations and octaves stay set until changed.

pub const QUARTER_TIME: u32 = 960;
pub const DEFAULT_OCTAVE: u8 = 4;
pub const TRIPLET_SIZE: u8 = 3;

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Pitch {
    A,
    B,
    C,
    D,
    E,
    F,
    G,
}

impl Pitch {
    pub const fn from_char(c: char) -> Option<Self> {
        match c {
            'A' => Some(Self::A),
            'B' => Some(Self::B),
            'C' => Some(Self::C),
            'D' => Some(Self::D),
            'E' => Some(Self::E),
            'F' => Some(Self::F),
            'G' => Some(Self::G),
            _ => None,
        }
    }

    /// Both engraving targets spell note names in lowercase
    pub const fn to_lowercase(self) -> char {
        match self {
            Self::A => 'a',
            Self::B => 'b',
            Self::C => 'c',
            Self::D => 'd',
            Self::E => 'e',
            Self::F => 'f',
            Self::G => 'g',
        }
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct Meter {
    pub top: u8,
    pub bottom: u8,
}

impl Default for Meter {
    fn default() -> Self {
        Self { top: 4, bottom: 4 }
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Default)]
pub struct Duration {
    pub base: DurationSpecifier,
    pub dotted: bool,
    /// Position (1 to 3) inside a triplet group
    pub triplet: Option<u8>,
}

impl Duration {
    pub const fn value(&self) -> u16 {
        self.base.value()
    }

    pub fn time(&self) -> u32 {
        let mut time = QUARTER_TIME * 4 / u32::from(self.value());
        if self.dotted {
            time += time / 2;
        }
        if self.triplet.is_some() {
            time = time * 2 / 3;
        }
        time
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Default)]
pub enum TieRole {
    #[default]
    None,
    Open,
    Close,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NoteEvent {
    pub pitch: Pitch,
    pub octave: u8,
    pub duration: Duration,
    pub accidental: Option<Accidental>,
    pub tie: TieRole,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SongEvent {
    Note(NoteEvent),
    MeterChange(Meter),
    StaffBreak,
}

/// Tie progression: a tie-open decays to close on the next note, then to none.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Default)]
pub enum TieStatus {
    #[default]
    None,
    Open,
    Close,
}

/// Musical state persisting across note-units within one parsing pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParserState {
    pub octave: u8,
    pub duration: DurationSpecifier,
    pub meter: Meter,
    pub tie: TieStatus,
    triplet_open: bool,
    triplet_position: u8,
    // only affect the next note
    dotted: bool,
    accidental: Option<Accidental>,
}

impl Default for ParserState {
    fn default() -> Self {
        Self {
            octave: DEFAULT_OCTAVE,
            duration: DurationSpecifier::default(),
            meter: Meter::default(),
            tie: TieStatus::None,
            triplet_open: false,
            triplet_position: 0,
            dotted: false,
            accidental: None,
        }
    }
}

impl ParserState {
    pub const fn in_triplet(&self) -> bool {
        self.triplet_open
    }

    /// Forget the prefixes of a note-unit that did not produce a note
    fn discard_note_prefixes(&mut self) {
        self.dotted = false;
        self.accidental = None;
        if self.tie == TieStatus::Open {
            self.tie = TieStatus::None;
        }
    }

    fn next_note(&mut self, pitch: Pitch) -> NoteEvent {
        let tie = match self.tie {
            TieStatus::None => TieRole::None,
            TieStatus::Open => {
                self.tie = TieStatus::Close;
                TieRole::Open
            }
            TieStatus::Close => {
                self.tie = TieStatus::None;
                TieRole::Close
            }
        };

        let triplet = if self.triplet_open {
            self.triplet_position += 1;
            let position = self.triplet_position;
            if position == TRIPLET_SIZE {
                self.triplet_open = false;
                self.triplet_position = 0;
            }
            Some(position)
        } else {
            None
        };

        let duration = Duration {
            base: self.duration,
            dotted: std::mem::take(&mut self.dotted),
            triplet,
        };

        NoteEvent {
            pitch,
            octave: self.octave,
            duration,
            accidental: self.accidental.take(),
            tie,
        }
    }
}

/// Lazy single pass decoder over a normalized song.
///
/// Yields note, meter and staff break events in source order. Invalid notes
/// and grammar table misses are yielded as errors, the iterator then resumes
/// after the offending character. Error positions count characters of the
/// normalized song it was given, not of the original source.
pub struct SongParser<'a> {
    input: &'a str,
    line: usize,
    column: usize,
    state: ParserState,
    pending: VecDeque<Result<SongEvent, GodsongError>>,
}

impl<'a> SongParser<'a> {
    pub fn new(song: &'a str) -> Self {
        Self {
            input: song,
            line: 1,
            column: 1,
            state: ParserState::default(),
            pending: VecDeque::new(),
        }
    }

    pub const fn state(&self) -> &ParserState {
        &self.state
    }

    fn advance(&mut self, rest: &'a str) {
        let consumed = &self.input[..self.input.len() - rest.len()];
        for c in consumed.chars() {
            if c == '\n' {
                self.line += 1;
                self.column = 1;
            } else {
                self.column += 1;
            }
        }
        self.input = rest;
    }

    fn apply_prefix(&mut self, prefix: Prefix) -> Result<(), GodsongError> {
        log::debug!("Prefix {prefix:?}");
        match prefix {
            Prefix::TieOpen => {
                if self.state.tie == TieStatus::Close {
                    log::warn!(
                        "Tie at line {} column {} would span more than two notes, ignoring it",
                        self.line,
                        self.column
                    );
                } else {
                    self.state.tie = TieStatus::Open;
                }
            }
            Prefix::Meter { top, bottom } => {
                if let Some(top) = top {
                    self.state.meter.top = top;
                }
                if let Some(bottom) = bottom {
                    self.state.meter.bottom = bottom;
                }
                self.pending
                    .push_back(Ok(SongEvent::MeterChange(self.state.meter)));
            }
            Prefix::Octave(octave) => self.state.octave = octave,
            Prefix::Duration(c) => {
                self.state.duration = DurationSpecifier::try_from(c)?;
                self.state.dotted = false;
            }
            Prefix::Modifier(c) => match DurationModifier::try_from(c)? {
                DurationModifier::Triplet => self.state.triplet_open = true,
                DurationModifier::Dot => self.state.dotted = true,
            },
            Prefix::Accidental(c) => self.state.accidental = Some(Accidental::try_from(c)?),
        }
        Ok(())
    }

    /// Decode prefixes until a pitch letter, a newline or the end of the song.
    fn decode_note_unit(&mut self) -> Result<Option<NoteEvent>, GodsongError> {
        while let Ok((rest, prefix)) = parse_prefix(self.input) {
            self.advance(rest);
            self.apply_prefix(prefix)?;
        }

        if self.input.is_empty() || self.input.starts_with('\n') {
            // pending prefixes carry over to the next note-unit
            return Ok(None);
        }

        let (line, column) = (self.line, self.column);
        if let Ok((rest, pitch)) = parse_pitch(self.input) {
            self.advance(rest);
            let note = self.state.next_note(pitch);
            log::debug!("Note {note:?}");
            return Ok(Some(note));
        }

        let mut chars = self.input.chars();
        let letter = chars.next().unwrap_or_default();
        self.advance(chars.as_str());
        self.state.discard_note_prefixes();
        Err(GodsongError::InvalidNoteLetter {
            letter,
            line,
            column,
        })
    }
}

impl Iterator for SongParser<'_> {
    type Item = Result<SongEvent, GodsongError>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some(event) = self.pending.pop_front() {
                return Some(event);
            }
            if self.input.is_empty() {
                return None;
            }
            if let Some(rest) = self.input.strip_prefix('\n') {
                self.advance(rest);
                return Some(Ok(SongEvent::StaffBreak));
            }
            match self.decode_note_unit() {
                Ok(Some(note)) => self.pending.push_back(Ok(SongEvent::Note(note))),
                Ok(None) => (),
                Err(err) => self.pending.push_back(Err(err)),
            }
        }
    }
}

/// Parse a whole normalized song eagerly
pub fn parse_song(song: &str) -> Vec<Result<SongEvent, GodsongError>> {
    SongParser::new(song).collect()
}
