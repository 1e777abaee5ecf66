//! LilyPond output
//!
//! Note format:
//!
//! ```text
//! <note>[<accidental>]<octave><basic-time-value>[.][~]
//! ```
//!
//! - `<accidental>`: is sharp, es flat
//! - `<octave>`: nothing for octave 3, one `'` per octave above, one `,` per octave below
//! - `<basic-time-value>`: 1, 2, 4, 8, 16
//! - `~`: tie with the next note
//!
//! Triplets are wrapped in `\tuplet 3/2 { ... }`.

use std::cmp::Ordering;
use std::io::Write;

use crate::parser::song_parser::{NoteEvent, SongEvent, TieRole, TRIPLET_SIZE};
use crate::parser::symbols::Accidental;
use crate::render::Renderer;
use crate::GodsongError;

/// Octave written without any mark (the one below middle C)
pub const REFERENCE_OCTAVE: u8 = 3;

pub struct LilyPondRenderer {
    version: String,
    in_tuplet: bool,
    tie_open: bool,
}

impl LilyPondRenderer {
    pub const fn new(version: String) -> Self {
        Self {
            version,
            in_tuplet: false,
            tie_open: false,
        }
    }

    const fn accidental_suffix(accidental: Option<Accidental>) -> &'static str {
        match accidental {
            None => "",
            Some(Accidental::Sharp) => "is",
            Some(Accidental::Flat) => "es",
        }
    }

    pub fn octave_marks(octave: u8) -> String {
        match octave.cmp(&REFERENCE_OCTAVE) {
            Ordering::Greater => "'".repeat(usize::from(octave - REFERENCE_OCTAVE)),
            Ordering::Less => ",".repeat(usize::from(REFERENCE_OCTAVE - octave)),
            Ordering::Equal => String::new(),
        }
    }

    /// Note without the tuplet brackets, e.g. `cis''8.~`
    pub fn note_token(note: &NoteEvent) -> String {
        format!(
            "{}{}{}{}{}{}",
            note.pitch.to_lowercase(),
            Self::accidental_suffix(note.accidental),
            Self::octave_marks(note.octave),
            note.duration.value(),
            if note.duration.dotted { "." } else { "" },
            if note.tie == TieRole::Open { "~" } else { "" },
        )
    }
}

impl Renderer for LilyPondRenderer {
    fn write_header(&mut self, out: &mut dyn Write) -> Result<(), GodsongError> {
        write!(out, "\\version \"{}\"\n{{\n", self.version)?;
        Ok(())
    }

    fn write_event(
        &mut self,
        out: &mut dyn Write,
        event: &SongEvent,
    ) -> Result<(), GodsongError> {
        match event {
            SongEvent::Note(note) => {
                if note.duration.triplet == Some(1) {
                    write!(out, "\\tuplet 3/2 {{ ")?;
                    self.in_tuplet = true;
                }
                write!(out, "{}", Self::note_token(note))?;
                match note.tie {
                    TieRole::Open => self.tie_open = true,
                    TieRole::Close => self.tie_open = false,
                    TieRole::None => (),
                }
                if note.duration.triplet == Some(TRIPLET_SIZE) {
                    write!(out, " }}")?;
                    self.in_tuplet = false;
                }
                write!(out, " ")?;
            }
            SongEvent::MeterChange(meter) => {
                write!(out, "\\time {}/{} ", meter.top, meter.bottom)?;
            }
            SongEvent::StaffBreak => writeln!(out)?,
        }
        Ok(())
    }

    fn write_footer(&mut self, out: &mut dyn Write) -> Result<(), GodsongError> {
        // a dangling `~` only makes LilyPond warn, the score stays valid
        if self.tie_open {
            log::warn!("Song ends on an open tie");
            self.tie_open = false;
        }
        if self.in_tuplet {
            log::warn!("Song ends inside a triplet group, closing it");
            write!(out, "}} ")?;
            self.in_tuplet = false;
        }
        writeln!(out, "}}")?;
        Ok(())
    }
}
