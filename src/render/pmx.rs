//! PMX output
//!
//! Note format, see PMX manual section 2.2.1:
//!
//! ```text
//! [( ]<note><basic-time-value><octave>[x3][d][<accidental>][ )]
//! ```
//!
//! - `<note>`: a-g
//! - `<basic-time-value>`: 0 whole, 2 half, 4 quarter, 8 eighth, 1 sixteenth
//! - `x3`: first note of a triplet
//! - `d`: dot
//! - `<accidental>`: s sharp, f flat

use std::io::Write;

use crate::config::PmxLayout;
use crate::parser::song_parser::{Meter, NoteEvent, SongEvent, TieRole};
use crate::parser::symbols::{Accidental, DurationSpecifier};
use crate::render::Renderer;
use crate::GodsongError;

pub struct PmxRenderer {
    layout: PmxLayout,
    triplet_open: bool,
    tie_open: bool,
}

impl PmxRenderer {
    pub const fn new(layout: PmxLayout) -> Self {
        Self {
            layout,
            triplet_open: false,
            tie_open: false,
        }
    }

    const fn duration_code(duration: DurationSpecifier) -> char {
        match duration {
            DurationSpecifier::Whole => '0',
            DurationSpecifier::Half => '2',
            DurationSpecifier::Quarter => '4',
            DurationSpecifier::Eighth => '8',
            DurationSpecifier::Sixteenth => '1',
        }
    }

    const fn accidental_code(accidental: Accidental) -> char {
        match accidental {
            Accidental::Sharp => 's',
            Accidental::Flat => 'f',
        }
    }

    /// Note without its tie brackets, e.g. `c44` or `e81x3s`
    pub fn note_token(note: &NoteEvent) -> String {
        let mut token = String::with_capacity(8);
        token.push(note.pitch.to_lowercase());
        token.push(Self::duration_code(note.duration.base));
        token.push_str(&note.octave.to_string());
        if note.duration.triplet == Some(1) {
            token.push_str("x3");
        }
        if note.duration.dotted {
            token.push('d');
        }
        if let Some(accidental) = note.accidental {
            token.push(Self::accidental_code(accidental));
        }
        token
    }

    /// Meter fields: mtrnuml, mtrdenl, mtrnmp, mtrdnp
    fn meter_fields(meter: Meter, separator: char) -> String {
        let Meter { top, bottom } = meter;
        format!("{top}{separator}{bottom}{separator}{top}{separator}{bottom}")
    }
}

impl Renderer for PmxRenderer {
    fn write_header(&mut self, out: &mut dyn Write) -> Result<(), GodsongError> {
        let layout = &self.layout;
        // nv, noinst, meter, xmtrnum0, isig
        writeln!(
            out,
            "{} {} {} 0 0",
            layout.staves,
            layout.instruments,
            Self::meter_fields(Meter::default(), ' ')
        )?;
        // npages, nsyst, musicsize, fracindent
        writeln!(
            out,
            "{} {} {} {}",
            layout.pages, layout.systems, layout.music_size, layout.fractional_indent
        )?;
        // blank instrument name
        writeln!(out)?;
        writeln!(out, "{}", layout.clef)?;
        writeln!(out, "{}", layout.output_path)?;
        writeln!(out)?;
        Ok(())
    }

    fn write_event(
        &mut self,
        out: &mut dyn Write,
        event: &SongEvent,
    ) -> Result<(), GodsongError> {
        match event {
            SongEvent::Note(note) => {
                if note.tie == TieRole::Open {
                    write!(out, "( ")?;
                }
                write!(out, "{}", Self::note_token(note))?;
                if note.tie == TieRole::Close {
                    write!(out, " )")?;
                }
                write!(out, " ")?;
                match note.tie {
                    TieRole::Open => self.tie_open = true,
                    TieRole::Close => self.tie_open = false,
                    TieRole::None => (),
                }
                match note.duration.triplet {
                    Some(1) => self.triplet_open = true,
                    Some(3) => self.triplet_open = false,
                    _ => (),
                }
            }
            SongEvent::MeterChange(meter) => {
                write!(out, "m{} ", Self::meter_fields(*meter, '/'))?;
            }
            SongEvent::StaffBreak => writeln!(out, "/")?,
        }
        Ok(())
    }

    fn write_footer(&mut self, out: &mut dyn Write) -> Result<(), GodsongError> {
        if self.triplet_open {
            log::warn!("Song ends inside a triplet group");
        }
        if self.tie_open {
            log::warn!("Song ends on an open tie, closing it");
            write!(out, ") ")?;
            self.tie_open = false;
        }
        writeln!(out)?;
        Ok(())
    }
}
