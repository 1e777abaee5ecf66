//! Engraving back-ends, both consume the same [`SongEvent`] stream.

pub mod lilypond;
pub mod pmx;

use std::io::Write;

use crate::config::Config;
use crate::parser::song_parser::SongEvent;
use crate::render::lilypond::LilyPondRenderer;
use crate::render::pmx::PmxRenderer;
use crate::GodsongError;

/// Single pass writer of a transcoded song.
///
/// `write_header` is called once before the first event, every event is
/// passed exactly once in arrival order, `write_footer` closes the score.
pub trait Renderer {
    fn write_header(&mut self, out: &mut dyn Write) -> Result<(), GodsongError>;
    fn write_event(&mut self, out: &mut dyn Write, event: &SongEvent)
        -> Result<(), GodsongError>;
    fn write_footer(&mut self, out: &mut dyn Write) -> Result<(), GodsongError>;
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum OutputFormat {
    Pmx,
    LilyPond,
}

impl OutputFormat {
    pub fn renderer(self, config: &Config) -> Box<dyn Renderer> {
        match self {
            Self::Pmx => Box::new(PmxRenderer::new(config.pmx.clone())),
            Self::LilyPond => Box::new(LilyPondRenderer::new(config.lilypond_version.clone())),
        }
    }
}

/// Render already parsed events into a complete score
pub fn render_to_string(
    renderer: &mut dyn Renderer,
    events: &[SongEvent],
) -> Result<String, GodsongError> {
    let mut out = Vec::new();
    renderer.write_header(&mut out)?;
    for event in events {
        renderer.write_event(&mut out, event)?;
    }
    renderer.write_footer(&mut out)?;
    Ok(String::from_utf8_lossy(&out).into_owned())
}
