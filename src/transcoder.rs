use std::io::{Read, Write};

use crate::config::{Config, ErrorPolicy};
use crate::parser::reader::{normalize, read_song};
use crate::parser::song_parser::{SongEvent, SongParser};
use crate::render::{OutputFormat, Renderer};
use crate::GodsongError;

/// What a transcoding pass went through
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct TranscodeSummary {
    pub notes: usize,
    pub meter_changes: usize,
    pub staff_breaks: usize,
    /// Recoverable errors that were skipped
    pub warnings: usize,
    /// Total song length, see `QUARTER_TIME`
    pub ticks: u64,
}

impl TranscodeSummary {
    fn record(&mut self, event: &SongEvent) {
        match event {
            SongEvent::Note(note) => {
                self.notes += 1;
                self.ticks += u64::from(note.duration.time());
            }
            SongEvent::MeterChange(_) => self.meter_changes += 1,
            SongEvent::StaffBreak => self.staff_breaks += 1,
        }
    }
}

/// Read a whole song from `src` and write it to `dst` in `format`.
pub fn transcode<R: Read, W: Write>(
    src: R,
    mut dst: W,
    format: OutputFormat,
    config: &Config,
) -> Result<TranscodeSummary, GodsongError> {
    let song = read_song(src)?;
    let mut renderer = format.renderer(config);
    let summary = write_song(&song, renderer.as_mut(), &mut dst, config.lookup_errors)?;
    dst.flush()?;
    Ok(summary)
}

/// Transcode an in-memory song
pub fn transcode_str(
    song: &str,
    format: OutputFormat,
    config: &Config,
) -> Result<(String, TranscodeSummary), GodsongError> {
    let song = normalize(song);
    let mut renderer = format.renderer(config);
    let mut out = Vec::new();
    let summary = write_song(&song, renderer.as_mut(), &mut out, config.lookup_errors)?;
    Ok((String::from_utf8_lossy(&out).into_owned(), summary))
}

/// Stream a normalized song through `renderer`.
///
/// Recoverable errors are logged and counted, the first fatal one stops the
/// pass (the output written so far is left as is).
pub fn write_song(
    song: &str,
    renderer: &mut dyn Renderer,
    out: &mut dyn Write,
    policy: ErrorPolicy,
) -> Result<TranscodeSummary, GodsongError> {
    let mut summary = TranscodeSummary::default();
    renderer.write_header(out)?;
    for event in SongParser::new(song) {
        match event {
            Ok(event) => {
                summary.record(&event);
                renderer.write_event(out, &event)?;
            }
            Err(err) if err.is_fatal(policy) => return Err(err),
            Err(err) => {
                log::warn!("{err}, skipping it");
                summary.warnings += 1;
            }
        }
    }
    renderer.write_footer(out)?;
    log::info!(
        "Transcoded {} notes ({} ticks) over {} staves with {} warnings",
        summary.notes,
        summary.ticks,
        summary.staff_breaks + 1,
        summary.warnings
    );
    Ok(summary)
}
