//! Godsong - TempleOS God song transcoder
//!
//! This library provides:
//! - Parsing of TempleOS song strings (as played by `Play` and generated by `GodSongStr`)
//! - PMX and LilyPond rendering of the parsed events
//!
//! # Example
//!
//! ```
//! use godsong::{transcode_str, Config, OutputFormat};
//!
//! let (pmx, summary) = transcode_str("4qCEG", OutputFormat::Pmx, &Config::default()).unwrap();
//! assert!(pmx.ends_with("c44 e44 g44 \n"));
//! assert_eq!(summary.notes, 3);
//! ```

pub mod config;
pub mod error;
pub mod parser;
pub mod render;
pub mod transcoder;

// Re-export main types for convenience
pub use config::{Config, ErrorPolicy, PmxLayout};
pub use error::GodsongError;
pub use parser::reader::{normalize, read_song};
pub use parser::song_parser::{
    parse_song, Duration, Meter, NoteEvent, ParserState, Pitch, SongEvent, SongParser, TieRole,
    QUARTER_TIME,
};
pub use parser::symbols::{Accidental, DurationModifier, DurationSpecifier};
pub use render::{
    lilypond::LilyPondRenderer, pmx::PmxRenderer, render_to_string, OutputFormat, Renderer,
};
pub use transcoder::{transcode, transcode_str, write_song, TranscodeSummary};
