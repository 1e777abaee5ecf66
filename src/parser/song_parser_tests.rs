#[cfg(test)]
use crate::parser::reader::read_song;
#[cfg(test)]
use crate::parser::song_parser::{parse_song, SongEvent};
#[cfg(test)]
use crate::GodsongError;

#[cfg(test)]
pub fn parse_song_file(file_path: &str) -> Result<Vec<SongEvent>, GodsongError> {
    let file = std::fs::File::open(file_path)?;
    let song = read_song(file)?;
    parse_song(&song).into_iter().collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{Config, PmxLayout};
    use crate::parser::song_parser::{Meter, NoteEvent, TieRole, TRIPLET_SIZE};
    use crate::parser::symbols::{Accidental, DurationSpecifier};
    use crate::render::pmx::PmxRenderer;
    use crate::render::{render_to_string, OutputFormat, Renderer};

    fn init_logger() {
        env_logger::builder()
            .is_test(true)
            .try_init()
            .unwrap_or_default();
    }

    fn pmx_header() -> String {
        let mut header = Vec::new();
        PmxRenderer::new(PmxLayout::default())
            .write_header(&mut header)
            .unwrap();
        String::from_utf8(header).unwrap()
    }

    fn notes(events: &[SongEvent]) -> Vec<&NoteEvent> {
        events
            .iter()
            .filter_map(|e| match e {
                SongEvent::Note(note) => Some(note),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn parse_all_files_successfully() {
        init_logger();
        let test_dir = std::path::Path::new("test-files");
        for entry in std::fs::read_dir(test_dir).unwrap() {
            let path = entry.unwrap().path();
            if path.extension() != Some(std::ffi::OsStr::new("song")) {
                continue;
            }
            let file_name = path.file_name().unwrap().to_str().unwrap();
            eprintln!("Parsing file: {file_name}");
            let events = parse_song_file(path.to_str().unwrap())
                .unwrap_or_else(|err| panic!("Failed to parse file: {file_name}\n{err}"));
            let notes = notes(&events);
            assert!(!notes.is_empty(), "File: {file_name}");

            for (i, note) in notes.iter().enumerate() {
                assert!(note.octave <= 9, "note:{i} file:{file_name}");
                // a tie always closes on the very next note
                if note.tie == TieRole::Open {
                    assert_eq!(notes[i + 1].tie, TieRole::Close, "note:{i} file:{file_name}");
                }
                if note.tie == TieRole::Close {
                    assert_eq!(notes[i - 1].tie, TieRole::Open, "note:{i} file:{file_name}");
                }
                // triplet groups are made of exactly three consecutive notes
                if let Some(position) = note.duration.triplet {
                    assert!((1..=TRIPLET_SIZE).contains(&position));
                    if position < TRIPLET_SIZE {
                        assert_eq!(
                            notes[i + 1].duration.triplet,
                            Some(position + 1),
                            "note:{i} file:{file_name}"
                        );
                    }
                }
            }

            // brackets balance in the LilyPond output
            let mut renderer = OutputFormat::LilyPond.renderer(&Config::default());
            let lilypond = render_to_string(renderer.as_mut(), &events).unwrap();
            assert_eq!(
                lilypond.matches('{').count(),
                lilypond.matches('}').count(),
                "File: {file_name}"
            );
            let groups = notes.iter().filter(|n| n.duration.triplet == Some(1)).count();
            assert_eq!(lilypond.matches("\\tuplet").count(), groups);

            // one PMX staff separator per newline, the header output path `./` excluded
            let mut renderer = OutputFormat::Pmx.renderer(&Config::default());
            let pmx = render_to_string(renderer.as_mut(), &events).unwrap();
            let header = pmx_header();
            let pmx_body = pmx.strip_prefix(header.as_str()).expect("PMX header");
            let staff_breaks = events
                .iter()
                .filter(|e| **e == SongEvent::StaffBreak)
                .count();
            assert_eq!(
                pmx_body.matches("/\n").count(),
                staff_breaks,
                "File: {file_name}"
            );
        }
    }

    #[test]
    fn parse_triplets_song() {
        init_logger();
        let events = parse_song_file("test-files/triplets.song").unwrap();
        let notes = notes(&events);
        assert_eq!(notes.len(), 13);
        assert_eq!(notes.iter().filter(|n| n.duration.triplet.is_some()).count(), 6);
        let ticks: u32 = notes.iter().map(|n| n.duration.time()).sum();
        assert_eq!(ticks, 7680);

        let meter_changes: Vec<&SongEvent> = events
            .iter()
            .filter(|e| matches!(e, SongEvent::MeterChange(_)))
            .collect();
        assert_eq!(
            meter_changes,
            vec![&SongEvent::MeterChange(Meter { top: 6, bottom: 8 })]
        );

        // (FqF
        assert_eq!(notes[11].tie, TieRole::Open);
        assert_eq!(notes[11].duration.base, DurationSpecifier::Eighth);
        assert_eq!(notes[12].tie, TieRole::Close);
        assert_eq!(notes[12].duration.base, DurationSpecifier::Quarter);
    }

    #[test]
    fn render_triplets_song() {
        init_logger();
        let events = parse_song_file("test-files/triplets.song").unwrap();
        let mut renderer = OutputFormat::LilyPond.renderer(&Config::default());
        let lilypond = render_to_string(renderer.as_mut(), &events).unwrap();
        assert_eq!(
            lilypond,
            "\\version \"2.24.4\"\n{\n\
             \\tuplet 3/2 { c''8 d''8 e''8 } f''4 \\tuplet 3/2 { g'8 a'8 b'8 } c''2 \n\
             \\time 6/8 c'8 d'8 e'8 f'8~ f'4 \n\
             }\n"
        );

        let mut renderer = OutputFormat::Pmx.renderer(&Config::default());
        let pmx = render_to_string(renderer.as_mut(), &events).unwrap();
        assert!(pmx.ends_with(
            "\n\nc85x3 d85 e85 f45 g84x3 a84 b84 c25 /\n\
             m6/8/6/8 c84 d84 e84 ( f84 f44 ) /\n\n"
        ));
    }

    #[test]
    fn parse_accidentals_song() {
        init_logger();
        let events = parse_song_file("test-files/accidentals.song").unwrap();
        let notes = notes(&events);
        let accidentals: Vec<Option<Accidental>> = notes.iter().map(|n| n.accidental).collect();
        assert_eq!(
            accidentals,
            vec![
                Some(Accidental::Sharp),
                Some(Accidental::Sharp),
                Some(Accidental::Flat),
                None,
                None,
                None
            ]
        );
        assert!(notes[3].duration.dotted);
        assert!(!notes[4].duration.dotted);
        assert_eq!(notes[5].octave, 4);
        assert_eq!(notes[5].duration.base, DurationSpecifier::Half);
    }
}
