use nom::branch::alt;
use nom::character::complete::{anychar, char, satisfy};
use nom::combinator::{map, map_opt, opt, value};
use nom::sequence::preceded;
use nom::{IResult, Parser};

use crate::parser::song_parser::Pitch;
use crate::parser::symbols::{Accidental, DurationModifier, DurationSpecifier};

/// Everything that may precede a pitch letter in a note-unit.
///
/// Table symbols are kept raw, the grammar lookup happens in the song parser.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Prefix {
    TieOpen,
    Meter { top: Option<u8>, bottom: Option<u8> },
    Octave(u8),
    Duration(char),
    Modifier(char),
    Accidental(char),
}

/// Parse a single decimal digit
pub fn parse_digit(i: &str) -> IResult<&str, u8> {
    map(satisfy(|c| c.is_ascii_digit()), |c| c as u8 - b'0').parse(i)
}

/// Meter specifier `M<top>/<bottom>`, every part after `M` is optional.
pub fn parse_meter(i: &str) -> IResult<&str, (Option<u8>, Option<u8>)> {
    preceded(
        char('M'),
        (opt(parse_digit), preceded(opt(char('/')), opt(parse_digit))),
    )
    .parse(i)
}

/// Uppercase pitch letter `A`-`G`
pub fn parse_pitch(i: &str) -> IResult<&str, Pitch> {
    map_opt(anychar, Pitch::from_char).parse(i)
}

pub fn parse_prefix(i: &str) -> IResult<&str, Prefix> {
    alt((
        value(Prefix::TieOpen, char('(')),
        map(parse_meter, |(top, bottom)| Prefix::Meter { top, bottom }),
        map(parse_digit, Prefix::Octave),
        map(satisfy(DurationSpecifier::is_symbol), Prefix::Duration),
        map(satisfy(DurationModifier::is_symbol), Prefix::Modifier),
        map(satisfy(Accidental::is_symbol), Prefix::Accidental),
    ))
    .parse(i)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_digit() {
        assert_eq!(parse_digit("5C"), Ok(("C", 5)));
        assert!(parse_digit("C5").is_err());
    }

    #[test]
    fn test_parse_full_meter() {
        assert_eq!(parse_meter("M3/4C"), Ok(("C", (Some(3), Some(4)))));
    }

    #[test]
    fn test_parse_partial_meters() {
        assert_eq!(parse_meter("M6C"), Ok(("C", (Some(6), None))));
        assert_eq!(parse_meter("M/8C"), Ok(("C", (None, Some(8)))));
        assert_eq!(parse_meter("M3/C"), Ok(("C", (Some(3), None))));
        assert_eq!(parse_meter("MC"), Ok(("C", (None, None))));
    }

    #[test]
    fn test_parse_pitch() {
        assert_eq!(parse_pitch("Gq"), Ok(("q", Pitch::G)));
        assert!(parse_pitch("g").is_err());
        assert!(parse_pitch("H").is_err());
        assert!(parse_pitch("").is_err());
    }

    #[test]
    fn test_parse_prefixes() {
        assert_eq!(parse_prefix("(C"), Ok(("C", Prefix::TieOpen)));
        assert_eq!(parse_prefix("4C"), Ok(("C", Prefix::Octave(4))));
        assert_eq!(parse_prefix("eC"), Ok(("C", Prefix::Duration('e'))));
        assert_eq!(parse_prefix("tC"), Ok(("C", Prefix::Modifier('t'))));
        assert_eq!(parse_prefix(".C"), Ok(("C", Prefix::Modifier('.'))));
        assert_eq!(parse_prefix("bB"), Ok(("B", Prefix::Accidental('b'))));
        assert_eq!(
            parse_prefix("M6/8C"),
            Ok((
                "C",
                Prefix::Meter {
                    top: Some(6),
                    bottom: Some(8)
                }
            ))
        );
    }

    #[test]
    fn test_pitch_is_not_a_prefix() {
        assert!(parse_prefix("C").is_err());
        assert!(parse_prefix(")").is_err());
        assert!(parse_prefix("\nC").is_err());
    }
}
