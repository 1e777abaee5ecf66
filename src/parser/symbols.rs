//! TempleOS song grammar tables
//!
//! Symbols from Terry's `Play` documentation:
//! - `w` `h` `q` `e` `s` set the current duration (whole to sixteenth)
//! - `t` triplet, `.` dot
//! - `#` sharp, `b` flat

use crate::GodsongError;

/// Duration specifiers. They set the current note duration until changed.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Default)]
pub enum DurationSpecifier {
    Whole,
    Half,
    #[default]
    Quarter,
    Eighth,
    Sixteenth,
}

impl DurationSpecifier {
    pub const fn is_symbol(c: char) -> bool {
        matches!(c, 'w' | 'h' | 'q' | 'e' | 's')
    }

    pub const fn symbol(self) -> char {
        match self {
            Self::Whole => 'w',
            Self::Half => 'h',
            Self::Quarter => 'q',
            Self::Eighth => 'e',
            Self::Sixteenth => 's',
        }
    }

    /// Note value as the denominator of a whole note (quarter = 4)
    pub const fn value(self) -> u16 {
        match self {
            Self::Whole => 1,
            Self::Half => 2,
            Self::Quarter => 4,
            Self::Eighth => 8,
            Self::Sixteenth => 16,
        }
    }
}

impl TryFrom<char> for DurationSpecifier {
    type Error = GodsongError;

    fn try_from(c: char) -> Result<Self, Self::Error> {
        match c {
            'w' => Ok(Self::Whole),
            'h' => Ok(Self::Half),
            'q' => Ok(Self::Quarter),
            'e' => Ok(Self::Eighth),
            's' => Ok(Self::Sixteenth),
            other => Err(GodsongError::InvalidDurationSpecifier(other)),
        }
    }
}

/// Duration modifiers. They modify (rather than set) the duration of the
/// following notes: a triplet covers three notes, a dot a single one.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum DurationModifier {
    Triplet,
    Dot,
}

impl DurationModifier {
    pub const fn is_symbol(c: char) -> bool {
        matches!(c, 't' | '.')
    }
}

impl TryFrom<char> for DurationModifier {
    type Error = GodsongError;

    fn try_from(c: char) -> Result<Self, Self::Error> {
        match c {
            't' => Ok(Self::Triplet),
            '.' => Ok(Self::Dot),
            other => Err(GodsongError::InvalidDurationModifier(other)),
        }
    }
}

/// Raise or lower the pitch of a single note by a half step.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Accidental {
    Sharp,
    Flat,
}

impl Accidental {
    pub const fn is_symbol(c: char) -> bool {
        matches!(c, '#' | 'b')
    }
}

impl TryFrom<char> for Accidental {
    type Error = GodsongError;

    fn try_from(c: char) -> Result<Self, Self::Error> {
        match c {
            '#' => Ok(Self::Sharp),
            'b' => Ok(Self::Flat),
            other => Err(GodsongError::InvalidAccidental(other)),
        }
    }
}
