use std::io::Read;

use encoding_rs::WINDOWS_1252;

use crate::GodsongError;

/// Read a whole song and normalize it, see [`normalize`].
pub fn read_song<R: Read>(mut src: R) -> Result<String, GodsongError> {
    let mut data = Vec::new();
    src.read_to_end(&mut data)
        .map_err(|err| GodsongError::UnreadableInput(err.to_string()))?;
    log::debug!("Read {} bytes of song data", data.len());
    Ok(normalize(&decode(&data)))
}

/// Materialize properly encoded text, TempleOS documents are 8-bit so
/// anything that is not valid UTF-8 is read as Windows-1252.
fn decode(data: &[u8]) -> String {
    match std::str::from_utf8(data) {
        Ok(s) => s.to_string(),
        Err(e) => {
            log::debug!("Song is not UTF-8 ({e}), decoding as Windows-1252");
            let (cow, _encoding_used, _had_errors) = WINDOWS_1252.decode(data);
            cow.into_owned()
        }
    }
}

/// Drop every whitespace character except newlines, which separate staves.
pub fn normalize(song: &str) -> String {
    song.chars()
        .filter(|&c| c == '\n' || !c.is_whitespace())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;

    struct BrokenSource;

    impl Read for BrokenSource {
        fn read(&mut self, _buf: &mut [u8]) -> io::Result<usize> {
            Err(io::Error::other("device unplugged"))
        }
    }

    #[test]
    fn test_normalize_keeps_newlines() {
        assert_eq!(normalize(" 4q C\tE \r\nG \n\n A"), "4qCE\nG\n\nA");
    }

    #[test]
    fn test_normalize_empty() {
        assert_eq!(normalize(""), "");
        assert_eq!(normalize(" \t "), "");
    }

    #[test]
    fn test_read_song() {
        let song = read_song("M3/4 (C C)\n".as_bytes()).unwrap();
        assert_eq!(song, "M3/4(CC)\n");
    }

    #[test]
    fn test_read_windows_1252_song() {
        // 0xE9 is 'é' in Windows-1252 and invalid on its own in UTF-8
        let data: Vec<u8> = vec![b'C', b' ', 0xE9, b'D'];
        let song = read_song(data.as_slice()).unwrap();
        assert_eq!(song, "CéD");
    }

    #[test]
    fn test_unreadable_source() {
        let err = read_song(BrokenSource).unwrap_err();
        assert_eq!(
            err,
            GodsongError::UnreadableInput("device unplugged".to_string())
        );
    }
}
