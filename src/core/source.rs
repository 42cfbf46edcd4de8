use std::io::{self, BufRead};

/// A forward-only stream of raw text lines
///
/// `current_line` is empty before the first `advance` and after the
/// stream reports end of input. Lines are bytes: decoding is left to the
/// record parser so a badly encoded line can be skipped like any other
/// malformed one.
pub trait LineSource {
    /// Move to the next line. Returns `false` once the input is exhausted.
    fn advance(&mut self) -> io::Result<bool>;

    /// The line the source is positioned on, without its line terminator
    fn current_line(&self) -> &[u8];

    /// 1-indexed number of the current line (0 before the first advance)
    fn line_number(&self) -> u64;
}

/// Line source over any buffered reader
pub struct ReaderLineSource<R> {
    reader: R,
    line: Vec<u8>,
    line_number: u64,
    exhausted: bool,
}

impl<R: BufRead> ReaderLineSource<R> {
    pub fn new(reader: R) -> Self {
        Self {
            reader,
            line: Vec::new(),
            line_number: 0,
            exhausted: false,
        }
    }
}

impl<R: BufRead> LineSource for ReaderLineSource<R> {
    fn advance(&mut self) -> io::Result<bool> {
        self.line.clear();
        if self.exhausted {
            return Ok(false);
        }

        if self.reader.read_until(b'\n', &mut self.line)? == 0 {
            self.exhausted = true;
            return Ok(false);
        }

        if self.line.ends_with(b"\n") {
            self.line.pop();
            if self.line.ends_with(b"\r") {
                self.line.pop();
            }
        }
        self.line_number += 1;
        Ok(true)
    }

    fn current_line(&self) -> &[u8] {
        &self.line
    }

    fn line_number(&self) -> u64 {
        self.line_number
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn test_reads_lines_and_strips_terminators() {
        let mut source = ReaderLineSource::new(Cursor::new("one\r\ntwo\nthree"));

        assert!(source.advance().unwrap());
        assert_eq!(source.current_line(), &b"one"[..]);
        assert!(source.advance().unwrap());
        assert_eq!(source.current_line(), &b"two"[..]);
        assert!(source.advance().unwrap());
        assert_eq!(source.current_line(), &b"three"[..]);
        assert_eq!(source.line_number(), 3);

        assert!(!source.advance().unwrap());
        assert!(source.current_line().is_empty());
        assert!(!source.advance().unwrap());
        assert_eq!(source.line_number(), 3);
    }

    #[test]
    fn test_empty_input() {
        let mut source = ReaderLineSource::new(Cursor::new(""));
        assert!(!source.advance().unwrap());
        assert!(source.current_line().is_empty());
        assert_eq!(source.line_number(), 0);
    }

    #[test]
    fn test_blank_lines_are_reported() {
        let mut source = ReaderLineSource::new(Cursor::new("\n\nx\n"));
        assert!(source.advance().unwrap());
        assert!(source.current_line().is_empty());
        assert!(source.advance().unwrap());
        assert!(source.advance().unwrap());
        assert_eq!(source.current_line(), &b"x"[..]);
        assert!(!source.advance().unwrap());
    }

    #[test]
    fn test_non_utf8_lines_are_returned_raw() {
        let mut source = ReaderLineSource::new(Cursor::new(b"caf\xe9\nok\n".to_vec()));

        assert!(source.advance().unwrap());
        assert_eq!(source.current_line(), &b"caf\xe9"[..]);
        assert!(source.advance().unwrap());
        assert_eq!(source.current_line(), &b"ok"[..]);
        assert_eq!(source.line_number(), 2);
    }
}
