use std::io::{self, BufRead};

/// A line reader that keeps one scratch allocation for every line it reads.
///
/// Trajectories are read line by line, millions of lines per run. Rather than allocating a new
/// `String` for each of them (as [`BufRead::lines`] does), the same buffer is cleared and reused.
pub struct LineBuffer<R> {
    reader: R,
    /// Holds the most recently read line, including its line terminator.
    ///
    /// # Warning
    ///
    /// The contents are only meaningful directly after a successful [`LineBuffer::next_line`].
    scratch: String,
    line: u64,
}

impl<R: BufRead> LineBuffer<R> {
    pub fn new(reader: R) -> Self {
        Self {
            reader,
            scratch: String::new(),
            line: 0,
        }
    }

    /// Read the next line, without its line terminator, together with its 1-based line number.
    ///
    /// Returns [`None`] once the reader is exhausted.
    pub fn next_line(&mut self) -> io::Result<Option<(u64, &str)>> {
        self.scratch.clear();
        if self.reader.read_line(&mut self.scratch)? == 0 {
            return Ok(None);
        }
        self.line += 1;
        Ok(Some((self.line, self.scratch.trim_end_matches(['\n', '\r']))))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn numbered_lines() -> io::Result<()> {
        let mut buffer = LineBuffer::new("first\nsecond\r\n\nlast".as_bytes());
        assert_eq!(buffer.next_line()?, Some((1, "first")));
        assert_eq!(buffer.next_line()?, Some((2, "second")));
        assert_eq!(buffer.next_line()?, Some((3, "")));
        assert_eq!(buffer.next_line()?, Some((4, "last")));
        assert_eq!(buffer.next_line()?, None);
        assert_eq!(buffer.next_line()?, None);
        Ok(())
    }

    #[test]
    fn empty() -> io::Result<()> {
        let mut buffer = LineBuffer::new(io::empty());
        assert_eq!(buffer.next_line()?, None);
        Ok(())
    }
}
