//! Line oriented text sources.

use std::{
    fs::File,
    io::{self, BufRead, BufReader},
    marker::PhantomData,
    path::Path,
};

use log::warn;

use crate::error::{Error, Result};

/// What a [`LineReader`] does when the underlying reader fails.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ReadPolicy {
    /// Yield the error as an element, then end the sequence.
    #[default]
    FailFast,
    /// Log the error and end the sequence as if the input had ended.
    /// Callers can not tell a truncated input from a complete one.
    BestEffort,
}

/// What a single line is decoded into.
pub trait Record: Sized {
    fn from_line(line: Vec<u8>) -> io::Result<Self>;
}

/// Lines are kept as they are, whatever their encoding.
impl Record for Vec<u8> {
    fn from_line(line: Vec<u8>) -> io::Result<Self> {
        Ok(line)
    }
}

/// Lines must be valid UTF-8. Anything else is a read failure.
impl Record for String {
    fn from_line(line: Vec<u8>) -> io::Result<Self> {
        String::from_utf8(line).map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))
    }
}

/// Yields one record per newline terminated line of a reader,
/// without the line terminator. Records are `String`s unless
/// switched with [`LineReader::records`].
///
/// The reader is dropped as soon as the end of input or an error is
/// reached, which closes the file for file backed readers.
pub struct LineReader<R, T = String> {
    reader: Option<R>,
    policy: ReadPolicy,
    strip_carriage_return: bool,
    lines_read: u64,
    record: PhantomData<fn() -> T>,
}

impl LineReader<BufReader<File>> {
    /// Opens the file at `path` for reading.
    pub fn open(path: impl AsRef<Path>, policy: ReadPolicy) -> Result<Self> {
        let file = File::open(path)?;
        Ok(Self::new(BufReader::new(file), policy))
    }
}

impl<R: BufRead> LineReader<R> {
    pub fn new(reader: R, policy: ReadPolicy) -> Self {
        Self {
            reader: Some(reader),
            policy,
            strip_carriage_return: true,
            lines_read: 0,
            record: PhantomData,
        }
    }
}

impl<R: BufRead, T> LineReader<R, T> {
    /// Changes what each line is decoded into.
    pub fn records<U: Record>(self) -> LineReader<R, U> {
        LineReader {
            reader: self.reader,
            policy: self.policy,
            strip_carriage_return: self.strip_carriage_return,
            lines_read: self.lines_read,
            record: PhantomData,
        }
    }

    /// Controls whether a `\r` in front of the `\n` is removed as well.
    /// On by default.
    pub fn strip_carriage_return(self, strip: bool) -> Self {
        Self {
            strip_carriage_return: strip,
            ..self
        }
    }

    /// the number of lines returned so far.
    pub fn lines_read(&self) -> u64 {
        self.lines_read
    }
}

impl<R: BufRead, T> LineReader<R, T> {
    fn fail(&mut self, e: io::Error) -> Option<Result<T>> {
        self.reader = None;
        match self.policy {
            ReadPolicy::FailFast => Some(Err(Error::Storage(e))),
            ReadPolicy::BestEffort => {
                warn!(
                    "read failed after {} lines, treating it as end of input: {e}",
                    self.lines_read
                );
                None
            }
        }
    }
}

impl<R: BufRead, T: Record> Iterator for LineReader<R, T> {
    type Item = Result<T>;

    fn next(&mut self) -> Option<Result<T>> {
        let reader = self.reader.as_mut()?;
        let mut line = Vec::new();
        match reader.read_until(b'\n', &mut line) {
            Ok(0) => {
                self.reader = None;
                None
            }
            Ok(_) => {
                if line.last() == Some(&b'\n') {
                    line.pop();
                    if self.strip_carriage_return && line.last() == Some(&b'\r') {
                        line.pop();
                    }
                }
                match T::from_line(line) {
                    Ok(record) => {
                        self.lines_read += 1;
                        Some(Ok(record))
                    }
                    Err(e) => self.fail(e),
                }
            }
            Err(e) => self.fail(e),
        }
    }
}
