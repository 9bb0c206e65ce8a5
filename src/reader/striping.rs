//! The striping line reader.

use std::borrow::Cow;
use std::fs::File;
use std::io::{self, BufRead, BufReader, Seek, SeekFrom};
use std::iter::FusedIterator;
use std::path::Path;

use tracing::{debug, trace};

use super::{JunkSet, ReaderOptions, ReaderState};
use crate::error::LinesweepError;
use crate::Result;

/// A reader that yields junk-free, trimmed, non-blank lines.
///
/// The underlying stream is opened on construction and released by
/// [`close`](Self::close) or when the reader is dropped, whichever comes
/// first. Lines are pulled lazily; once the stream is exhausted the reader
/// yields nothing more.
///
/// ```no_run
/// use linesweep::{ReaderOptions, StripingReader};
///
/// let options = ReaderOptions::new().junk("|");
/// let reader = StripingReader::open_with("example.txt", &options)?;
/// for line in reader {
///     println!("{}", line?);
/// }
/// # Ok::<(), linesweep::LinesweepError>(())
/// ```
pub struct StripingReader<R = BufReader<File>> {
    name: String,
    source: Option<R>,
    junk: JunkSet,
    state: ReaderState,
    lossy: bool,
    exhausted: bool,
    fused: bool,
    buf: Vec<u8>,
    lines_read: u64,
    lines_yielded: u64,
}

impl StripingReader<BufReader<File>> {
    /// Open `name` read-only with no junk characters.
    pub fn open(name: impl AsRef<Path>) -> Result<Self> {
        Self::open_with(name, &ReaderOptions::default())
    }

    /// Open `name` with explicit mode, buffering and junk.
    pub fn open_with(name: impl AsRef<Path>, options: &ReaderOptions) -> Result<Self> {
        let path = name.as_ref();
        let open_error = |source| LinesweepError::Open {
            path: path.to_path_buf(),
            source,
        };

        let mut state = ReaderState::default();
        let mut file = options.mode.open_options().open(path).map_err(open_error)?;
        if file.metadata().map_err(open_error)?.is_dir() {
            return Err(open_error(io::Error::new(
                io::ErrorKind::InvalidInput,
                "is a directory",
            )));
        }
        if options.mode.is_append() {
            file.seek(SeekFrom::End(0)).map_err(open_error)?;
        }
        state.transition_to(ReaderState::Open)?;

        debug!(
            path = %path.display(),
            mode = %options.mode,
            buffer = options.buffering.capacity(),
            junk = %options.junk,
            "opened source"
        );

        let source = BufReader::with_capacity(options.buffering.capacity(), file);
        Ok(Self::build(
            path.display().to_string(),
            source,
            options.junk.clone(),
            state,
            options.mode.is_binary(),
        ))
    }
}

impl<R: BufRead> StripingReader<R> {
    /// Wrap an already open buffered source. Invalid UTF-8 is a read error.
    pub fn from_reader(name: impl Into<String>, source: R, junk: JunkSet) -> Self {
        Self::build(name.into(), source, junk, ReaderState::Open, false)
    }

    /// Pull the next cleaned line.
    ///
    /// Returns `Ok(None)` at end of stream and
    /// [`LinesweepError::UseAfterClose`] once the reader is closed.
    pub fn next_line(&mut self) -> Result<Option<String>> {
        if !self.state.can_read() {
            return Err(LinesweepError::UseAfterClose);
        }
        if self.exhausted {
            return Ok(None);
        }
        let Some(source) = self.source.as_mut() else {
            return Err(LinesweepError::UseAfterClose);
        };

        loop {
            self.buf.clear();
            let n = source
                .read_until(b'\n', &mut self.buf)
                .map_err(LinesweepError::Read)?;
            if n == 0 {
                self.exhausted = true;
                debug!(
                    name = %self.name,
                    read = self.lines_read,
                    yielded = self.lines_yielded,
                    "end of stream"
                );
                return Ok(None);
            }
            self.lines_read += 1;

            let raw = decode(&self.buf, self.lossy)?;
            match self.junk.clean(&raw) {
                Some(line) => {
                    self.lines_yielded += 1;
                    return Ok(Some(line));
                }
                None => trace!(line = self.lines_read, "skipped blank line"),
            }
        }
    }
}

impl<R> StripingReader<R> {
    fn build(name: String, source: R, junk: JunkSet, state: ReaderState, lossy: bool) -> Self {
        Self {
            name,
            source: Some(source),
            junk,
            state,
            lossy,
            exhausted: false,
            fused: false,
            buf: Vec::new(),
            lines_read: 0,
            lines_yielded: 0,
        }
    }

    /// Release the underlying stream.
    ///
    /// Returns `true` only for the call that actually closed it.
    pub fn close(&mut self) -> bool {
        if !self.state.can_transition_to(ReaderState::Closed) {
            return false;
        }
        self.state = ReaderState::Closed;
        drop(self.source.take());
        debug!(name = %self.name, "closed source");
        true
    }

    /// Source name, usually the path.
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn junk(&self) -> &JunkSet {
        &self.junk
    }

    pub fn state(&self) -> ReaderState {
        self.state
    }

    pub fn is_closed(&self) -> bool {
        self.state.is_terminal()
    }

    /// Raw lines consumed from the source, including skipped ones.
    pub fn lines_read(&self) -> u64 {
        self.lines_read
    }

    /// Cleaned lines handed out so far.
    pub fn lines_yielded(&self) -> u64 {
        self.lines_yielded
    }
}

fn decode(buf: &[u8], lossy: bool) -> Result<Cow<'_, str>> {
    if lossy {
        return Ok(String::from_utf8_lossy(buf));
    }
    std::str::from_utf8(buf)
        .map(Cow::Borrowed)
        .map_err(|e| LinesweepError::Read(io::Error::new(io::ErrorKind::InvalidData, e)))
}

/// Yields each line as `Ok`, or a single `Err` after which iteration stops.
impl<R: BufRead> Iterator for StripingReader<R> {
    type Item = Result<String>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.fused {
            return None;
        }
        match self.next_line() {
            Ok(line) => line.map(Ok),
            Err(e) => {
                self.fused = true;
                Some(Err(e))
            }
        }
    }
}

impl<R: BufRead> FusedIterator for StripingReader<R> {}

impl<R> Drop for StripingReader<R> {
    fn drop(&mut self) {
        self.close();
    }
}

impl<R> std::fmt::Debug for StripingReader<R> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StripingReader")
            .field("name", &self.name)
            .field("state", &self.state)
            .field("junk", &self.junk)
            .field("lines_read", &self.lines_read)
            .field("lines_yielded", &self.lines_yielded)
            .finish()
    }
}

/// Open `name`, run `f` with the reader, and close it on every exit path.
///
/// Errors from `f` are returned after the reader is closed; a panic in `f`
/// still releases the stream through `Drop`.
pub fn with_reader<T, E, F>(
    name: impl AsRef<Path>,
    options: &ReaderOptions,
    f: F,
) -> std::result::Result<T, E>
where
    F: FnOnce(&mut StripingReader) -> std::result::Result<T, E>,
    E: From<LinesweepError>,
{
    with_reader_from(StripingReader::open_with(name, options)?, f)
}

/// Run `f` with an already open reader, then close it.
pub fn with_reader_from<R, T, E, F>(
    mut reader: StripingReader<R>,
    f: F,
) -> std::result::Result<T, E>
where
    F: FnOnce(&mut StripingReader<R>) -> std::result::Result<T, E>,
{
    let result = f(&mut reader);
    reader.close();
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;
    use std::io::{Cursor, Read};
    use std::rc::Rc;

    fn reader(text: &str, junk: &str) -> StripingReader<Cursor<Vec<u8>>> {
        let source = Cursor::new(text.as_bytes().to_vec());
        StripingReader::from_reader("mem", source, JunkSet::new(junk))
    }

    fn collect<R: BufRead>(reader: StripingReader<R>) -> Vec<String> {
        reader.collect::<Result<Vec<_>>>().unwrap()
    }

    /// A source that counts how many times it is dropped.
    struct CountingSource {
        inner: Cursor<Vec<u8>>,
        drops: Rc<Cell<u32>>,
    }

    impl Read for CountingSource {
        fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
            self.inner.read(buf)
        }
    }

    impl BufRead for CountingSource {
        fn fill_buf(&mut self) -> io::Result<&[u8]> {
            self.inner.fill_buf()
        }

        fn consume(&mut self, amt: usize) {
            self.inner.consume(amt)
        }
    }

    impl Drop for CountingSource {
        fn drop(&mut self) {
            self.drops.set(self.drops.get() + 1);
        }
    }

    /// A source that fails on the first read.
    struct FailingSource;

    impl Read for FailingSource {
        fn read(&mut self, _buf: &mut [u8]) -> io::Result<usize> {
            Err(io::Error::new(io::ErrorKind::Other, "disk on fire"))
        }
    }

    impl BufRead for FailingSource {
        fn fill_buf(&mut self) -> io::Result<&[u8]> {
            Err(io::Error::new(io::ErrorKind::Other, "disk on fire"))
        }

        fn consume(&mut self, _amt: usize) {}
    }

    #[test]
    fn test_skips_blank_and_strips_junk() {
        let r = reader("  a  \n\n|b|\n   \nc|d\n", "|");
        assert_eq!(collect(r), vec!["a", "b", "cd"]);
    }

    #[test]
    fn test_empty_source() {
        let mut r = reader("", "");
        assert_eq!(r.next_line().unwrap(), None);
        assert_eq!(r.lines_read(), 0);
    }

    #[test]
    fn test_only_blank_lines() {
        let r = reader("\n   \n\t\n||\n", "|");
        assert!(collect(r).is_empty());
    }

    #[test]
    fn test_last_line_without_newline() {
        let r = reader("first\nlast", "");
        assert_eq!(collect(r), vec!["first", "last"]);
    }

    #[test]
    fn test_crlf_line_endings() {
        let r = reader("one\r\n\r\n two \r\n", "");
        assert_eq!(collect(r), vec!["one", "two"]);
    }

    #[test]
    fn test_counters() {
        let mut r = reader("a\n\nb\n", "");
        while r.next_line().unwrap().is_some() {}
        assert_eq!(r.lines_read(), 3);
        assert_eq!(r.lines_yielded(), 2);
    }

    #[test]
    fn test_not_restartable() {
        let mut r = reader("a\n", "");
        assert_eq!(r.next_line().unwrap(), Some("a".to_string()));
        assert_eq!(r.next_line().unwrap(), None);
        assert_eq!(r.next_line().unwrap(), None);
        assert!(r.next().is_none());
    }

    #[test]
    fn test_use_after_close() {
        let mut r = reader("a\nb\n", "");
        assert_eq!(r.next_line().unwrap(), Some("a".to_string()));
        assert!(r.close());
        assert!(r.is_closed());
        assert!(matches!(r.next_line(), Err(LinesweepError::UseAfterClose)));
    }

    #[test]
    fn test_iterator_fuses_after_close_error() {
        let mut r = reader("a\n", "");
        r.close();
        assert!(matches!(r.next(), Some(Err(LinesweepError::UseAfterClose))));
        assert!(r.next().is_none());
    }

    #[test]
    fn test_close_is_idempotent() {
        let drops = Rc::new(Cell::new(0));
        let source = CountingSource {
            inner: Cursor::new(b"x\n".to_vec()),
            drops: Rc::clone(&drops),
        };
        let mut r = StripingReader::from_reader("counted", source, JunkSet::empty());

        assert!(r.close());
        assert!(!r.close());
        assert_eq!(drops.get(), 1);

        drop(r);
        assert_eq!(drops.get(), 1);
    }

    #[test]
    fn test_drop_releases_source() {
        let drops = Rc::new(Cell::new(0));
        {
            let source = CountingSource {
                inner: Cursor::new(b"x\ny\n".to_vec()),
                drops: Rc::clone(&drops),
            };
            let mut r = StripingReader::from_reader("counted", source, JunkSet::empty());
            // leave early, like a `break`
            assert_eq!(r.next_line().unwrap(), Some("x".to_string()));
        }
        assert_eq!(drops.get(), 1);
    }

    fn counted(text: &[u8], drops: &Rc<Cell<u32>>) -> StripingReader<CountingSource> {
        let source = CountingSource {
            inner: Cursor::new(text.to_vec()),
            drops: Rc::clone(drops),
        };
        StripingReader::from_reader("counted", source, JunkSet::empty())
    }

    #[test]
    fn test_with_reader_from_closes_after_error() {
        let drops = Rc::new(Cell::new(0));

        let result: std::result::Result<(), &str> =
            with_reader_from(counted(b"a\nb\n", &drops), |r| {
                assert_eq!(r.next_line().unwrap(), Some("a".to_string()));
                assert_eq!(drops.get(), 0);
                Err("stop")
            });

        assert_eq!(result, Err("stop"));
        assert_eq!(drops.get(), 1);
    }

    #[test]
    fn test_with_reader_from_closes_after_early_exit() {
        let drops = Rc::new(Cell::new(0));

        let first = with_reader_from(counted(b"x\ny\nz\n", &drops), |r| {
            r.next().transpose()
        })
        .unwrap();

        assert_eq!(first.as_deref(), Some("x"));
        assert_eq!(drops.get(), 1);
    }

    #[test]
    fn test_with_reader_from_closes_on_panic() {
        let drops = Rc::new(Cell::new(0));
        let reader = counted(b"x\n", &drops);

        let outcome = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
            with_reader_from(reader, |_| -> Result<()> { panic!("closure failed") })
        }));

        assert!(outcome.is_err());
        assert_eq!(drops.get(), 1);
    }

    #[test]
    fn test_read_error_propagates() {
        let mut r = StripingReader::from_reader("failing", FailingSource, JunkSet::empty());
        assert!(matches!(r.next(), Some(Err(LinesweepError::Read(_)))));
        assert!(r.next().is_none());
        // still closable
        assert!(r.close());
    }

    #[test]
    fn test_invalid_utf8_is_read_error() {
        let source = Cursor::new(vec![b'o', b'k', b'\n', 0xff, 0xfe, b'\n']);
        let mut r = StripingReader::from_reader("bytes", source, JunkSet::empty());
        assert_eq!(r.next_line().unwrap(), Some("ok".to_string()));
        match r.next_line() {
            Err(LinesweepError::Read(e)) => assert_eq!(e.kind(), io::ErrorKind::InvalidData),
            other => panic!("expected read error, got {other:?}"),
        }
    }

    #[test]
    fn test_state_and_accessors() {
        let r = reader("", "#");
        assert_eq!(r.state(), ReaderState::Open);
        assert_eq!(r.name(), "mem");
        assert!(r.junk().contains('#'));
    }
}
