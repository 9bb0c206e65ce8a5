//! Line reading with junk removal, trimming and blank-line skipping.
//!
//! # Example
//!
//! ```no_run
//! use linesweep::reader::{with_reader, ReaderOptions};
//!
//! let options = ReaderOptions::new().junk("|");
//! let lines: Vec<String> = with_reader("dump.txt", &options, |reader| {
//!     reader.collect::<linesweep::Result<Vec<_>>>()
//! })?;
//! # Ok::<(), linesweep::LinesweepError>(())
//! ```

mod junk;
mod options;
mod state;
mod striping;

pub use junk::JunkSet;
pub use options::{Buffering, Mode, ReaderOptions, DEFAULT_BUFFER_SIZE, MAX_BUFFER_SIZE};
pub use state::ReaderState;
pub use striping::{with_reader, with_reader_from, StripingReader};
