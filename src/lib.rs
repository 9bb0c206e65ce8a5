//! # linesweep
//!
//! Two small utilities for cleaning up data before a script touches it.
//!
//! - **Flattening**: turn arbitrarily nested [`Nested`] sequences into a
//!   flat `Vec`, depth-first and left to right.
//! - **Striping reader**: read a text file line by line, removing junk
//!   characters, trimming whitespace and skipping blank lines. The file is
//!   released on every exit path.
//!
//! ## Quick Start
//!
//! ```no_run
//! use linesweep::{flatten, nested, ReaderOptions, StripingReader};
//!
//! fn main() -> linesweep::Result<()> {
//!     // Initialize logging
//!     linesweep::logging::try_init().ok();
//!
//!     let flat = flatten(nested![1, [2, [3]], []])?;
//!     assert_eq!(flat, vec![1, 2, 3]);
//!
//!     let options = ReaderOptions::new().junk("|");
//!     for line in StripingReader::open_with("hosts.txt", &options)? {
//!         println!("{}", line?);
//!     }
//!
//!     Ok(())
//! }
//! ```

pub mod cli;
pub mod config;
pub mod error;
pub mod flatten;
pub mod logging;
pub mod reader;

// Re-export commonly used types
pub use error::{LinesweepError, Result};
pub use flatten::{flatten, flatten_json, flatten_ref, Flattener, Nested};
pub use reader::{
    with_reader, with_reader_from, Buffering, JunkSet, Mode, ReaderOptions, ReaderState,
    StripingReader,
};
