//! Options for opening a [`StripingReader`](super::StripingReader).

use std::fmt;
use std::fs::OpenOptions;
use std::str::FromStr;

use super::JunkSet;
use crate::error::LinesweepError;

/// Buffer size used when no explicit size is requested.
pub const DEFAULT_BUFFER_SIZE: usize = 8 * 1024;

/// Largest buffer a size hint can request.
pub const MAX_BUFFER_SIZE: usize = 1 << 20;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Access {
    Read,
    Write,
    Append,
    Create,
}

/// File access mode, parsed from a mode string such as `"r"`, `"rb"` or `"a+"`.
///
/// Only readable modes are accepted: `r` with or without `+`, and `w`, `a`,
/// `x` with `+`. A `b` flag decodes lines lossily instead of rejecting
/// invalid UTF-8.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Mode {
    access: Access,
    update: bool,
    binary: bool,
}

impl Mode {
    /// Read-only text mode (`"r"`).
    pub const READ: Mode = Mode {
        access: Access::Read,
        update: false,
        binary: false,
    };

    /// Whether lines are decoded lossily.
    pub fn is_binary(&self) -> bool {
        self.binary
    }

    /// Whether the mode also grants write access.
    pub fn is_update(&self) -> bool {
        self.update
    }

    /// Whether reading starts at the end of the file, as with `a+`.
    pub fn is_append(&self) -> bool {
        self.access == Access::Append
    }

    /// Translate into `std::fs::OpenOptions`.
    pub fn open_options(&self) -> OpenOptions {
        let mut options = OpenOptions::new();
        options.read(true);
        match self.access {
            Access::Read => {
                options.write(self.update);
            }
            Access::Write => {
                options.write(true).create(true).truncate(true);
            }
            Access::Append => {
                options.append(true).create(true);
            }
            Access::Create => {
                options.write(true).create_new(true);
            }
        }
        options
    }
}

impl Default for Mode {
    fn default() -> Self {
        Self::READ
    }
}

impl FromStr for Mode {
    type Err = LinesweepError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || LinesweepError::InvalidMode(s.to_string());

        let mut access = None;
        let mut update = false;
        let mut binary = None;

        for c in s.chars() {
            match c {
                'r' | 'w' | 'a' | 'x' if access.is_none() => {
                    access = Some(match c {
                        'r' => Access::Read,
                        'w' => Access::Write,
                        'a' => Access::Append,
                        _ => Access::Create,
                    });
                }
                '+' if !update => update = true,
                'b' if binary.is_none() => binary = Some(true),
                't' if binary.is_none() => binary = Some(false),
                _ => return Err(invalid()),
            }
        }

        let access = access.ok_or_else(invalid)?;
        // write-only modes cannot feed a line reader
        if access != Access::Read && !update {
            return Err(invalid());
        }

        Ok(Mode {
            access,
            update,
            binary: binary.unwrap_or(false),
        })
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let access = match self.access {
            Access::Read => 'r',
            Access::Write => 'w',
            Access::Append => 'a',
            Access::Create => 'x',
        };
        write!(f, "{access}")?;
        if self.update {
            write!(f, "+")?;
        }
        if self.binary {
            write!(f, "b")?;
        }
        Ok(())
    }
}

/// Buffering strategy for the underlying stream.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Buffering {
    /// Platform default buffer.
    #[default]
    Default,
    /// Smallest possible buffer.
    Unbuffered,
    /// Line buffering; reads behave like `Default`.
    Line,
    /// Buffer of roughly this many bytes.
    Bytes(usize),
}

impl Buffering {
    /// Interpret an integer hint: negative is the default, `0` unbuffered,
    /// `1` line buffered, anything larger a size in bytes.
    pub fn from_hint(hint: i64) -> Self {
        match hint {
            h if h < 0 => Buffering::Default,
            0 => Buffering::Unbuffered,
            1 => Buffering::Line,
            n => Buffering::Bytes(usize::try_from(n).unwrap_or(usize::MAX)),
        }
    }

    /// Capacity handed to `BufReader`, at most [`MAX_BUFFER_SIZE`].
    pub fn capacity(&self) -> usize {
        match self {
            Buffering::Default | Buffering::Line => DEFAULT_BUFFER_SIZE,
            Buffering::Unbuffered => 1,
            Buffering::Bytes(n) => (*n).clamp(1, MAX_BUFFER_SIZE),
        }
    }
}

/// Options for opening a striping reader.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReaderOptions {
    /// Access mode.
    pub mode: Mode,
    /// Buffering strategy.
    pub buffering: Buffering,
    /// Characters removed from every line.
    pub junk: JunkSet,
}

impl ReaderOptions {
    /// Default options: read-only text, default buffering, no junk.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the access mode.
    pub fn mode(mut self, mode: Mode) -> Self {
        self.mode = mode;
        self
    }

    /// Set the buffering strategy.
    pub fn buffering(mut self, buffering: Buffering) -> Self {
        self.buffering = buffering;
        self
    }

    /// Set the junk characters.
    pub fn junk(mut self, junk: impl Into<JunkSet>) -> Self {
        self.junk = junk.into();
        self
    }
}
