//! Contains the code related to reading source text, used for extracting
//! source snippets when reporting diagnostics.

use std::{
    fmt::Debug,
    fs::File,
    io::Read,
    path::{Path, PathBuf},
};

use getset::Getters;
use thiserror::Error;

/// Represents an error that occurs when loading/reading a source text.
#[derive(Debug, Error)]
#[allow(missing_docs)]
pub enum Error {
    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Utf8(#[from] std::str::Utf8Error),
}

/// A source of text that can be read partially or entirely.
pub trait TextSource {
    /// Reads at most `count` characters starting at the character `offset`.
    ///
    /// # Errors
    ///
    /// Returns [`Error`] if the underlying source can't be read.
    fn read_range(&self, count: usize, offset: usize) -> Result<String, Error>;

    /// Reads the whole text.
    ///
    /// # Errors
    ///
    /// Returns [`Error`] if the underlying source can't be read.
    fn read_all(&self) -> Result<String, Error>;

    /// Reads at most the first `count` lines, without their line feeds.
    ///
    /// Empty lines are kept.
    ///
    /// # Errors
    ///
    /// Returns [`Error`] if the underlying source can't be read.
    fn read_lines(&self, count: usize) -> Result<Vec<String>, Error> {
        Ok(self
            .read_all()?
            .split('\n')
            .take(count)
            .map(ToOwned::to_owned)
            .collect())
    }
}

impl TextSource for str {
    fn read_range(&self, count: usize, offset: usize) -> Result<String, Error> {
        Ok(self.chars().skip(offset).take(count).collect())
    }

    fn read_all(&self) -> Result<String, Error> { Ok(self.to_owned()) }
}

impl TextSource for String {
    fn read_range(&self, count: usize, offset: usize) -> Result<String, Error> {
        self.as_str().read_range(count, offset)
    }

    fn read_all(&self) -> Result<String, Error> { Ok(self.clone()) }
}

/// Represents a source file input for the compiler.
#[derive(Clone, PartialEq, Eq, Hash, Getters)]
pub struct SourceFile {
    content: String,

    /// Gets the full path to the source file.
    #[get = "pub"]
    full_path: PathBuf,
}

#[allow(clippy::missing_fields_in_debug)]
impl Debug for SourceFile {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SourceFile")
            .field("full_path", &self.full_path)
            .finish()
    }
}

impl SourceFile {
    /// Creates a new inline source file
    #[must_use]
    pub const fn new(content: String, full_path: PathBuf) -> Self {
        Self { content, full_path }
    }

    /// Loads the source file at the given path.
    ///
    /// # Errors
    ///
    /// - [`Error::Io`] if the file can't be read.
    /// - [`Error::Utf8`] if the file isn't valid UTF-8.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, Error> {
        let path = path.as_ref();

        let mut bytes = Vec::new();
        File::open(path)?.read_to_end(&mut bytes)?;

        let content = std::str::from_utf8(&bytes)?.to_owned();

        Ok(Self::new(content, path.to_path_buf()))
    }

    /// Gets the content of the source file.
    #[must_use]
    pub fn content(&self) -> &str { &self.content }
}

impl TextSource for SourceFile {
    fn read_range(&self, count: usize, offset: usize) -> Result<String, Error> {
        self.content.read_range(count, offset)
    }

    fn read_all(&self) -> Result<String, Error> { Ok(self.content.clone()) }
}

#[cfg(test)]
mod test;
