//! Error handling for note and vault loading
//!
//! Parsing and rendering never fail. Only reading notes from disk
//! and deserializing typed properties return [`Error`].

use std::path::PathBuf;
use thiserror::Error;

/// Main error type
#[derive(Debug, Error)]
pub enum Error {
    /// I/O operation failed (file reading, directory traversal, etc.)
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Frontmatter does not match the requested properties type
    ///
    /// # Example
    /// ```
    /// use obsidian_markdown::prelude::*;
    /// use serde::Deserialize;
    ///
    /// #[derive(Deserialize)]
    /// struct Properties {
    ///     priority: u8,
    /// }
    ///
    /// let note = Note::from_string("---\npriority: high\n---\n", Some("note.md"));
    /// assert!(matches!(note.properties::<Properties>(), Err(Error::Yaml(_))));
    /// ```
    #[error("YAML parsing error: {0}")]
    Yaml(#[from] serde_yml::Error),

    /// Expected a directory path
    ///
    /// # Example
    /// ```no_run
    /// use obsidian_markdown::prelude::*;
    ///
    /// // Will fail if passed a file path
    /// Vault::open(&VaultOptions::new("notes.md")).unwrap();
    /// ```
    #[error("Path: `{0}` is not a directory")]
    IsNotDir(PathBuf),

    /// File contains invalid UTF-8 encoding
    ///
    /// Obsidian requires UTF-8 encoded files.
    #[error("File is not encoded in UTF-8")]
    FromUtf8(#[from] std::string::FromUtf8Error),
}
