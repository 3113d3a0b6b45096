//! Represents an Obsidian note: raw text, optional source path and parsed AST
//!
//! A [`Note`] is the boundary to storage. It keeps the raw markdown as read
//! and parses it once on construction.
//!
//! # Example
//! ```no_run
//! use obsidian_markdown::prelude::*;
//! use serde::Deserialize;
//!
//! #[derive(Deserialize)]
//! struct NoteProperties {
//!     topic: String,
//!     created: String,
//! }
//!
//! let note = Note::from_file("note.md").unwrap();
//! let properties: NoteProperties = note.properties().unwrap();
//!
//! println!("Note topic: {}", properties.topic);
//! println!("Links: {:?}", note.links());
//! ```

pub mod note_is_todo;
pub mod note_properties;
pub mod note_read;
pub mod note_tags;

use crate::{
    ast::{BlockToken, FrontMatter, ParseResult},
    links::collect_wikilinks,
    render::plain_text::to_plain_text,
};
use std::path::{Path, PathBuf};

/// Parsed Obsidian note
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Note {
    /// Markdown text as read, frontmatter included
    raw: String,

    /// Source file path (if loaded from disk)
    path: Option<PathBuf>,

    parsed: ParseResult,
}

impl Note {
    /// Raw markdown, frontmatter included
    #[inline]
    #[must_use]
    pub fn raw(&self) -> &str {
        &self.raw
    }

    /// Source file path if available
    ///
    /// Returns [`None`] for in-memory notes without physical storage
    #[inline]
    #[must_use]
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    /// Note name: the file stem of [`Note::path`]
    #[must_use]
    pub fn name(&self) -> Option<String> {
        self.path()
            .and_then(Path::file_stem)
            .map(|stem| stem.to_string_lossy().to_string())
    }

    /// Full parse result
    #[inline]
    #[must_use]
    pub const fn parsed(&self) -> &ParseResult {
        &self.parsed
    }

    /// Parsed frontmatter
    #[inline]
    #[must_use]
    pub const fn frontmatter(&self) -> &FrontMatter {
        &self.parsed.frontmatter
    }

    /// Parsed body blocks
    #[inline]
    #[must_use]
    pub fn tokens(&self) -> &[BlockToken] {
        &self.parsed.tokens
    }

    /// Unique wikilink targets, see [`collect_wikilinks`]
    #[must_use]
    pub fn links(&self) -> Vec<String> {
        collect_wikilinks(&self.parsed)
    }

    /// Count words of the rendered text, markup excluded
    ///
    /// # Example
    /// ```
    /// use obsidian_markdown::prelude::*;
    ///
    /// let note = Note::from_string("---\ntags:\n- my_tag\n---\n My **super** note", None::<&str>);
    ///
    /// assert_eq!(note.count_words(), 3);
    /// ```
    #[must_use]
    pub fn count_words(&self) -> usize {
        to_plain_text(&self.parsed).split_whitespace().count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[cfg_attr(feature = "tracing", tracing_test::traced_test)]
    #[test]
    fn name_from_path() {
        let note = Note::from_string("text", Some("folder/Super note.md"));
        assert_eq!(note.name(), Some("Super note".to_string()));
        assert_eq!(note.path(), Some(Path::new("folder/Super note.md")));

        let note = Note::from_string("text", None::<&str>);
        assert_eq!(note.name(), None);
    }

    #[cfg_attr(feature = "tracing", tracing_test::traced_test)]
    #[test]
    fn accessors() {
        let raw = "---\ntopic: life\n---\n# Title\n\n[[a]] [[b|B]] [[a]]";
        let note = Note::from_string(raw, None::<&str>);

        assert_eq!(note.raw(), raw);
        assert_eq!(note.frontmatter()["topic"], "life");
        assert_eq!(note.tokens().len(), 2);
        assert_eq!(note.links(), vec!["a", "b"]);
    }

    #[cfg_attr(feature = "tracing", tracing_test::traced_test)]
    #[test]
    fn count_words_skips_markup() {
        let note = Note::from_string("# One\n\n- two [[three|three four]]\n\n```\nfive\n```", None::<&str>);
        assert_eq!(note.count_words(), 5);
    }
}
