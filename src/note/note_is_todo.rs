//! Todo marker of a [`Note`]

use super::Note;

const TODO_TAG: &str = "todo";

impl Note {
    /// Note is marked todo?
    ///
    /// True when the `todo` tag is present in frontmatter or text.
    ///
    /// # Example
    /// ```
    /// use obsidian_markdown::prelude::*;
    ///
    /// let raw_text = "---\ntags:\n- todo\n---\nSameData";
    /// let note = Note::from_string(raw_text, None::<&str>);
    ///
    /// assert!(note.is_todo());
    /// ```
    #[cfg_attr(feature = "tracing", tracing::instrument(skip(self), ret, fields(path = ?self.path())))]
    #[must_use]
    pub fn is_todo(&self) -> bool {
        self.tags().iter().any(|tag| tag == TODO_TAG)
    }
}
