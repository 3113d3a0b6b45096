//! Tags of a [`Note`]

use super::Note;
use crate::tags::collect_tags;

impl Note {
    /// Return tags from note, see [`collect_tags`]
    ///
    /// # Example
    /// ```
    /// use obsidian_markdown::prelude::*;
    ///
    /// let raw_text = "---\ntags:\n- my_tag\n---\nSameData #super_tag ##no_tag and #warning_tag! #😭";
    /// let note = Note::from_string(raw_text, None::<&str>);
    ///
    /// assert_eq!(note.tags(), vec!["my_tag", "super_tag", "warning_tag", "😭"]);
    /// ```
    #[must_use]
    pub fn tags(&self) -> Vec<String> {
        collect_tags(self.parsed())
    }
}
