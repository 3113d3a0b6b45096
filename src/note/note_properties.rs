//! Typed access to frontmatter properties

use super::Note;
use crate::error::Error;
use serde::de::DeserializeOwned;

impl Note {
    /// Deserialize the frontmatter into `T`
    ///
    /// The frontmatter is converted to a YAML mapping first, so any
    /// `T: Deserialize` that fits the properties works, including
    /// `HashMap<String, serde_yml::Value>`.
    ///
    /// # Errors
    /// - [`Error::Yaml`] if the properties do not match `T`
    ///
    /// # Example
    /// ```
    /// use obsidian_markdown::prelude::*;
    /// use serde::Deserialize;
    ///
    /// #[derive(Deserialize)]
    /// struct Properties {
    ///     topic: String,
    ///     tags: Vec<String>,
    /// }
    ///
    /// let note = Note::from_string("---\ntopic: life\ntags: [a, b]\n---\n", None::<&str>);
    /// let properties: Properties = note.properties().unwrap();
    ///
    /// assert_eq!(properties.topic, "life");
    /// assert_eq!(properties.tags, vec!["a", "b"]);
    /// ```
    pub fn properties<T>(&self) -> Result<T, Error>
    where
        T: DeserializeOwned,
    {
        let value = self.frontmatter().to_yaml();
        Ok(serde_yml::from_value(value)?)
    }
}
