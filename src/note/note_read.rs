//! Constructors for [`Note`]

use super::Note;
use crate::{error::Error, parser::parse};
use std::{fs::File, io::Read, path::Path};

impl Note {
    /// Parses an Obsidian note from a string
    ///
    /// Never fails: malformed markdown or frontmatter degrade to plain text.
    ///
    /// # Arguments
    /// - `raw_text`: Raw markdown content with optional frontmatter
    /// - `path`: Optional source path for reference
    pub fn from_string(raw_text: impl Into<String>, path: Option<impl AsRef<Path>>) -> Self {
        let raw = raw_text.into();

        #[cfg(feature = "tracing")]
        tracing::trace!("Parse obsidian note from string ({} bytes)", raw.len());

        let parsed = parse(&raw);

        Self {
            raw,
            path: path.map(|path| path.as_ref().to_path_buf()),
            parsed,
        }
    }

    /// Parses an Obsidian note from a reader
    ///
    /// # Errors
    /// - [`Error::Io`] for read errors
    /// - [`Error::FromUtf8`] if the data is not UTF-8
    pub fn from_reader(read: &mut impl Read, path: Option<impl AsRef<Path>>) -> Result<Self, Error> {
        #[cfg(feature = "tracing")]
        tracing::trace!("Parse obsidian note from reader");

        let mut data = Vec::new();
        read.read_to_end(&mut data)?;

        let text = String::from_utf8(data)?;
        Ok(Self::from_string(text, path))
    }

    /// Parses an Obsidian note from a file
    ///
    /// # Errors
    /// - [`Error::Io`] for filesystem errors
    /// - [`Error::FromUtf8`] if the file is not UTF-8
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, Error> {
        let path = path.as_ref();

        #[cfg(feature = "tracing")]
        tracing::trace!("Parse obsidian note from file: {}", path.display());

        let mut file = File::open(path)?;
        Self::from_reader(&mut file, Some(path))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::BlockToken;
    use std::io::{Cursor, Write};
    use tempfile::NamedTempFile;

    const TEST_DATA: &str = "---\n\
topic: life\n\
created: 2025-03-16\n\
---\n\
Test data\n\
---\n\
Two test data";

    const UNICODE_DATA: &str = "---\ndata: 💩\n---\nSuper data 💩💩💩";

    const SPACE_DATA: &str = "  ---\ntest: test-data\n---\n";

    fn test_data(note: &Note) {
        assert_eq!(note.frontmatter()["topic"], "life");
        assert_eq!(note.frontmatter()["created"], "2025-03-16");

        // `---` after a paragraph line is a setext underline
        assert!(matches!(note.tokens(), [BlockToken::Heading(_), BlockToken::Paragraph { .. }]));
    }

    #[cfg_attr(feature = "tracing", tracing_test::traced_test)]
    #[test]
    fn from_string() {
        test_data(&Note::from_string(TEST_DATA, None::<&str>));
    }

    #[cfg_attr(feature = "tracing", tracing_test::traced_test)]
    #[test]
    fn from_reader() {
        let note = Note::from_reader(&mut Cursor::new(TEST_DATA), Some("Super note.md")).unwrap();

        test_data(&note);
        assert_eq!(note.name(), Some("Super note".to_string()));
    }

    #[cfg_attr(feature = "tracing", tracing_test::traced_test)]
    #[test]
    fn from_file() {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(TEST_DATA.as_bytes()).unwrap();

        let note = Note::from_file(file.path()).unwrap();

        test_data(&note);
        assert_eq!(note.path(), Some(file.path()));
    }

    #[cfg_attr(feature = "tracing", tracing_test::traced_test)]
    #[test]
    fn from_file_missing() {
        let error = Note::from_file("/definitely/not/here.md").unwrap_err();
        assert!(matches!(error, Error::Io(_)));
    }

    #[cfg_attr(feature = "tracing", tracing_test::traced_test)]
    #[test]
    fn from_reader_invalid_utf8() {
        let error = Note::from_reader(&mut Cursor::new(b"\xff\xfe\xfd"), None::<&str>).unwrap_err();
        assert!(matches!(error, Error::FromUtf8(_)));
    }

    #[cfg_attr(feature = "tracing", tracing_test::traced_test)]
    #[test]
    fn with_unicode() {
        let note = Note::from_string(UNICODE_DATA, None::<&str>);

        assert_eq!(note.frontmatter()["data"], "💩");
        assert_eq!(note.count_words(), 3);
    }

    #[cfg_attr(feature = "tracing", tracing_test::traced_test)]
    #[test]
    fn space_before_properties() {
        let note = Note::from_string(SPACE_DATA, None::<&str>);

        assert!(note.frontmatter().is_empty());
        assert_eq!(note.raw(), SPACE_DATA);
    }
}
