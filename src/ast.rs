//! Abstract syntax tree produced by [`parse`](crate::parser::parse)
//!
//! The tree is a plain owned structure: every node belongs to exactly one parent
//! and there are no back-references. All nodes derive [`serde`] traits with an
//! internal `type` tag, so a parsed document can be stored or shipped as JSON/YAML.
//!
//! # Example
//! ```
//! use obsidian_markdown::prelude::*;
//!
//! let result = parse("# Title\n\nSee [[Other note|other]]");
//!
//! assert!(matches!(&result.tokens[0], BlockToken::Heading(heading) if heading.level == 1));
//! assert_eq!(result.tokens.len(), 2);
//! ```

use serde::{
    Deserialize, Deserializer, Serialize, Serializer,
    de::{MapAccess, Visitor},
    ser::SerializeMap,
};
use std::{fmt, ops::Index};

/// Single frontmatter value
///
/// Only the shapes the frontmatter extractor understands are representable.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FrontMatterValue {
    /// Bare `true` / `false`
    Bool(bool),

    /// Bare integer literal
    Integer(i64),

    /// Bare floating point literal
    Float(f64),

    /// Quoted or raw string
    String(String),

    /// Inline `[a, b]` array or indented `- item` lines
    List(Vec<String>),
}

impl FrontMatterValue {
    /// Returns the string if this value is a [`FrontMatterValue::String`]
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(value) => Some(value),
            _ => None,
        }
    }

    /// Returns the list if this value is a [`FrontMatterValue::List`]
    #[must_use]
    pub fn as_list(&self) -> Option<&[String]> {
        match self {
            Self::List(values) => Some(values),
            _ => None,
        }
    }

    /// Returns the flag if this value is a [`FrontMatterValue::Bool`]
    #[must_use]
    pub const fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(value) => Some(*value),
            _ => None,
        }
    }

    /// Convert into [`serde_yml::Value`]
    #[must_use]
    pub fn to_yaml(&self) -> serde_yml::Value {
        match self {
            Self::Bool(value) => serde_yml::Value::Bool(*value),
            Self::Integer(value) => serde_yml::Value::Number((*value).into()),
            Self::Float(value) => serde_yml::Value::Number((*value).into()),
            Self::String(value) => serde_yml::Value::String(value.clone()),
            Self::List(values) => serde_yml::Value::Sequence(
                values
                    .iter()
                    .map(|value| serde_yml::Value::String(value.clone()))
                    .collect(),
            ),
        }
    }
}

impl From<&str> for FrontMatterValue {
    fn from(value: &str) -> Self {
        Self::String(value.to_string())
    }
}

impl From<Vec<&str>> for FrontMatterValue {
    fn from(values: Vec<&str>) -> Self {
        Self::List(values.into_iter().map(ToString::to_string).collect())
    }
}

impl PartialEq<&str> for FrontMatterValue {
    fn eq(&self, other: &&str) -> bool {
        self.as_str() == Some(*other)
    }
}

/// Ordered frontmatter mapping
///
/// Keys keep the order in which they appear in the document.
/// A repeated key replaces the earlier value in place.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FrontMatter {
    entries: Vec<(String, FrontMatterValue)>,
}

impl FrontMatter {
    /// Create empty [`FrontMatter`]
    #[must_use]
    pub const fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Insert or replace a value
    pub fn insert(&mut self, key: impl Into<String>, value: FrontMatterValue) {
        let key = key.into();

        match self.entries.iter_mut().find(|(name, _)| *name == key) {
            Some((_, slot)) => *slot = value,
            None => self.entries.push((key, value)),
        }
    }

    /// Get value by key
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&FrontMatterValue> {
        self.entries
            .iter()
            .find(|(name, _)| name == key)
            .map(|(_, value)| value)
    }

    pub(crate) fn get_mut(&mut self, key: &str) -> Option<&mut FrontMatterValue> {
        self.entries
            .iter_mut()
            .find(|(name, _)| name == key)
            .map(|(_, value)| value)
    }

    /// Returns `true` if the key is present
    #[must_use]
    pub fn contains_key(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    /// Iterate entries in document order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &FrontMatterValue)> {
        self.entries.iter().map(|(key, value)| (key.as_str(), value))
    }

    /// Count of keys
    #[must_use]
    pub const fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if there are no keys
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Convert into a [`serde_yml::Mapping`] keeping key order
    #[must_use]
    pub fn to_yaml(&self) -> serde_yml::Value {
        let mapping = self
            .entries
            .iter()
            .map(|(key, value)| (serde_yml::Value::String(key.clone()), value.to_yaml()))
            .collect::<serde_yml::Mapping>();

        serde_yml::Value::Mapping(mapping)
    }
}

impl Index<&str> for FrontMatter {
    type Output = FrontMatterValue;

    #[allow(clippy::panic, reason = "Same contract as `HashMap` indexing")]
    fn index(&self, key: &str) -> &Self::Output {
        self.get(key)
            .unwrap_or_else(|| panic!("key `{key}` not found in frontmatter"))
    }
}

impl<K: Into<String>> FromIterator<(K, FrontMatterValue)> for FrontMatter {
    fn from_iter<I: IntoIterator<Item = (K, FrontMatterValue)>>(iter: I) -> Self {
        let mut frontmatter = Self::new();
        for (key, value) in iter {
            frontmatter.insert(key, value);
        }

        frontmatter
    }
}

impl Serialize for FrontMatter {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (key, value) in &self.entries {
            map.serialize_entry(key, value)?;
        }

        map.end()
    }
}

impl<'de> Deserialize<'de> for FrontMatter {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct FrontMatterVisitor;

        impl<'de> Visitor<'de> for FrontMatterVisitor {
            type Value = FrontMatter;

            fn expecting(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
                formatter.write_str("a frontmatter mapping")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Self::Value, A::Error> {
                let mut frontmatter = FrontMatter::new();
                while let Some((key, value)) = access.next_entry::<String, FrontMatterValue>()? {
                    frontmatter.insert(key, value);
                }

                Ok(frontmatter)
            }
        }

        deserializer.deserialize_map(FrontMatterVisitor)
    }
}

/// Inline link `[text](href "title")` or autolink `<https://...>`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Link {
    pub href: String,
    pub title: Option<String>,
    pub children: Vec<InlineToken>,
}

/// Image `![alt](src "title")`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Image {
    pub src: String,
    pub alt: String,
    pub title: Option<String>,
}

/// Obsidian wikilink `[[target]]` / `[[target|display]]`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WikiLink {
    /// Raw target, `#heading` and `^block` suffixes included
    pub target: String,

    /// Display text override
    pub display: Option<String>,
}

impl WikiLink {
    /// Note name the link points to
    ///
    /// Strips `#heading` and `^block` anchors.
    ///
    /// # Example
    /// ```
    /// use obsidian_markdown::ast::WikiLink;
    ///
    /// let link = WikiLink { target: "Physics#Gravity".to_string(), display: None };
    /// assert_eq!(link.note_name(), "Physics");
    /// ```
    #[must_use]
    pub fn note_name(&self) -> &str {
        let end = self.target.find(['#', '^']).unwrap_or(self.target.len());
        self.target[..end].trim()
    }

    /// Text a renderer should show: the display override or the target
    #[must_use]
    pub fn label(&self) -> &str {
        self.display.as_deref().unwrap_or(&self.target)
    }
}

/// Inline-level node
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum InlineToken {
    Text { content: String },
    Bold { children: Vec<InlineToken> },
    Italic { children: Vec<InlineToken> },
    BoldItalic { children: Vec<InlineToken> },
    Strikethrough { children: Vec<InlineToken> },
    Highlight { children: Vec<InlineToken> },
    Code { content: String },
    Link(Link),
    Image(Image),
    #[serde(rename = "wikilink")]
    WikiLink(WikiLink),
    Embed { target: String },
    #[serde(rename = "linebreak")]
    LineBreak,
}

impl InlineToken {
    /// Shortcut for [`InlineToken::Text`]
    pub fn text(content: impl Into<String>) -> Self {
        Self::Text {
            content: content.into(),
        }
    }

    /// Nested inline children, if this variant has any
    #[must_use]
    pub fn children(&self) -> Option<&[Self]> {
        match self {
            Self::Bold { children }
            | Self::Italic { children }
            | Self::BoldItalic { children }
            | Self::Strikethrough { children }
            | Self::Highlight { children } => Some(children),
            Self::Link(link) => Some(&link.children),
            _ => None,
        }
    }
}

/// ATX or setext heading
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Heading {
    /// 1..=6
    pub level: u8,
    pub children: Vec<InlineToken>,
}

/// Fenced code block
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CodeBlock {
    pub language: Option<String>,
    pub content: String,
}

/// Obsidian callout `> [!kind]- title`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Callout {
    /// Lowercase callout kind (`note`, `warning`, ...)
    pub kind: String,
    pub title: Option<String>,

    /// `true` if a `-` or `+` fold marker is present
    pub foldable: bool,

    /// `true` for `-` (collapsed by default)
    pub collapsed: bool,
    pub children: Vec<BlockToken>,
}

/// List item, a mini-document of its own
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListItem {
    /// [`None`] for a plain item, `Some(checked)` for a task item
    pub checked: Option<bool>,
    pub children: Vec<BlockToken>,
}

/// Bullet or ordered list
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct List {
    pub ordered: bool,
    pub start: Option<u64>,
    pub items: Vec<ListItem>,
}

/// Column alignment from the table delimiter row
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Alignment {
    Left,
    Center,
    Right,
}

/// Table cell
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableCell {
    pub align: Option<Alignment>,
    pub children: Vec<InlineToken>,
}

/// Pipe table
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Table {
    pub header: Vec<TableCell>,
    pub rows: Vec<Vec<TableCell>>,
}

/// Block-level node
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum BlockToken {
    Paragraph { children: Vec<InlineToken> },
    Heading(Heading),
    CodeBlock(CodeBlock),
    Blockquote { children: Vec<BlockToken> },
    Callout(Callout),
    List(List),
    Table(Table),
    HorizontalRule,
    Html { content: String },
}

impl BlockToken {
    /// Visit every inline token of this block, depth-first, nested blocks included
    pub fn visit_inline<'t>(&'t self, visitor: &mut impl FnMut(&'t InlineToken)) {
        match self {
            Self::Paragraph { children } | Self::Heading(Heading { children, .. }) => {
                visit_inline_tokens(children, visitor);
            }
            Self::Blockquote { children } | Self::Callout(Callout { children, .. }) => {
                children.iter().for_each(|block| block.visit_inline(visitor));
            }
            Self::List(list) => list
                .items
                .iter()
                .flat_map(|item| &item.children)
                .for_each(|block| block.visit_inline(visitor)),
            Self::Table(table) => table
                .header
                .iter()
                .chain(table.rows.iter().flatten())
                .for_each(|cell| visit_inline_tokens(&cell.children, visitor)),
            Self::CodeBlock(_) | Self::HorizontalRule | Self::Html { .. } => {}
        }
    }
}

fn visit_inline_tokens<'t>(tokens: &'t [InlineToken], visitor: &mut impl FnMut(&'t InlineToken)) {
    for token in tokens {
        visitor(token);

        if let Some(children) = token.children() {
            visit_inline_tokens(children, visitor);
        }
    }
}

/// Result of [`parse`](crate::parser::parse)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ParseResult {
    pub frontmatter: FrontMatter,
    pub tokens: Vec<BlockToken>,
}

impl ParseResult {
    /// Visit every inline token in document order
    pub fn visit_inline<'t>(&'t self, mut visitor: impl FnMut(&'t InlineToken)) {
        for block in &self.tokens {
            block.visit_inline(&mut visitor);
        }
    }
}
