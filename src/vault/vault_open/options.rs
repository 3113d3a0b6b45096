//! Options for [`VaultBuilder`] and [`Vault`]
//!
//! [`VaultBuilder`]: crate::vault::vault_open::VaultBuilder
//! [`Vault`]: crate::vault::Vault

use std::path::{Path, PathBuf};

macro_rules! impl_setter {
    ($name:ident, $t:ty) => {
        #[must_use]
        #[allow(missing_docs)]
        pub const fn $name(mut self, $name: $t) -> Self {
            self.$name = $name;
            self
        }
    };
}

/// Where and how to look for notes
///
/// # Example
/// ```
/// use obsidian_markdown::prelude::*;
///
/// let options = VaultOptions::new("notes")
///     .include_hidden(true)
///     .max_depth(Some(2));
///
/// assert_eq!(options.path(), std::path::Path::new("notes"));
/// ```
///
/// [`VaultBuilder`]: crate::vault::vault_open::VaultBuilder
/// [`Vault`]: crate::vault::Vault
#[derive(Debug, PartialEq, Eq, Clone)]
pub struct VaultOptions {
    /// Path to vault
    path: PathBuf,

    /// Walk into dot-directories and read dot-files
    pub(super) include_hidden: bool,

    /// Follow symbolic links below the root
    pub(super) follow_links: bool,

    /// Directory depth limit, root is `0`
    pub(super) max_depth: Option<usize>,
}

impl VaultOptions {
    /// Create new [`VaultOptions`]: hidden entries skipped, links not followed, no depth limit
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            include_hidden: false,
            follow_links: false,
            max_depth: None,
        }
    }

    impl_setter!(include_hidden, bool);
    impl_setter!(follow_links, bool);
    impl_setter!(max_depth, Option<usize>);

    /// Get path to vault
    #[inline]
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Get into path to vault
    #[inline]
    #[must_use]
    pub fn into_path(self) -> PathBuf {
        self.path
    }
}
