//! Module for open impl [`Vault`]

pub mod options;

use super::Vault;
use crate::{error::Error, note::Note};
pub use options::VaultOptions;
use std::path::{Path, PathBuf};
use walkdir::{DirEntry, WalkDir};

fn is_hidden(path: impl AsRef<Path>) -> bool {
    path.as_ref()
        .file_name()
        .is_some_and(|e| e.to_str().is_some_and(|name| name.starts_with('.')))
}

fn is_md_file(path: impl AsRef<Path>) -> bool {
    path.as_ref()
        .extension()
        .is_some_and(|p| p.eq_ignore_ascii_case("md"))
}

/// Walks a vault directory and reads its notes
///
/// Entries are visited sorted by file name, so the note order is stable
/// across runs and platforms.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub struct VaultBuilder<'a> {
    options: &'a VaultOptions,
}

impl<'a> VaultBuilder<'a> {
    /// Create [`VaultBuilder`]
    #[must_use]
    pub const fn new(options: &'a VaultOptions) -> Self {
        Self { options }
    }

    /// Markdown files of the vault
    ///
    /// Unreadable directory entries are skipped.
    pub fn files(self) -> impl Iterator<Item = PathBuf> {
        let include_hidden = self.options.include_hidden;

        WalkDir::new(self.options.path())
            .follow_links(self.options.follow_links)
            .max_depth(self.options.max_depth.unwrap_or(usize::MAX))
            .min_depth(1)
            .sort_by_file_name()
            .into_iter()
            .filter_entry(move |entry| {
                entry.depth() == 0 || include_hidden || !is_hidden(entry.path())
            })
            .filter_map(Result::ok)
            .filter(|entry| entry.file_type().is_file())
            .map(DirEntry::into_path)
            .filter(|path| is_md_file(path))
    }

    /// Into [`VaultBuilder`] to iterator
    #[allow(clippy::should_implement_trait)]
    pub fn into_iter(self) -> impl Iterator<Item = Result<Note, Error>> {
        self.files().map(Note::from_file)
    }

    /// Into [`VaultBuilder`] to parallel iterator
    #[cfg_attr(docsrs, doc(cfg(feature = "rayon")))]
    #[cfg(feature = "rayon")]
    #[must_use]
    pub fn into_par_iter(self) -> impl rayon::iter::ParallelIterator<Item = Result<Note, Error>> {
        use rayon::prelude::*;

        let files: Vec<_> = self.files().collect();
        files.into_par_iter().map(Note::from_file)
    }
}

/// Keep readable notes, log the rest
fn load_note(note: Result<Note, Error>) -> Option<Note> {
    #[cfg(feature = "tracing")]
    if let Err(error) = &note {
        tracing::warn!("Skip note: {error}");
    }

    note.ok()
}

fn check_dir(options: &VaultOptions) -> Result<(), Error> {
    if options.path().is_dir() {
        Ok(())
    } else {
        Err(Error::IsNotDir(options.path().to_path_buf()))
    }
}

impl Vault {
    /// Open a vault: every markdown file under the options' path
    ///
    /// Files that cannot be read or are not UTF-8 are skipped.
    ///
    /// # Errors
    /// - [`Error::IsNotDir`] if the path is not a directory
    ///
    /// # Example
    /// ```no_run
    /// use obsidian_markdown::prelude::*;
    ///
    /// let vault = Vault::open(&VaultOptions::new("/path/to/vault")).unwrap();
    ///
    /// for note in vault.notes() {
    ///     println!("{:?}: {} words", note.name(), note.count_words());
    /// }
    /// ```
    #[cfg_attr(feature = "tracing", tracing::instrument(fields(path = %options.path().display())))]
    pub fn open(options: &VaultOptions) -> Result<Self, Error> {
        check_dir(options)?;

        let notes = VaultBuilder::new(options).into_iter().filter_map(load_note);
        Ok(Self::build_vault(notes, options))
    }

    /// Parallel [`Vault::open`]
    ///
    /// # Errors
    /// - [`Error::IsNotDir`] if the path is not a directory
    #[cfg_attr(docsrs, doc(cfg(feature = "rayon")))]
    #[cfg(feature = "rayon")]
    #[cfg_attr(feature = "tracing", tracing::instrument(fields(path = %options.path().display())))]
    pub fn par_open(options: &VaultOptions) -> Result<Self, Error> {
        use rayon::prelude::*;

        check_dir(options)?;

        let notes = VaultBuilder::new(options)
            .into_par_iter()
            .filter_map(load_note);
        Ok(Self::par_build_vault(notes, options))
    }

    /// Build vault from iterator
    pub fn build_vault(iter: impl Iterator<Item = Note>, options: &VaultOptions) -> Self {
        let notes: Vec<_> = iter.collect();

        Self::impl_build_vault(notes, options)
    }

    /// Build vault from parallel iterator
    #[cfg_attr(docsrs, doc(cfg(feature = "rayon")))]
    #[cfg(feature = "rayon")]
    pub fn par_build_vault(
        iter: impl rayon::iter::ParallelIterator<Item = Note>,
        options: &VaultOptions,
    ) -> Self {
        let notes: Vec<_> = iter.collect();

        Self::impl_build_vault(notes, options)
    }

    fn impl_build_vault(notes: Vec<Note>, options: &VaultOptions) -> Self {
        #[cfg(feature = "tracing")]
        tracing::debug!(
            "Building vault for {} with {} notes",
            options.path().display(),
            notes.len()
        );

        Self {
            notes,
            path: options.path().to_path_buf(),
        }
    }
}

/// Trait for build [`Vault`] from iterator
pub trait IteratorVaultBuilder: Iterator<Item = Note>
where
    Self: Sized,
{
    /// Build [`Vault`] from iterator
    fn build_vault(self, options: &VaultOptions) -> Vault {
        Vault::build_vault(self, options)
    }
}

impl<I> IteratorVaultBuilder for I where I: Iterator<Item = Note> {}

/// Trait for build [`Vault`] from parallel iterator
#[cfg_attr(docsrs, doc(cfg(feature = "rayon")))]
#[cfg(feature = "rayon")]
pub trait ParallelIteratorVaultBuilder: rayon::iter::ParallelIterator<Item = Note> {
    /// Build [`Vault`] from parallel iterator
    #[cfg_attr(docsrs, doc(cfg(feature = "rayon")))]
    fn build_vault(self, options: &VaultOptions) -> Vault {
        Vault::par_build_vault(self, options)
    }
}

#[cfg(feature = "rayon")]
impl<I> ParallelIteratorVaultBuilder for I where I: rayon::iter::ParallelIterator<Item = Note> {}
