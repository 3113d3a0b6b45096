//! Notes sharing a name
//!
//! Wikilinks address notes by name, so two files with the same stem in
//! different folders make `[[name]]` ambiguous for the link graph.

use super::Vault;
use crate::note::Note;

/// Notes of every group with more than one member, input order kept per group
fn duplicated<'a>(sorted_notes: &[(Option<String>, &'a Note)]) -> Vec<&'a Note> {
    sorted_notes
        .chunk_by(|(a, _), (b, _)| a.is_some() && a == b)
        .filter(|group| group.len() > 1)
        .flatten()
        .map(|(_, note)| *note)
        .collect()
}

impl Vault {
    fn named_notes(&self) -> Vec<(Option<String>, &Note)> {
        self.notes().iter().map(|note| (note.name(), note)).collect()
    }

    /// Notes whose name is used more than once, grouped by name
    ///
    /// # Other
    /// See [`have_duplicates_by_name`](Vault::have_duplicates_by_name)
    #[must_use]
    pub fn duplicates_by_name(&self) -> Vec<&Note> {
        #[cfg(feature = "tracing")]
        tracing::debug!(
            "Get duplicates notes by name in {} ({} notes)",
            self.path().display(),
            self.count_notes()
        );

        let mut notes = self.named_notes();
        notes.sort_by(|(a, _), (b, _)| a.cmp(b));

        let duplicates = duplicated(&notes);

        #[cfg(feature = "tracing")]
        tracing::debug!("Found {} duplicated notes", duplicates.len());

        duplicates
    }

    /// Parallel [`duplicates_by_name`](Vault::duplicates_by_name)
    #[cfg(feature = "rayon")]
    #[cfg_attr(docsrs, doc(cfg(feature = "rayon")))]
    #[must_use]
    pub fn par_duplicates_by_name(&self) -> Vec<&Note> {
        use rayon::prelude::*;

        let mut notes: Vec<_> = self
            .notes()
            .par_iter()
            .map(|note| (note.name(), note))
            .collect();
        notes.par_sort_by(|(a, _), (b, _)| a.cmp(b));

        duplicated(&notes)
    }

    /// `true` if some name is used by more than one note
    #[must_use]
    pub fn have_duplicates_by_name(&self) -> bool {
        !self.duplicates_by_name().is_empty()
    }

    /// Parallel [`have_duplicates_by_name`](Vault::have_duplicates_by_name)
    #[cfg(feature = "rayon")]
    #[cfg_attr(docsrs, doc(cfg(feature = "rayon")))]
    #[must_use]
    pub fn par_have_duplicates_by_name(&self) -> bool {
        !self.par_duplicates_by_name().is_empty()
    }
}
