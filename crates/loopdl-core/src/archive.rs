//! Dedup archive: identifiers of already-processed items.
//!
//! Read-only from this layer's perspective; appending finished items is
//! an engine responsibility.

use serde::Serialize;
use std::collections::HashSet;
use std::fs;
use std::io;
use std::path::Path;

/// Set of already-processed identifiers, loaded once at startup.
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize)]
pub struct ArchiveSet(HashSet<String>);

impl ArchiveSet {
    /// Loads the archive if `path` is set and exists. A missing file is
    /// first-run behavior, not an error, and is never created here.
    /// Lines are trimmed; duplicates and blank lines are dropped.
    pub fn load(path: Option<&Path>) -> io::Result<Self> {
        let Some(path) = path else {
            return Ok(Self::default());
        };
        if !path.exists() {
            return Ok(Self::default());
        }

        let data = fs::read_to_string(path)?;
        let ids: HashSet<String> = data
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .map(str::to_string)
            .collect();
        tracing::debug!("loaded {} archived ids from {}", ids.len(), path.display());
        Ok(Self(ids))
    }

    pub fn contains(&self, id: &str) -> bool {
        self.0.contains(id)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl FromIterator<String> for ArchiveSet {
    fn from_iter<I: IntoIterator<Item = String>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::tempdir;

    #[test]
    fn unset_path_yields_empty_set() {
        let archive = ArchiveSet::load(None).unwrap();
        assert!(archive.is_empty());
    }

    #[test]
    fn missing_file_yields_empty_set() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("absent.txt");
        let archive = ArchiveSet::load(Some(&path)).unwrap();
        assert!(archive.is_empty());
        assert!(!path.exists(), "loader must not create the file");
    }

    #[test]
    fn duplicates_and_whitespace_collapse() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("archive.txt");
        let mut file = fs::File::create(&path).unwrap();
        file.write_all(b"id1\nid2\nid1\n  id2  \n\n").unwrap();

        let archive = ArchiveSet::load(Some(&path)).unwrap();
        let expected: ArchiveSet = ["id1", "id2"].into_iter().map(str::to_string).collect();
        assert_eq!(archive, expected);
        assert!(!archive.contains("id3"));
    }
}
