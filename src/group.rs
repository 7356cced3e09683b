use std::{
    collections::BTreeMap,
    path::{Path, PathBuf},
};

use crate::discovery::{base_name, list_pngs};

/// How a base name selects files from the searched folders.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum MatchMode {
    /// The file's base name equals the target name.
    #[default]
    Exact,
    /// The full path string contains the target name anywhere.
    ///
    /// `a` matches `in/ab.png` and `a/other.png` as well as `in/a.png`.
    Substring,
}

impl MatchMode {
    /// Whether `path` belongs to the group called `name` under this mode.
    pub fn matches(self, path: &Path, name: &str) -> bool {
        match self {
            Self::Exact => base_name(path).is_some_and(|b| b == name),
            Self::Substring => path.to_string_lossy().contains(name),
        }
    }
}

/// Find every `.png` under `folders` that belongs to the group `name`.
///
/// Each folder is listed and sorted independently; the folder lists are
/// concatenated in the given order, then filtered lazily.
pub fn search_in_folders<'a>(
    folders: &[PathBuf],
    name: &'a str,
    mode: MatchMode,
) -> impl Iterator<Item = PathBuf> + use<'a> {
    let files: Vec<PathBuf> = folders.iter().flat_map(|f| list_pngs(f)).collect();
    files
        .into_iter()
        .filter(move |path| mode.matches(path, name))
}

/// Exact base-name grouping built from one discovery pass per folder.
#[derive(Clone, Debug, Default)]
pub struct GroupIndex {
    groups: BTreeMap<String, Vec<PathBuf>>,
}

impl GroupIndex {
    /// Index every `.png` under `folders`, keyed by base name.
    ///
    /// Within a group, paths keep folder order, then sorted order.
    pub fn build<P: AsRef<Path>>(folders: &[P]) -> Self {
        let mut groups: BTreeMap<String, Vec<PathBuf>> = BTreeMap::new();
        for folder in folders {
            for path in list_pngs(folder.as_ref()) {
                let Some(name) = base_name(&path) else {
                    tracing::warn!(path = %path.display(), "skipping file without a base name");
                    continue;
                };
                groups.entry(name).or_default().push(path);
            }
        }
        Self { groups }
    }

    /// Paths for `name`, or an empty slice when nothing carries it.
    pub fn get(&self, name: &str) -> &[PathBuf] {
        self.groups.get(name).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Number of distinct base names.
    pub fn len(&self) -> usize {
        self.groups.len()
    }

    /// True when no file was indexed.
    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    /// Iterate `(base name, paths)` in base-name order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &[PathBuf])> {
        self.groups.iter().map(|(k, v)| (k.as_str(), v.as_slice()))
    }
}

#[cfg(test)]
#[path = "../tests/unit/group.rs"]
mod tests;
