use std::path::{Path, PathBuf};

use walkdir::WalkDir;

/// Extension accepted for every input and output image.
pub const PNG_EXT: &str = ".png";

/// Recursively list regular files under `dir` whose file name ends with one of
/// `extensions`, sorted by path.
///
/// The suffix check is plain and case-sensitive. A missing or unreadable
/// directory yields an empty list rather than an error. Symlinks are not
/// followed into directories, but a symlink that does not point at a directory
/// is listed like a file.
pub fn list_files(dir: &Path, extensions: &[&str]) -> Vec<PathBuf> {
    let mut out: Vec<PathBuf> = WalkDir::new(dir)
        .into_iter()
        .filter_map(|e| e.ok())
        .filter(|e| !is_dir_like(e))
        .filter(|e| has_extension(&e.file_name().to_string_lossy(), extensions))
        .map(|e| e.into_path())
        .collect();
    out.sort();
    tracing::debug!(dir = %dir.display(), count = out.len(), "listed files");
    out
}

/// [`list_files`] restricted to `.png`.
pub fn list_pngs(dir: &Path) -> Vec<PathBuf> {
    list_files(dir, &[PNG_EXT])
}

/// File name with its final extension removed (`a.b.png` -> `a.b`).
pub fn base_name(path: &Path) -> Option<String> {
    path.file_stem().and_then(|s| s.to_str()).map(str::to_owned)
}

fn is_dir_like(entry: &walkdir::DirEntry) -> bool {
    entry.file_type().is_dir() || (entry.path_is_symlink() && entry.path().is_dir())
}

fn has_extension(file_name: &str, extensions: &[&str]) -> bool {
    extensions.iter().any(|ext| file_name.ends_with(ext))
}

#[cfg(test)]
#[path = "../tests/unit/discovery.rs"]
mod tests;
