use std::path::PathBuf;

use crate::raster::Shape;

/// Convenience result type used across maxstack.
pub type StackResult<T> = Result<T, StackError>;

/// Error taxonomy for discovery, grouping, and stacking.
///
/// Nothing in the library terminates the process. Errors travel up to the
/// driver, which applies its [`FailurePolicy`](crate::FailurePolicy).
#[derive(thiserror::Error, Debug)]
pub enum StackError {
    /// A path in a resolved group was not on disk at stacking time.
    #[error("path not found {}", .path.display())]
    MissingFile {
        /// The missing path.
        path: PathBuf,
    },

    /// A group member decoded to a different shape than the first member.
    #[error("not same shape: expected {expected}, found {found}{}", located(.path))]
    ShapeMismatch {
        /// Shape of the first image in the group.
        expected: Shape,
        /// Shape of the offending image.
        found: Shape,
        /// The offending image, when the rasters came from files.
        path: Option<PathBuf>,
    },

    /// A group resolved to zero paths.
    #[error("group has no images")]
    EmptyGroup,

    /// The driver was called without a root folder.
    #[error("at least one image folder is required")]
    NoFolders,

    /// A path whose file name cannot serve as a base name.
    #[error("no usable base name in {}", .path.display())]
    UnsupportedName {
        /// The offending path.
        path: PathBuf,
    },

    /// PNG decoding failed.
    #[error("decode '{}'", .path.display())]
    Decode {
        /// Image being decoded.
        path: PathBuf,
        /// Underlying decoder error.
        #[source]
        source: image::ImageError,
    },

    /// PNG encoding or writing failed.
    #[error("write png '{}'", .path.display())]
    Encode {
        /// Output path.
        path: PathBuf,
        /// Underlying encoder error.
        #[source]
        source: image::ImageError,
    },

    /// Filesystem error outside of image coding.
    #[error("io error at '{}'", .path.display())]
    Io {
        /// Path the operation targeted.
        path: PathBuf,
        /// Underlying IO error.
        #[source]
        source: std::io::Error,
    },
}

impl StackError {
    /// Build a [`StackError::MissingFile`] value.
    pub fn missing_file(path: impl Into<PathBuf>) -> Self {
        Self::MissingFile { path: path.into() }
    }

    /// Build a [`StackError::Io`] value.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

fn located(path: &Option<PathBuf>) -> String {
    path.as_ref()
        .map(|p| format!(" in {}", p.display()))
        .unwrap_or_default()
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
