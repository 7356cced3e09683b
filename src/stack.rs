use std::path::{Path, PathBuf};

use crate::{
    discovery::{PNG_EXT, base_name},
    foundation::error::{StackError, StackResult},
    raster::Raster,
};

/// Output file for a group: `<output_dir>/<base name of first>.png`.
pub fn output_file_for(first: &Path, output_dir: &Path) -> StackResult<PathBuf> {
    let name = base_name(first).ok_or_else(|| StackError::UnsupportedName {
        path: first.to_path_buf(),
    })?;
    Ok(output_dir.join(format!("{name}{PNG_EXT}")))
}

/// Pixel-wise maximum of `rasters`.
///
/// Every raster must have the first raster's shape. The fold starts from a
/// zero-filled accumulator, so the result does not depend on input order.
pub fn max_stack(rasters: &[Raster]) -> StackResult<Raster> {
    let first = rasters.first().ok_or(StackError::EmptyGroup)?;
    let shape = first.shape();
    if let Some(bad) = rasters.iter().find(|r| r.shape() != shape) {
        return Err(StackError::ShapeMismatch {
            expected: shape,
            found: bad.shape(),
            path: None,
        });
    }
    Ok(fold_max(rasters))
}

// Callers guarantee a non-empty slice of equal shapes.
fn fold_max(rasters: &[Raster]) -> Raster {
    let mut acc = Raster::zeros(rasters[0].shape());
    for r in rasters {
        acc.fold_max(r);
    }
    acc
}

/// Stack one group into `output_dir` and return the written path.
///
/// Every path is checked for existence before anything is decoded, and every
/// shape is checked before anything is written. An existing output file is
/// replaced.
#[tracing::instrument(skip_all, fields(first = tracing::field::Empty, count = tracing::field::Empty))]
pub fn stack<I>(paths: I, output_dir: &Path) -> StackResult<PathBuf>
where
    I: IntoIterator,
    I::Item: Into<PathBuf>,
{
    let paths: Vec<PathBuf> = paths.into_iter().map(Into::into).collect();
    let Some(first) = paths.first() else {
        return Err(StackError::EmptyGroup);
    };
    let span = tracing::Span::current();
    span.record("first", tracing::field::display(first.display()));
    span.record("count", paths.len());

    let output_file = output_file_for(first, output_dir)?;

    if let Some(missing) = paths.iter().find(|p| !p.exists()) {
        return Err(StackError::missing_file(missing));
    }

    let mut rasters = Vec::with_capacity(paths.len());
    for path in &paths {
        rasters.push(Raster::load(path)?);
    }

    let expected = rasters[0].shape();
    for (path, raster) in paths.iter().zip(&rasters) {
        if raster.shape() != expected {
            return Err(StackError::ShapeMismatch {
                expected,
                found: raster.shape(),
                path: Some(path.clone()),
            });
        }
    }

    let merged = fold_max(&rasters);
    merged.save_png(&output_file)?;
    tracing::debug!(out = %output_file.display(), shape = %expected, "wrote stack");
    Ok(output_file)
}

#[cfg(test)]
#[path = "../tests/unit/stack.rs"]
mod tests;
