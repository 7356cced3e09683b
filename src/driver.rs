use std::path::{Path, PathBuf};

use crate::{
    discovery::{base_name, list_pngs},
    foundation::error::{StackError, StackResult},
    group::{GroupIndex, MatchMode, search_in_folders},
    stack::stack,
};

/// What the driver does when a group fails.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum FailurePolicy {
    /// Stop at the first failing group and return its error.
    #[default]
    Abort,
    /// Record the failure in the [`RunReport`] and move on.
    Continue,
}

/// Options for [`run`].
#[derive(Clone, Copy, Debug, Default)]
pub struct StackOpts {
    /// How root base names select files in the other folders.
    pub match_mode: MatchMode,
    /// Abort or continue after a failing group.
    pub on_error: FailurePolicy,
}

/// A group that was stacked and written.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StackedGroup {
    /// Base name of the root file.
    pub name: String,
    /// Number of images folded into the output.
    pub members: usize,
    /// Written PNG.
    pub output: PathBuf,
}

/// A group that failed under [`FailurePolicy::Continue`].
#[derive(Debug)]
pub struct FailedGroup {
    /// Root file that seeded the group.
    pub root_file: PathBuf,
    /// Why it failed.
    pub error: StackError,
}

/// Outcome of one [`run`].
#[derive(Debug, Default)]
pub struct RunReport {
    /// Groups written, in root order.
    pub stacked: Vec<StackedGroup>,
    /// Groups that failed, in root order.
    pub failed: Vec<FailedGroup>,
}

impl RunReport {
    /// True when every group was written.
    pub fn is_success(&self) -> bool {
        self.failed.is_empty()
    }
}

/// Stack every `.png` under the root folder (`folders[0]`) with its
/// same-named counterparts across all `folders`, writing into `output_dir`.
///
/// Base names come only from the root folder. `output_dir` is created when
/// missing.
#[tracing::instrument(skip(folders, opts), fields(folder_count = folders.len()))]
pub fn run(folders: &[PathBuf], output_dir: &Path, opts: StackOpts) -> StackResult<RunReport> {
    let root = folders.first().ok_or(StackError::NoFolders)?;
    let root_files = list_pngs(root);

    if !output_dir.exists() {
        std::fs::create_dir_all(output_dir).map_err(|e| StackError::io(output_dir, e))?;
    }

    let resolver = GroupResolver::new(folders, opts.match_mode);
    let total = root_files.len();
    tracing::info!(root = %root.display(), total, "stacking groups");

    let mut report = RunReport::default();
    for (i, root_file) in root_files.into_iter().enumerate() {
        let outcome = base_name(&root_file)
            .ok_or_else(|| StackError::UnsupportedName {
                path: root_file.clone(),
            })
            .and_then(|name| {
                let members = resolver.resolve(&name);
                let count = members.len();
                let output = stack(members, output_dir)?;
                Ok(StackedGroup {
                    name,
                    members: count,
                    output,
                })
            });

        match outcome {
            Ok(group) => {
                tracing::info!(
                    "[{}/{}] {} ({} images)",
                    i + 1,
                    total,
                    group.name,
                    group.members
                );
                report.stacked.push(group);
            }
            Err(error) => {
                tracing::error!(file = %root_file.display(), "{error}");
                match opts.on_error {
                    FailurePolicy::Abort => return Err(error),
                    FailurePolicy::Continue => report.failed.push(FailedGroup { root_file, error }),
                }
            }
        }
    }

    Ok(report)
}

/// Group lookup for the driver loop.
///
/// Exact matching indexes every folder once up front. Substring matching
/// lists the folders again for every group.
enum GroupResolver<'a> {
    Indexed(GroupIndex),
    Scan(&'a [PathBuf]),
}

impl<'a> GroupResolver<'a> {
    fn new(folders: &'a [PathBuf], mode: MatchMode) -> Self {
        match mode {
            MatchMode::Exact => Self::Indexed(GroupIndex::build(folders)),
            MatchMode::Substring => Self::Scan(folders),
        }
    }

    fn resolve(&self, name: &str) -> Vec<PathBuf> {
        match self {
            Self::Indexed(index) => index.get(name).to_vec(),
            Self::Scan(folders) => search_in_folders(folders, name, MatchMode::Substring).collect(),
        }
    }
}

#[cfg(test)]
#[path = "../tests/unit/driver.rs"]
mod tests;
