//! maxstack merges same-named PNG layers found across several folders into one
//! image per name by taking the pixel-wise maximum.
//!
//! # Pipeline overview
//!
//! 1. **Discover**: list every `.png` under the root folder ([`list_pngs`]).
//! 2. **Group**: for each root file, collect files with the same base name across
//!    all folders ([`GroupIndex`], [`search_in_folders`]).
//! 3. **Stack**: check existence and shapes, fold with element-wise max, write
//!    `<base name>.png` into the output directory ([`stack`]).
//!
//! [`run`] drives the whole batch. Errors are returned as [`StackError`]; the
//! caller picks whether a failing group aborts the batch ([`FailurePolicy`]).
#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod discovery;
mod driver;
mod foundation;
mod group;
mod raster;
mod stack;

pub use discovery::{PNG_EXT, base_name, list_files, list_pngs};
pub use driver::{FailedGroup, FailurePolicy, RunReport, StackOpts, StackedGroup, run};
pub use foundation::error::{StackError, StackResult};
pub use group::{GroupIndex, MatchMode, search_in_folders};
pub use raster::{Raster, Shape};
pub use stack::{max_stack, output_file_for, stack};
