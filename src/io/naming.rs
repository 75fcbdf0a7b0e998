//! File naming of per-timestep z-slice dumps.
//!
//! The simulation writes one file per output step:
//! `{directory}/{stem}.{timestep:04}.zslice.txt`, e.g.
//! `data/extracted/scalar/multifield.0049.zslice.txt`.

use std::path::{Path, PathBuf};

/// Stem of the scalar chemistry files.
pub const SCALAR_STEM: &str = "multifield";
/// Stem of the velocity files.
pub const VECTOR_STEM: &str = "velocity";
/// Suffix shared by every slice file.
pub const SLICE_SUFFIX: &str = "zslice.txt";

/// A timestep id and the file that holds it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TimestepFile {
    pub timestep: u32,
    pub path: PathBuf,
}

impl TimestepFile {
    pub fn new(timestep: u32, path: PathBuf) -> Self {
        Self { timestep, path }
    }
}

/// One family of slice files in a directory.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TimestepFiles {
    directory: PathBuf,
    stem: String,
}

impl TimestepFiles {
    pub fn new(directory: impl Into<PathBuf>, stem: impl Into<String>) -> Self {
        Self {
            directory: directory.into(),
            stem: stem.into(),
        }
    }

    /// Scalar `multifield` files in `directory`.
    pub fn scalar(directory: impl Into<PathBuf>) -> Self {
        Self::new(directory, SCALAR_STEM)
    }

    /// Velocity files in `directory`.
    pub fn vector(directory: impl Into<PathBuf>) -> Self {
        Self::new(directory, VECTOR_STEM)
    }

    pub fn directory(&self) -> &Path {
        &self.directory
    }

    pub fn stem(&self) -> &str {
        &self.stem
    }

    /// File name of a timestep, without the directory.
    pub fn file_name(&self, timestep: u32) -> String {
        slice_file_name(&self.stem, timestep)
    }

    /// Full path of a timestep.
    pub fn path_for(&self, timestep: u32) -> PathBuf {
        self.directory.join(self.file_name(timestep))
    }

    /// Paths for a selection of timesteps, in the given order.
    pub fn files_for(&self, timesteps: &[u32]) -> Vec<TimestepFile> {
        timesteps
            .iter()
            .map(|&t| TimestepFile::new(t, self.path_for(t)))
            .collect()
    }
}

/// `{stem}.{timestep:04}.zslice.txt`
pub fn slice_file_name(stem: &str, timestep: u32) -> String {
    format!("{}.{:04}.{}", stem, timestep, SLICE_SUFFIX)
}
