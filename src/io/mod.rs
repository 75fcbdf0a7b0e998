//! Reading and writing z-slice tables.
//!
//! # File Format
//!
//! Plain text, one grid cell per line, whitespace-separated floats:
//!
//! ```text
//! # columns: 0 1 2
//! # rows: 2
//! 12.5 -3.25 0.0
//! 12.75 -3.0 0.125
//! ```
//!
//! Input files from the simulation carry no header; column `i` is accessor
//! `i`. Files written by this crate add the `# columns:` and `# rows:` lines so
//! derived accessors survive a round trip.
//!
//! # Example
//!
//! ```ignore
//! use nebula_fields::io::{read_dataset, write_dataset, TimestepFiles};
//! use std::path::Path;
//!
//! let files = TimestepFiles::vector("data/extracted/vector").files_for(&[1, 2, 3]);
//! let dataset = read_dataset(&files, None)?;
//! write_dataset(Path::new("out/curl"), "curl", &dataset)?;
//! ```

mod naming;
mod table_reader;
mod table_writer;

pub use naming::{SCALAR_STEM, SLICE_SUFFIX, TimestepFile, TimestepFiles, VECTOR_STEM, slice_file_name};
pub use table_reader::{TableFileError, parse_table, read_dataset, read_table_file};
pub use table_writer::{write_dataset, write_table, write_table_file};
