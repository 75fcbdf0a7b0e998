//! Reader for whitespace-delimited z-slice tables.
//!
//! # File Format
//!
//! ```text
//! 1.2e3 85.0 0.7 0.01 0.25 0.02 0.005 1e-8 0.01 1e-6
//! 1.3e3 86.1 0.7 0.01 0.25 0.02 0.005 1e-8 0.01 1e-6
//! ```
//!
//! One row per grid cell in `x + y*W + z*W*H` order, no header. Blank lines
//! and `#` comments are skipped. A `# columns: 3 4 6` comment (as written by
//! [`write_table`](super::write_table)) assigns accessors to the columns;
//! without it, column `i` gets accessor `i`. A `# rows: N` comment declares
//! the row count, which lets a table without columns keep its rows.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use thiserror::Error;
use tracing::{debug, info};

use super::naming::TimestepFile;
use crate::table::{Dataset, DatasetError, TimestepTable};
use crate::types::Accessor;

/// Error type for table file parsing.
#[derive(Debug, Error)]
pub enum TableFileError {
    /// File I/O error
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    /// Parse error with line and column position
    #[error("Parse error at line {line}, column {column}: {message}")]
    ParseError {
        line: usize,
        column: usize,
        message: String,
    },

    /// A requested column is not present on a line
    #[error("Line {line} has {found} values, column {accessor} is missing")]
    MissingColumn {
        line: usize,
        accessor: Accessor,
        found: usize,
    },

    /// File holds no data rows
    #[error("Table file contains no data")]
    EmptyFile,

    /// No files were given to read
    #[error("No files to read")]
    NoFiles,

    /// Files differ in shape
    #[error(transparent)]
    Inconsistent(#[from] DatasetError),
}

/// Parse a table from a string.
///
/// `columns` selects which accessors to keep; `None` keeps every column.
pub fn parse_table(content: &str, columns: Option<&[Accessor]>) -> Result<TimestepTable, TableFileError> {
    parse_reader(content.as_bytes(), columns)
}

/// Read a table file.
///
/// # Example
///
/// ```ignore
/// use nebula_fields::io::read_table_file;
/// use nebula_fields::fields::vector;
/// use std::path::Path;
///
/// let columns: Vec<_> = vector::VELOCITY.iter().map(|f| f.accessor).collect();
/// let table = read_table_file(Path::new("velocity.0001.zslice.txt"), Some(&columns))?;
/// println!("{} cells", table.n_rows());
/// ```
pub fn read_table_file(path: &Path, columns: Option<&[Accessor]>) -> Result<TimestepTable, TableFileError> {
    let file = File::open(path)?;
    let table = parse_reader(BufReader::new(file), columns)?;
    debug!(
        path = %path.display(),
        rows = table.n_rows(),
        columns = table.n_columns(),
        "table read"
    );
    Ok(table)
}

/// Read one table per timestep file into a dataset.
///
/// # Errors
/// - `NoFiles` if `files` is empty
/// - `Inconsistent` if the files do not share one layout
/// - any error of [`read_table_file`]
pub fn read_dataset(files: &[TimestepFile], columns: Option<&[Accessor]>) -> Result<Dataset, TableFileError> {
    if files.is_empty() {
        return Err(TableFileError::NoFiles);
    }

    let mut dataset = Dataset::empty();
    for file in files {
        info!(timestep = file.timestep, path = %file.path.display(), "reading data file");
        let table = read_table_file(&file.path, columns)?;
        dataset.push(file.timestep, table)?;
    }
    Ok(dataset)
}

fn parse_reader<R: BufRead>(reader: R, columns: Option<&[Accessor]>) -> Result<TimestepTable, TableFileError> {
    let mut header: Option<Vec<Accessor>> = None;
    // (declared row count, line of the declaration)
    let mut declared_rows: Option<(usize, usize)> = None;
    // (accessor, position in line), fixed by the first data line
    let mut layout: Option<Vec<(Accessor, usize)>> = None;
    let mut data: Vec<Vec<f64>> = Vec::new();
    let mut width: Option<usize> = None;
    let mut n_rows = 0;

    for (line_num, line_result) in reader.lines().enumerate() {
        let line = line_result?;
        let line = line.trim();
        let line_no = line_num + 1;

        if line.is_empty() {
            continue;
        }

        if let Some(comment) = line.strip_prefix('#') {
            if layout.is_none() {
                let comment = comment.trim();
                if let Some(list) = comment.strip_prefix("columns:") {
                    header = Some(parse_header(list, line_no)?);
                } else if let Some(count) = comment.strip_prefix("rows:") {
                    let count = count.trim();
                    let n = count.parse::<usize>().map_err(|_| TableFileError::ParseError {
                        line: line_no,
                        column: 1,
                        message: format!("invalid row count `{}`", count),
                    })?;
                    declared_rows = Some((n, line_no));
                }
            }
            continue;
        }

        let values: Vec<&str> = line.split_whitespace().collect();

        let cols = match layout.take() {
            Some(cols) => cols,
            None => {
                let cols = resolve_layout(header.as_deref(), values.len(), columns, line_no)?;
                data = vec![Vec::new(); cols.len()];
                if columns.is_none() {
                    width = Some(values.len());
                }
                cols
            }
        };

        if let Some(expected) = width {
            if values.len() != expected {
                return Err(TableFileError::ParseError {
                    line: line_no,
                    column: values.len().min(expected) + 1,
                    message: format!("expected {} values, found {}", expected, values.len()),
                });
            }
        }

        for (slot, &(accessor, position)) in cols.iter().enumerate() {
            let Some(token) = values.get(position) else {
                return Err(TableFileError::MissingColumn {
                    line: line_no,
                    accessor,
                    found: values.len(),
                });
            };
            let value: f64 = token.parse().map_err(|_| TableFileError::ParseError {
                line: line_no,
                column: position + 1,
                message: format!("invalid number `{}`", token),
            })?;
            data[slot].push(value);
        }

        n_rows += 1;
        layout = Some(cols);
    }

    let Some(cols) = layout else {
        return match (header, declared_rows) {
            (Some(header), Some((n, _))) if header.is_empty() || n == 0 => {
                declared_table(&header, n, columns)
            }
            _ => Err(TableFileError::EmptyFile),
        };
    };

    if let Some((expected, line)) = declared_rows {
        if expected != n_rows {
            return Err(TableFileError::ParseError {
                line,
                column: 1,
                message: format!("header declares {} rows, found {}", expected, n_rows),
            });
        }
    }

    // every column received one value per data line
    build_table(n_rows, cols.into_iter().map(|(accessor, _)| accessor).zip(data))
}

/// Table of a file that declares its columns and rows but has no data lines.
///
/// Only reached with no columns or with zero rows, so every column is empty.
fn declared_table(
    header: &[Accessor],
    n_rows: usize,
    columns: Option<&[Accessor]>,
) -> Result<TimestepTable, TableFileError> {
    let accessors = match columns {
        None => header.to_vec(),
        Some(requested) => {
            if let Some(&accessor) = requested.iter().find(|&&a| !header.contains(&a)) {
                return Err(TableFileError::MissingColumn {
                    line: 0,
                    accessor,
                    found: header.len(),
                });
            }
            requested.to_vec()
        }
    };
    build_table(n_rows, accessors.into_iter().map(|a| (a, Vec::new())))
}

fn build_table(
    n_rows: usize,
    columns: impl Iterator<Item = (Accessor, Vec<f64>)>,
) -> Result<TimestepTable, TableFileError> {
    let mut table = TimestepTable::new(n_rows);
    for (accessor, values) in columns {
        table
            .insert_column(accessor, values)
            .map_err(|e| TableFileError::ParseError {
                line: 0,
                column: 0,
                message: e.to_string(),
            })?;
    }
    Ok(table)
}

fn parse_header(list: &str, line: usize) -> Result<Vec<Accessor>, TableFileError> {
    list.split_whitespace()
        .enumerate()
        .map(|(i, token)| {
            token
                .parse::<usize>()
                .map(Accessor::new)
                .map_err(|_| TableFileError::ParseError {
                    line,
                    column: i + 1,
                    message: format!("invalid accessor `{}` in columns header", token),
                })
        })
        .collect()
}

/// Map requested accessors to positions on a line.
fn resolve_layout(
    header: Option<&[Accessor]>,
    n_values: usize,
    columns: Option<&[Accessor]>,
    line: usize,
) -> Result<Vec<(Accessor, usize)>, TableFileError> {
    let accessor_at = |position: usize| match header {
        Some(h) => h.get(position).copied(),
        None => Some(Accessor::new(position)),
    };
    let position_of = |accessor: Accessor| match header {
        Some(h) => h.iter().position(|&a| a == accessor),
        None => Some(accessor.get()),
    };

    match columns {
        None => (0..n_values)
            .map(|position| {
                accessor_at(position)
                    .map(|a| (a, position))
                    .ok_or_else(|| TableFileError::ParseError {
                        line,
                        column: position + 1,
                        message: "more values than the columns header lists".into(),
                    })
            })
            .collect(),
        Some(requested) => requested
            .iter()
            .map(|&accessor| {
                position_of(accessor)
                    .map(|p| (accessor, p))
                    .ok_or(TableFileError::MissingColumn {
                        line,
                        accessor,
                        found: n_values,
                    })
            })
            .collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn acc(i: usize) -> Accessor {
        Accessor::new(i)
    }

    #[test]
    fn test_parse_all_columns() {
        let t = parse_table("1.0 2.0 3.0\n4.0 5.0 6.0\n", None).unwrap();
        assert_eq!(t.n_rows(), 2);
        assert_eq!(t.n_columns(), 3);
        assert_eq!(t.column(acc(2)), Some(&[3.0, 6.0][..]));
    }

    #[test]
    fn test_parse_selected_columns() {
        let content = "1 2 3 4\n5 6 7 8\n";
        let t = parse_table(content, Some(&[acc(3), acc(1)])).unwrap();
        assert_eq!(t.n_columns(), 2);
        assert_eq!(t.accessors().collect::<Vec<_>>(), vec![acc(3), acc(1)]);
        assert_eq!(t.column(acc(1)), Some(&[2.0, 6.0][..]));
        assert!(t.column(acc(0)).is_none());
    }

    #[test]
    fn test_parse_scientific_and_whitespace() {
        let content = "  1.5e-24\t-2.0E+03   \n\n3.0e0 4\n";
        let t = parse_table(content, None).unwrap();
        assert_eq!(t.column(acc(0)), Some(&[1.5e-24, 3.0][..]));
        assert_eq!(t.column(acc(1)), Some(&[-2000.0, 4.0][..]));
    }

    #[test]
    fn test_parse_columns_header() {
        let content = "# columns: 3 4 6\n0.1 0.2 0.3\n";
        let t = parse_table(content, None).unwrap();
        assert_eq!(t.accessors().collect::<Vec<_>>(), vec![acc(3), acc(4), acc(6)]);

        let sel = parse_table(content, Some(&[acc(6)])).unwrap();
        assert_eq!(sel.column(acc(6)), Some(&[0.3][..]));
    }

    #[test]
    fn test_parse_empty_error() {
        let result = parse_table("# only a comment\n\n", None);
        assert!(matches!(result, Err(TableFileError::EmptyFile)));
    }

    #[test]
    fn test_parse_declared_rows() {
        let t = parse_table("# columns: \n# rows: 4\n", None).unwrap();
        assert_eq!(t.n_rows(), 4);
        assert_eq!(t.n_columns(), 0);

        let no_rows = parse_table("# columns: 3 6\n# rows: 0\n", None).unwrap();
        assert_eq!(no_rows.n_rows(), 0);
        assert_eq!(no_rows.column(acc(6)), Some(&[][..]));

        let selected = parse_table("# columns: \n# rows: 4\n", Some(&[acc(1)]));
        assert!(matches!(selected, Err(TableFileError::MissingColumn { found: 0, .. })));

        // a row count alone does not make a table
        let result = parse_table("# rows: 4\n", None);
        assert!(matches!(result, Err(TableFileError::EmptyFile)));
    }

    #[test]
    fn test_parse_row_count_mismatch() {
        let result = parse_table("# columns: 0\n# rows: 3\n1.0\n2.0\n", None);
        assert!(matches!(result, Err(TableFileError::ParseError { line: 2, .. })));

        let bad = parse_table("# rows: many\n1.0\n", None);
        assert!(matches!(bad, Err(TableFileError::ParseError { line: 1, .. })));
    }

    #[test]
    fn test_parse_invalid_number() {
        let result = parse_table("1.0 abc\n", None);
        assert!(matches!(
            result,
            Err(TableFileError::ParseError { line: 1, column: 2, .. })
        ));
    }

    #[test]
    fn test_parse_ragged_rows() {
        let result = parse_table("1 2 3\n4 5\n", None);
        assert!(matches!(result, Err(TableFileError::ParseError { line: 2, .. })));
    }

    #[test]
    fn test_parse_missing_selected_column() {
        let result = parse_table("1 2\n3 4\n", Some(&[acc(5)]));
        assert!(matches!(
            result,
            Err(TableFileError::MissingColumn { line: 1, found: 2, .. })
        ));

        let short_line = parse_table("1 2 3\n4 5\n", Some(&[acc(2)]));
        assert!(matches!(
            short_line,
            Err(TableFileError::MissingColumn { line: 2, .. })
        ));
    }

    #[test]
    fn test_read_table_file() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "0.5 1.5 2.5").unwrap();
        writeln!(file, "3.5 4.5 5.5").unwrap();

        let t = read_table_file(file.path(), Some(&[acc(0), acc(2)])).unwrap();
        assert_eq!(t.n_rows(), 2);
        assert_eq!(t.column(acc(2)), Some(&[2.5, 5.5][..]));
    }

    #[test]
    fn test_read_dataset_requires_files() {
        let result = read_dataset(&[], None);
        assert!(matches!(result, Err(TableFileError::NoFiles)));
    }

    #[test]
    fn test_read_dataset_rejects_mismatched_files() {
        let mut a = NamedTempFile::new().unwrap();
        writeln!(a, "1 2\n3 4").unwrap();
        let mut b = NamedTempFile::new().unwrap();
        writeln!(b, "1 2").unwrap();

        let files = vec![
            TimestepFile::new(1, a.path().to_path_buf()),
            TimestepFile::new(2, b.path().to_path_buf()),
        ];
        let result = read_dataset(&files, None);
        assert!(matches!(result, Err(TableFileError::Inconsistent(_))));
    }
}
