//! Writer for enriched tables.
//!
//! Output mirrors the input format with a `# columns:` comment naming the
//! accessor of each column and a `# rows:` comment with the row count, so
//! [`parse_table`](super::parse_table) reads it back with the same keys,
//! even when no column is left. Floats use Rust's shortest round-trip
//! formatting and survive a write/read cycle unchanged.

use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use tracing::info;

use super::naming::slice_file_name;
use super::table_reader::TableFileError;
use crate::table::{Dataset, TimestepTable};

/// Write a table to any writer.
pub fn write_table<W: Write>(mut out: W, table: &TimestepTable) -> Result<(), TableFileError> {
    let keys: Vec<String> = table.accessors().map(|a| a.get().to_string()).collect();
    writeln!(out, "# columns: {}", keys.join(" "))?;
    writeln!(out, "# rows: {}", table.n_rows())?;
    if table.n_columns() == 0 {
        return Ok(());
    }

    let columns: Vec<&[f64]> = table.accessors().filter_map(|a| table.column(a)).collect();
    let mut line = String::new();
    for row in 0..table.n_rows() {
        line.clear();
        for (i, values) in columns.iter().enumerate() {
            if i > 0 {
                line.push(' ');
            }
            line.push_str(&values[row].to_string());
        }
        writeln!(out, "{}", line)?;
    }
    Ok(())
}

/// Write a table to a file, creating or truncating it.
pub fn write_table_file(path: &Path, table: &TimestepTable) -> Result<(), TableFileError> {
    let file = File::create(path)?;
    let mut out = BufWriter::new(file);
    write_table(&mut out, table)?;
    out.flush()?;
    Ok(())
}

/// Write every table of a dataset as `{directory}/{stem}.{timestep:04}.zslice.txt`.
///
/// Creates `directory` if needed and returns the written paths in order.
pub fn write_dataset(directory: &Path, stem: &str, dataset: &Dataset) -> Result<Vec<PathBuf>, TableFileError> {
    fs::create_dir_all(directory)?;

    let mut written = Vec::with_capacity(dataset.len());
    for frame in dataset.frames() {
        let path = directory.join(slice_file_name(stem, frame.timestep));
        write_table_file(&path, &frame.table)?;
        info!(timestep = frame.timestep, path = %path.display(), "wrote table");
        written.push(path);
    }
    Ok(written)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::io::parse_table;
    use crate::types::Accessor;

    #[test]
    fn test_write_format() {
        let table = TimestepTable::from_columns([
            (Accessor::new(3), vec![1.5, -0.25]),
            (Accessor::new(6), vec![2.5e-3, 2.0]),
        ])
        .unwrap();

        let mut buf = Vec::new();
        write_table(&mut buf, &table).unwrap();
        let text = String::from_utf8(buf).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines, vec!["# columns: 3 6", "# rows: 2", "1.5 0.0025", "-0.25 2"]);
    }

    #[test]
    fn test_write_then_parse_is_exact() {
        let values = vec![0.1 + 0.2, 1.0 / 3.0, 6.02214076e23, -7.5e-300];
        let table = TimestepTable::from_columns([(Accessor::new(4), values.clone())]).unwrap();

        let mut buf = Vec::new();
        write_table(&mut buf, &table).unwrap();
        let parsed = parse_table(std::str::from_utf8(&buf).unwrap(), None).unwrap();
        assert_eq!(parsed, table);
    }

    #[test]
    fn test_zero_column_table_keeps_row_count() {
        let table = TimestepTable::new(3);

        let mut buf = Vec::new();
        write_table(&mut buf, &table).unwrap();
        let text = std::str::from_utf8(&buf).unwrap();
        assert_eq!(text, "# columns: \n# rows: 3\n");

        let parsed = parse_table(text, None).unwrap();
        assert_eq!(parsed, table);
        assert_eq!(parsed.n_rows(), 3);
    }

    #[test]
    fn test_write_dataset() {
        let dir = tempfile::tempdir().unwrap();
        let t = TimestepTable::from_columns([(Accessor::new(0), vec![1.0])]).unwrap();
        let ds = Dataset::new(vec![1, 14], vec![t.clone(), t]).unwrap();

        let out = dir.path().join("curl");
        let paths = write_dataset(&out, "curl", &ds).unwrap();
        assert_eq!(paths.len(), 2);
        assert!(paths[1].ends_with("curl.0014.zslice.txt"));
        assert!(paths.iter().all(|p| p.exists()));
    }
}
