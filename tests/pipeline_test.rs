//! End-to-end tests of the derived-field pipeline.
//!
//! Slice files are written to a temporary directory, loaded, enriched by the
//! engines and written back out.

use std::fs;
use std::path::Path;

use approx::assert_relative_eq;
use nebula_fields::analysis::{Extrema, contour_levels};
use nebula_fields::formulae::total_density;
use nebula_fields::io::{TimestepFiles, parse_table, read_table_file};
use nebula_fields::{
    CurlConfig, Dataset, DerivationOptions, GridShape, MASS_OF_HYDROGEN, SpeciesAbundances,
    TimestepTable, compute_curl, compute_derived_fields, global_extrema, read_dataset,
    required_inputs, scalar, vector, write_dataset,
};

/// Scalar file content with `n` cells, varying smoothly per cell.
fn scalar_file(n: usize, offset: f64) -> String {
    let mut text = String::new();
    for i in 0..n {
        let t = i as f64 + offset;
        let row = [
            1.0e3 + 10.0 * t,      // total particle density
            80.0 + t,              // gas temperature
            0.70,                  // H
            0.01 + 1e-4 * t,       // H+
            0.24,                  // He
            0.005,                 // He+
            0.001,                 // He++
            1e-8,                  // H-
            0.02 - 1e-5 * t,       // H2
            1e-6,                  // H2+
        ];
        let line: Vec<String> = row.iter().map(|v| v.to_string()).collect();
        text.push_str(&line.join(" "));
        text.push('\n');
    }
    text
}

fn velocity_file(rows: &[[f64; 3]]) -> String {
    rows.iter()
        .map(|r| format!("{} {} {}\n", r[0], r[1], r[2]))
        .collect()
}

fn write_timesteps(dir: &Path, files: &TimestepFiles, contents: &[(u32, String)]) {
    fs::create_dir_all(dir).unwrap();
    for (timestep, text) in contents {
        fs::write(files.path_for(*timestep), text).unwrap();
    }
}

fn velocity_table(rows: &[[f64; 3]]) -> TimestepTable {
    TimestepTable::from_columns(
        vector::VELOCITY
            .iter()
            .enumerate()
            .map(|(c, f)| (f.accessor, rows.iter().map(|r| r[c]).collect::<Vec<_>>())),
    )
    .unwrap()
}

#[test]
fn test_total_density_scaling_invariance() {
    let abundances = SpeciesAbundances {
        h: 0.7,
        h_plus: 0.02,
        h_minus: 1e-7,
        he: 0.23,
        he_plus: 0.01,
        he_plus_plus: 0.002,
        h2: 0.015,
        h2_plus: 2e-6,
    };
    let reference = total_density(500.0, &abundances);
    for k in [1e-3, 0.5, 2.0, 17.0, 1e6] {
        assert_relative_eq!(
            total_density(500.0 * k, &abundances.scaled(k)),
            reference,
            max_relative = 1e-12
        );
    }
}

#[test]
fn test_scalar_pipeline_round_trip() {
    let tmp = tempfile::tempdir().unwrap();
    let input = tmp.path().join("scalar");
    let files = TimestepFiles::scalar(&input);
    write_timesteps(
        &input,
        &files,
        &[(1, scalar_file(6, 0.0)), (14, scalar_file(6, 3.0))],
    );

    let requested = [scalar::H_PLUS_NUMBER_DENSITY, scalar::TOTAL_DENSITY];
    let mut dataset = read_dataset(
        &files.files_for(&[1, 14]),
        Some(&required_inputs(&requested)),
    )
    .unwrap();
    assert_eq!(dataset.len(), 2);
    assert_eq!(dataset.n_rows(), 6);

    compute_derived_fields(&mut dataset, &requested, &DerivationOptions::default()).unwrap();

    let table = dataset.table_for(14).unwrap();
    assert_eq!(table.n_columns(), 2);
    let rho = table.column(scalar::TOTAL_DENSITY.accessor).unwrap();
    let n_h_plus = table.column(scalar::H_PLUS_NUMBER_DENSITY.accessor).unwrap();
    // row 0 of timestep 14 uses t = 3
    assert_relative_eq!(
        n_h_plus[0],
        (0.01 + 3e-4) * rho[0] / MASS_OF_HYDROGEN,
        max_relative = 1e-12
    );

    let out = tmp.path().join("out");
    let written = write_dataset(&out, scalar::H_PLUS_NUMBER_DENSITY.key, &dataset).unwrap();
    assert_eq!(written.len(), 2);
    let reread = read_table_file(&written[1], None).unwrap();
    assert_eq!(&reread, table);
}

#[test]
fn test_empty_request_round_trip() {
    let tmp = tempfile::tempdir().unwrap();
    let table = parse_table(&scalar_file(3, 0.0), None).unwrap();
    let mut dataset = Dataset::new(vec![5], vec![table]).unwrap();

    compute_derived_fields(&mut dataset, &[], &DerivationOptions::default()).unwrap();

    let written = write_dataset(tmp.path(), "empty", &dataset).unwrap();
    let reread = read_table_file(&written[0], None).unwrap();
    assert_eq!(reread.n_columns(), 0);
    assert_eq!(reread.n_rows(), 3);
    assert_eq!(Some(&reread), dataset.table(0));
}

#[test]
fn test_only_total_density_requested() {
    let table = parse_table(&scalar_file(4, 0.0), None).unwrap();
    let mut dataset = Dataset::new(vec![3], vec![table]).unwrap();
    compute_derived_fields(&mut dataset, &[scalar::TOTAL_DENSITY], &DerivationOptions::default())
        .unwrap();

    let table = dataset.table(0).unwrap();
    assert_eq!(
        table.accessors().collect::<Vec<_>>(),
        vec![scalar::TOTAL_DENSITY.accessor]
    );
    assert_eq!(table.n_rows(), 4);
}

#[test]
fn test_derivation_is_deterministic() {
    let table = parse_table(&scalar_file(8, 1.5), None).unwrap();
    let requested: Vec<_> = scalar::ALL.iter().copied().filter(|f| !f.is_given()).collect();

    let mut first = Dataset::new(vec![1], vec![table.clone()]).unwrap();
    let mut second = Dataset::new(vec![1], vec![table]).unwrap();
    compute_derived_fields(&mut first, &requested, &DerivationOptions::default()).unwrap();
    compute_derived_fields(&mut second, &requested, &DerivationOptions::default()).unwrap();

    assert_eq!(first, second);
    assert_eq!(first.table(0).unwrap().n_columns(), requested.len());
}

#[test]
fn test_global_extrema_across_tables() {
    let a = TimestepTable::from_columns([(scalar::GAS_TEMPERATURE.accessor, vec![12.0, 40.0])])
        .unwrap();
    let b = TimestepTable::from_columns([(scalar::GAS_TEMPERATURE.accessor, vec![3.0, 25.0])])
        .unwrap();
    let dataset = Dataset::new(vec![1, 2], vec![a, b]).unwrap();

    let range = global_extrema(&dataset, Some(scalar::GAS_TEMPERATURE.accessor)).unwrap();
    assert_eq!(range, Extrema { max: 40.0, min: 3.0 });

    let levels = contour_levels(range, 38);
    assert_eq!(levels.first(), Some(&3.0));
    assert_eq!(levels.last(), Some(&40.0));
    assert!(global_extrema(&Dataset::empty(), Some(scalar::GAS_TEMPERATURE.accessor)).is_none());
}

#[test]
fn test_hand_computed_curl_at_dataset_spacing() {
    let rows = [
        [1.0, 2.0, 3.0],
        [4.0, 5.0, 6.0],
        [7.0, 8.0, 9.0],
        [10.0, 11.0, 12.0],
    ];
    let mut dataset = Dataset::new(vec![1], vec![velocity_table(&rows)]).unwrap();
    let config = CurlConfig::new(GridShape::new(2, 2));
    compute_curl(&mut dataset, &config).unwrap();

    let table = dataset.table(0).unwrap();
    let cx = table.column(vector::CURL_X.accessor).unwrap();
    let cy = table.column(vector::CURL_Y.accessor).unwrap();
    let mag = table.column(vector::CURL_MAGNITUDE.accessor).unwrap();

    // cell (0, 0): curl = (8, -4, -3) / h
    assert_relative_eq!(cx[0], 8000.0, max_relative = 1e-12);
    assert_relative_eq!(cy[0], -4000.0, max_relative = 1e-12);
    assert_relative_eq!(mag[0], 1000.0 * 89.0_f64.sqrt(), max_relative = 1e-12);
    // cell (1, 1): no neighbors, curl = (-1, 2, -1) / h
    assert_relative_eq!(cx[3], -1000.0, max_relative = 1e-12);
    assert_relative_eq!(cy[3], 2000.0, max_relative = 1e-12);
    assert_relative_eq!(mag[3], 1000.0 * 6.0_f64.sqrt(), max_relative = 1e-12);
}

#[test]
fn test_constant_field_curl_lives_on_boundary() {
    let shape = GridShape::new(6, 5);
    let rows = vec![[0.0, 0.0, 4.0]; shape.cells_per_layer()];
    let mut dataset = Dataset::new(vec![1], vec![velocity_table(&rows)]).unwrap();
    compute_curl(&mut dataset, &CurlConfig::new(shape)).unwrap();

    let mag = dataset
        .table(0)
        .unwrap()
        .column(vector::CURL_MAGNITUDE.accessor)
        .unwrap();
    for y in 0..shape.height() {
        for x in 0..shape.width() {
            let value = mag[shape.index(x, y, 0).get()];
            let boundary = x == shape.width() - 1 || y == shape.height() - 1;
            assert_eq!(value != 0.0, boundary, "cell ({}, {})", x, y);
        }
    }
}

#[test]
fn test_curl_output_shape_on_dataset_grid() {
    let shape = GridShape::DATASET;
    let n = shape.cells_per_layer();
    let mut rows: Vec<[f64; 3]> = (0..n)
        .map(|i| {
            let (x, y, _) = shape.coords(i.into());
            [(y as f64).sin(), (x as f64).cos(), 0.1 * x as f64]
        })
        .collect();
    // trailing rows from a second layer are dropped
    rows.extend(vec![[1.0, 1.0, 1.0]; 17]);

    let mut dataset = Dataset::new(
        vec![1, 2],
        vec![velocity_table(&rows), velocity_table(&rows)],
    )
    .unwrap();
    compute_curl(&mut dataset, &CurlConfig::default()).unwrap();

    for table in dataset.tables() {
        assert_eq!(table.n_rows(), 600 * 248);
        assert_eq!(table.n_columns(), 3);
        assert_eq!(
            table.accessors().collect::<Vec<_>>(),
            vec![
                vector::CURL_X.accessor,
                vector::CURL_Y.accessor,
                vector::CURL_MAGNITUDE.accessor
            ]
        );
    }
}

#[test]
fn test_curl_pipeline_from_files() {
    let tmp = tempfile::tempdir().unwrap();
    let input = tmp.path().join("vector");
    let files = TimestepFiles::vector(&input);
    let rows: Vec<[f64; 3]> = (0..12).map(|i| [i as f64, 0.5 * i as f64, -1.0]).collect();
    write_timesteps(
        &input,
        &files,
        &[(2, velocity_file(&rows)), (9, velocity_file(&rows))],
    );

    let mut dataset = read_dataset(&files.files_for(&[2, 9]), None).unwrap();
    let config = CurlConfig::new(GridShape::new(4, 3)).with_spacing(1.0);
    compute_curl(&mut dataset, &config).unwrap();

    let out = tmp.path().join("curl");
    let written = write_dataset(&out, "curl", &dataset).unwrap();
    assert!(written[0].ends_with("curl.0002.zslice.txt"));

    let reread = read_table_file(&written[1], None).unwrap();
    assert_eq!(reread.n_rows(), 12);
    assert_eq!(Some(&reread), dataset.table_for(9));
}
