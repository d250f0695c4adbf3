//! End-to-end tests for the dataset exporter and single-N evaluator.

use std::fs;
use std::io::Read;

use flate2::read::GzDecoder;
use triad_balance::export::{export_dataset, DatasetConfig, CSV_HEADER};
use triad_balance::reference::KAPPA_REF;
use triad_balance::single::{evaluate_single, SingleConfig};
use triad_balance::BalanceError;
use triad_core::TriadError;

#[test]
fn test_export_writes_strided_csv() {
    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("nested").join("triad.csv");
    let config = DatasetConfig {
        max_n: 1_000,
        stride: 100,
        out: out.clone(),
        progress: true,
    };

    let summary = export_dataset(&config).unwrap();
    assert_eq!(summary.rows, 10);
    assert_eq!(summary.last.unwrap().n, 1_000);

    let text = fs::read_to_string(&out).unwrap();
    let lines: Vec<&str> = text.lines().collect();
    assert_eq!(lines.len(), 11);
    assert_eq!(lines[0], CSV_HEADER);
    assert!(lines[10].starts_with("1000,"));

    for line in &lines[1..] {
        let fields: Vec<&str> = line.split(',').collect();
        assert_eq!(fields.len(), 5);
        for value in &fields[1..] {
            let frac = value.split('.').nth(1).unwrap();
            assert_eq!(frac.len(), 15, "expected 15 fractional digits in {}", value);
        }
        let xi: f64 = fields[1].parse().unwrap();
        let om: f64 = fields[2].parse().unwrap();
        let e: f64 = fields[3].parse().unwrap();
        let f: f64 = fields[4].parse().unwrap();
        assert!((xi + om - e - f).abs() < 1e-14);
    }
}

#[test]
fn test_export_gz_path_is_compressed() {
    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("triad.csv.gz");
    let config = DatasetConfig {
        max_n: 500,
        stride: 50,
        out: out.clone(),
        progress: false,
    };

    let summary = export_dataset(&config).unwrap();
    assert_eq!(summary.rows, 10);

    let raw = fs::read(&out).unwrap();
    assert_eq!(&raw[..2], &[0x1f, 0x8b], "missing gzip magic");

    let mut text = String::new();
    GzDecoder::new(raw.as_slice())
        .read_to_string(&mut text)
        .unwrap();
    let lines: Vec<&str> = text.lines().collect();
    assert_eq!(lines.len(), 11);
    assert_eq!(lines[0], CSV_HEADER);
    assert!(lines[1].starts_with("50,"));
    assert!(lines[10].starts_with("500,"));
}

#[test]
fn test_single_csv_gz() {
    let dir = tempfile::tempdir().unwrap();
    let csv = dir.path().join("full.csv.gz");
    evaluate_single(&SingleConfig {
        n: 40,
        d_omega: 10.0,
        csv: Some(csv.clone()),
    })
    .unwrap();

    let mut text = String::new();
    GzDecoder::new(fs::File::open(&csv).unwrap())
        .read_to_string(&mut text)
        .unwrap();
    assert_eq!(text.lines().next(), Some(CSV_HEADER));
    assert_eq!(text.lines().count(), 41);
}

#[test]
fn test_export_rejects_negative_range_before_writing() {
    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("never.csv");
    let config = DatasetConfig {
        max_n: -10,
        out: out.clone(),
        ..DatasetConfig::default()
    };

    let err = export_dataset(&config).unwrap_err();
    assert!(matches!(err, BalanceError::Triad(TriadError::NegativeRange(-10))));
    assert!(!out.exists());
}

#[test]
fn test_single_writes_every_row() {
    let dir = tempfile::tempdir().unwrap();
    let csv = dir.path().join("full.csv");
    let summary = evaluate_single(&SingleConfig {
        n: 250,
        d_omega: 10.0,
        csv: Some(csv.clone()),
    })
    .unwrap();
    assert_eq!(summary.record.n, 250);

    let text = fs::read_to_string(&csv).unwrap();
    assert_eq!(text.lines().count(), 251);
}

#[test]
fn test_f_200k_matches_published_kappa() {
    let summary = evaluate_single(&SingleConfig::default()).unwrap();
    assert_eq!(summary.record.n, 200_000);
    assert!(
        (summary.record.f - KAPPA_REF).abs() < 1e-9,
        "F(200000) = {:.13}, published {:.13}",
        summary.record.f,
        KAPPA_REF
    );
}
