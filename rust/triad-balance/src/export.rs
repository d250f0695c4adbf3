//! CSV dataset export: `n,Xi,Omega,E,F` rows at a configurable stride.
//! Paths ending in `.gz` are written gzip-compressed.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use std::time::Instant;

use flate2::write::GzEncoder;
use flate2::Compression;
use triad_core::{PrefixRecord, PrefixStream, SieveTables};

use crate::error::BalanceError;
use crate::progress::ProgressTicker;

pub const CSV_HEADER: &str = "n,Xi,Omega,E,F";

/// Options for a dataset export.
#[derive(Debug, Clone)]
pub struct DatasetConfig {
    pub max_n: i64,
    /// Write every `stride`-th n; values below 1 are treated as 1.
    pub stride: u64,
    pub out: PathBuf,
    pub progress: bool,
}

impl Default for DatasetConfig {
    fn default() -> Self {
        Self {
            max_n: 1_000_000,
            stride: 1,
            out: PathBuf::from("data/triad_balance_to_1e6.csv"),
            progress: false,
        }
    }
}

/// Counts reported after a finished export.
#[derive(Debug, Clone, PartialEq)]
pub struct ExportSummary {
    pub rows: u64,
    pub last: Option<PrefixRecord>,
    pub sieve_secs: f64,
    pub write_secs: f64,
}

/// One CSV row with 15 fractional digits per value.
pub fn format_row(r: &PrefixRecord) -> String {
    format!(
        "{},{:.15},{:.15},{:.15},{:.15}",
        r.n, r.xi, r.omega, r.e, r.f
    )
}

/// Stream n = 1..=`max_n` into `writer`, one row for every n divisible by
/// `stride`. Returns the number of data rows and the final record.
pub fn write_rows<W: Write + ?Sized>(
    tables: &SieveTables,
    max_n: u64,
    stride: u64,
    writer: &mut W,
    ticker: &mut ProgressTicker,
) -> Result<(u64, Option<PrefixRecord>), BalanceError> {
    let stride = stride.max(1);
    writeln!(writer, "{}", CSV_HEADER)?;
    let mut rows = 0;
    let mut last = None;
    for record in PrefixStream::new(tables, max_n)? {
        let record = record?;
        if record.n % stride == 0 {
            writeln!(writer, "{}", format_row(&record))?;
            rows += 1;
        }
        ticker.tick(record.n);
        last = Some(record);
    }
    writer.flush()?;
    Ok((rows, last))
}

/// Build the tables, then write the dataset described by `config`.
pub fn export_dataset(config: &DatasetConfig) -> Result<ExportSummary, BalanceError> {
    let start = Instant::now();
    if config.progress {
        log::info!("building phi, pi up to N={} ...", config.max_n);
    }
    let tables = SieveTables::build(config.max_n)?;
    let sieve_secs = start.elapsed().as_secs_f64();
    if config.progress {
        log::info!("sieves done in {:.2}s", sieve_secs);
    }

    let mut ticker = ProgressTicker::new(tables.max_n(), config.progress);
    let (rows, last) = write_to_path(&config.out, |writer| {
        write_rows(&tables, tables.max_n(), config.stride, writer, &mut ticker)
    })?;
    let write_secs = start.elapsed().as_secs_f64() - sieve_secs;
    log::info!(
        "wrote {} rows to {} in {:.2}s (total {:.2}s)",
        rows,
        config.out.display(),
        write_secs,
        sieve_secs + write_secs
    );

    Ok(ExportSummary {
        rows,
        last,
        sieve_secs,
        write_secs,
    })
}

/// Write materialised records (every n) to `path`.
pub fn write_records(path: &Path, records: &[PrefixRecord]) -> Result<(), BalanceError> {
    write_to_path(path, |writer| {
        writeln!(writer, "{}", CSV_HEADER)?;
        for r in records {
            writeln!(writer, "{}", format_row(r))?;
        }
        Ok(())
    })
}

/// True when `path` should be written gzip-compressed.
pub fn is_gzip_path(path: &Path) -> bool {
    path.extension().map_or(false, |ext| ext == "gz")
}

/// Create `path` (and its parent directory) and hand a writer to `body`,
/// gzip-encoding when the path ends in `.gz`. The encoder is finished
/// explicitly so a failed trailer write surfaces as an error.
fn write_to_path<T, F>(path: &Path, body: F) -> Result<T, BalanceError>
where
    F: FnOnce(&mut dyn Write) -> Result<T, BalanceError>,
{
    create_parent_dir(path)?;
    let mut file = BufWriter::new(File::create(path)?);
    if is_gzip_path(path) {
        let mut gz = GzEncoder::new(file, Compression::default());
        let out = body(&mut gz)?;
        gz.finish()?.flush()?;
        Ok(out)
    } else {
        let out = body(&mut file)?;
        file.flush()?;
        Ok(out)
    }
}

fn create_parent_dir(path: &Path) -> std::io::Result<()> {
    match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => std::fs::create_dir_all(parent),
        _ => Ok(()),
    }
}
