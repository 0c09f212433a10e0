//! CSV-backed package URL ledger
//!
//! Each distribution gets its own append-only ledger at
//! `<output_dir>/<distro>/output/urls.csv` with a `url,state` header.
//! Discoveries are written through immediately so an interrupted crawl
//! loses at most the row in flight.

use crate::config::Distro;
use crate::ledger::state::UrlState;
use csv::StringRecord;
use std::collections::HashMap;
use std::fs::{self, File, OpenOptions};
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Mutex;
use thiserror::Error;
use tracing::debug;

/// Ledger-specific errors
#[derive(Debug, Error)]
pub enum LedgerError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Malformed ledger row at line {line}: {message}")]
    MalformedRow { line: usize, message: String },
}

/// Result type alias for ledger operations
pub type LedgerResult<T> = std::result::Result<T, LedgerError>;

/// One row of a per-distribution ledger
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PackageUrlRecord {
    pub url: String,
    pub state: UrlState,
}

/// Row counts for one ledger file
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LedgerStats {
    pub total: u64,
    pub discovered: u64,
    pub in_flight: u64,
    pub processed: u64,
}

/// Returns the ledger path for a distribution under an output directory
///
/// The layout is `<output_dir>/<distro>/output/urls.csv`.
pub fn ledger_path(output_dir: &Path, distro: Distro) -> PathBuf {
    output_dir
        .join(distro.as_str())
        .join("output")
        .join("urls.csv")
}

struct LedgerSlot {
    writer: Option<csv::Writer<File>>,
}

/// Shared, thread-safe set of per-distribution ledgers
///
/// One `LedgerSet` is created per run and handed to every crawl worker.
/// It owns a lock and a discovery counter for each supported distribution,
/// all created up front, so appends for different distributions never
/// contend and no global state is involved.
pub struct LedgerSet {
    output_dir: PathBuf,
    slots: HashMap<Distro, Mutex<LedgerSlot>>,
    discovered: HashMap<Distro, AtomicU64>,
}

impl LedgerSet {
    /// Creates a ledger set rooted at the given output directory
    ///
    /// Nothing is touched on disk until the first discovery is recorded.
    pub fn new(output_dir: &Path) -> Self {
        let mut slots = HashMap::new();
        let mut discovered = HashMap::new();
        for distro in Distro::ALL {
            slots.insert(distro, Mutex::new(LedgerSlot { writer: None }));
            discovered.insert(distro, AtomicU64::new(0));
        }

        LedgerSet {
            output_dir: output_dir.to_path_buf(),
            slots,
            discovered,
        }
    }

    /// Appends a discovery row `(url, "-1")` to the distribution's ledger
    ///
    /// The ledger directory and file are created on the first append; the
    /// header row is written only when the file is empty, so restarts keep
    /// appending to the same file. There is deliberately no existence
    /// check: the same URL reached from two pages produces two rows.
    pub fn record_discovery(&self, distro: Distro, url: &str) -> LedgerResult<()> {
        let mut slot = self.slots[&distro].lock().unwrap();

        if slot.writer.is_none() {
            slot.writer = Some(open_writer(&self.output_dir, distro)?);
        }

        if let Some(writer) = slot.writer.as_mut() {
            writer.write_record([url, UrlState::Discovered.as_field()])?;
            writer.flush()?;
        }

        self.discovered[&distro].fetch_add(1, Ordering::Relaxed);
        Ok(())
    }

    /// Number of discoveries recorded for a distribution in this run
    pub fn discovered_count(&self, distro: Distro) -> u64 {
        self.discovered[&distro].load(Ordering::Relaxed)
    }

    /// The ledger file path for a distribution
    pub fn path_for(&self, distro: Distro) -> PathBuf {
        ledger_path(&self.output_dir, distro)
    }
}

fn open_writer(output_dir: &Path, distro: Distro) -> LedgerResult<csv::Writer<File>> {
    let path = ledger_path(output_dir, distro);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }

    let file = OpenOptions::new().append(true).create(true).open(&path)?;
    let needs_header = file.metadata()?.len() == 0;

    let mut writer = csv::Writer::from_writer(file);
    if needs_header {
        writer.write_record(["url", "state"])?;
        writer.flush()?;
        debug!("Created ledger {}", path.display());
    }

    Ok(writer)
}

fn parse_row(row: &StringRecord, index: usize) -> LedgerResult<PackageUrlRecord> {
    // The header occupies line 1, so record 0 sits on line 2.
    let line = index + 2;

    let url = row.get(0).ok_or_else(|| LedgerError::MalformedRow {
        line,
        message: "missing url field".to_string(),
    })?;
    let field = row.get(1).ok_or_else(|| LedgerError::MalformedRow {
        line,
        message: "missing state field".to_string(),
    })?;
    let state = UrlState::from_field(field).ok_or_else(|| LedgerError::MalformedRow {
        line,
        message: format!("unknown state '{}'", field),
    })?;

    Ok(PackageUrlRecord {
        url: url.to_string(),
        state,
    })
}

/// Reads every row of a ledger file
pub fn load_records(path: &Path) -> LedgerResult<Vec<PackageUrlRecord>> {
    let mut reader = csv::Reader::from_path(path)?;
    let mut records = Vec::new();

    for (index, row) in reader.records().enumerate() {
        let row = row?;
        records.push(parse_row(&row, index)?);
    }

    Ok(records)
}

/// Rewrites a ledger, moving the first row matching `url` to `new_state`
///
/// All other rows are preserved as-is, later duplicates of the same URL
/// included. The rewrite goes through a sibling temp file and a rename so
/// a crash cannot leave a half-written ledger behind. Returns `false`
/// when the URL does not appear in the ledger.
pub fn update_state(path: &Path, url: &str, new_state: UrlState) -> LedgerResult<bool> {
    let records = load_records(path)?;

    let tmp_path = path.with_extension("csv.tmp");
    let mut updated = false;
    {
        let mut writer = csv::Writer::from_path(&tmp_path)?;
        writer.write_record(["url", "state"])?;
        for mut record in records {
            if !updated && record.url == url {
                record.state = new_state;
                updated = true;
            }
            writer.write_record([record.url.as_str(), record.state.as_field()])?;
        }
        writer.flush()?;
    }
    fs::rename(&tmp_path, path)?;

    Ok(updated)
}

/// Counts ledger rows by state
pub fn ledger_stats(path: &Path) -> LedgerResult<LedgerStats> {
    let mut reader = csv::Reader::from_path(path)?;
    let mut stats = LedgerStats::default();

    for (index, row) in reader.records().enumerate() {
        let row = row?;
        let record = parse_row(&row, index)?;
        stats.total += 1;
        match record.state {
            UrlState::Discovered => stats.discovered += 1,
            UrlState::InFlight => stats.in_flight += 1,
            UrlState::Processed => stats.processed += 1,
        }
    }

    Ok(stats)
}
