//! JSON ledger file persistence.
//!
//! The whole file is read into a [`BookingLedger`], mutated in memory and
//! rewritten. Writers hold an exclusive lock on a `<ledger>.lock` sidecar for
//! the full load, mutate and save cycle, so concurrent `booking book`
//! processes against one file are serialised. The file itself is replaced by
//! renaming a fully written temporary file over it, so readers never see a
//! partial write and do not need the lock.

use std::ffi::OsString;
use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use booking_engine::{Booking, BookingLedger};
use fd_lock::RwLock;
use tempfile::NamedTempFile;

/// Load a ledger file. A missing file is an empty ledger.
pub fn load(path: &Path) -> Result<BookingLedger> {
    if !path.exists() {
        tracing::debug!(path = %path.display(), "ledger file missing, starting empty");
        return Ok(BookingLedger::new());
    }
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read ledger file: {}", path.display()))?;
    let bookings: Vec<Booking> = serde_json::from_str(&raw)
        .with_context(|| format!("Invalid ledger file: {}", path.display()))?;
    BookingLedger::from_bookings(bookings)
        .with_context(|| format!("Invalid ledger file: {}", path.display()))
}

/// Load the ledger, apply `f`, and save the result, all under the writer lock.
///
/// Nothing is written when `f` fails.
pub fn update<T>(path: &Path, f: impl FnOnce(&BookingLedger) -> Result<T>) -> Result<T> {
    let lock_path = lock_path(path);
    let file = OpenOptions::new()
        .create(true)
        .truncate(false)
        .read(true)
        .write(true)
        .open(&lock_path)
        .with_context(|| format!("Failed to open lock file: {}", lock_path.display()))?;
    let mut lock = RwLock::new(file);
    let _guard = lock
        .write()
        .with_context(|| format!("Failed to lock ledger: {}", lock_path.display()))?;
    tracing::debug!(path = %path.display(), "ledger locked");

    let ledger = load(path)?;
    let out = f(&ledger)?;
    save(path, &ledger)?;
    Ok(out)
}

/// Atomically replace the ledger file. Callers mutating the ledger should go
/// through [`update`] so the write is serialised with other writers.
fn save(path: &Path, ledger: &BookingLedger) -> Result<()> {
    let json = serde_json::to_string_pretty(&ledger.all())?;
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };

    let mut tmp = NamedTempFile::new_in(dir)
        .with_context(|| format!("Failed to create temporary file in {}", dir.display()))?;
    tmp.write_all(json.as_bytes())?;
    tmp.as_file().sync_all()?;
    tmp.persist(path)
        .with_context(|| format!("Failed to write ledger file: {}", path.display()))?;
    Ok(())
}

fn lock_path(path: &Path) -> PathBuf {
    let mut name = OsString::from(path.as_os_str());
    name.push(".lock");
    PathBuf::from(name)
}
