//! Database backups - consistent snapshots of the live store.
//!
//! Snapshots are written with `VACUUM INTO`, which copies a transactionally
//! consistent image of the database while other connections keep reading and
//! writing. The target file must not exist yet.

use crate::{core::round_to, errors::Result};
use chrono::{Local, NaiveDateTime};
use sea_orm::ConnectionTrait;
use serde::Serialize;
use std::path::{Path, PathBuf};
use tracing::{info, instrument};

/// File name prefix of every snapshot.
pub const BACKUP_PREFIX: &str = "butik_firin";
/// Timestamp format embedded in snapshot names.
pub const TIMESTAMP_FORMAT: &str = "%Y%m%d_%H%M%S";

const BYTES_PER_MB: f64 = 1024.0 * 1024.0;

/// Where a snapshot was written and how large it is.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BackupInfo {
    /// Path of the snapshot file
    pub backup_file: PathBuf,
    /// `YYYYMMDD_HHMMSS` timestamp embedded in the file name
    pub timestamp: String,
    /// Snapshot size in MiB, 2dp
    pub size_mb: f64,
}

/// Snapshot file path for a given timestamp.
#[must_use]
pub fn backup_path(backups_dir: &Path, timestamp: &str) -> PathBuf {
    backups_dir.join(format!("{BACKUP_PREFIX}_backup_{timestamp}.db"))
}

/// Snapshots the store behind `db` into `backups_dir`, stamped with the local time.
pub async fn backup_database<C>(db: &C, backups_dir: &Path) -> Result<BackupInfo>
where
    C: ConnectionTrait,
{
    backup_database_at(db, backups_dir, Local::now().naive_local()).await
}

/// Snapshots the store behind `db` into `backups_dir`, stamped with `at`.
///
/// # Errors
/// Returns an error if the directory cannot be created, a snapshot with the same
/// timestamp already exists, or `SQLite` fails to write the copy.
#[instrument(skip(db))]
pub async fn backup_database_at<C>(
    db: &C,
    backups_dir: &Path,
    at: NaiveDateTime,
) -> Result<BackupInfo>
where
    C: ConnectionTrait,
{
    std::fs::create_dir_all(backups_dir)?;

    let timestamp = at.format(TIMESTAMP_FORMAT).to_string();
    let backup_file = backup_path(backups_dir, &timestamp);

    let target = backup_file.to_string_lossy().replace('\'', "''");
    db.execute_unprepared(&format!("VACUUM INTO '{target}'"))
        .await?;

    let size_bytes = std::fs::metadata(&backup_file)?.len();
    #[allow(clippy::cast_precision_loss)]
    let size_mb = round_to(size_bytes as f64 / BYTES_PER_MB, 2);

    info!(
        "Database backed up to {} ({} bytes)",
        backup_file.display(),
        size_bytes
    );
    Ok(BackupInfo {
        backup_file,
        timestamp,
        size_mb,
    })
}
