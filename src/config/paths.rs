//! Filesystem layout of a storefront installation.
//!
//! Everything lives under one project root: the `SQLite` store file, the upload
//! tree served by the web app and the directory holding database snapshots.

use std::path::{Path, PathBuf};

/// Environment variable naming the project root.
pub const ROOT_ENV: &str = "BUTIK_FIRIN_ROOT";

/// Resolved locations of the store, uploads and backups.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StorePaths {
    /// Project root all other paths hang off
    pub root: PathBuf,
    /// The live `SQLite` database file
    pub database_file: PathBuf,
    /// Root of the upload tree, one subdirectory per category
    pub uploads_dir: PathBuf,
    /// Directory receiving timestamped snapshots
    pub backups_dir: PathBuf,
}

impl StorePaths {
    /// Standard layout under `root`: `dev.db`, `public/uploads/` and `backups/`.
    #[must_use]
    pub fn from_root<P: AsRef<Path>>(root: P) -> Self {
        let root = root.as_ref().to_path_buf();
        Self {
            database_file: root.join("dev.db"),
            uploads_dir: root.join("public").join("uploads"),
            backups_dir: root.join("backups"),
            root,
        }
    }

    /// Layout rooted at `BUTIK_FIRIN_ROOT`, or the working directory if unset.
    #[must_use]
    pub fn from_env() -> Self {
        let root = std::env::var(ROOT_ENV).unwrap_or_else(|_| ".".to_string());
        Self::from_root(root)
    }

    /// `SeaORM` connection URL for the live store; connecting fails if the file is missing.
    #[must_use]
    pub fn database_url(&self) -> String {
        sqlite_url(&self.database_file)
    }

    /// Connection URL that creates the store file if needed. Only used on first initialization.
    #[must_use]
    pub fn create_database_url(&self) -> String {
        format!("sqlite://{}?mode=rwc", self.database_file.display())
    }
}

/// Builds a read-write `SQLite` URL for an existing file.
#[must_use]
pub fn sqlite_url(path: &Path) -> String {
    format!("sqlite://{}?mode=rw", path.display())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_root_layout() {
        let paths = StorePaths::from_root("/srv/butik");
        assert_eq!(paths.database_file, PathBuf::from("/srv/butik/dev.db"));
        assert_eq!(paths.uploads_dir, PathBuf::from("/srv/butik/public/uploads"));
        assert_eq!(paths.backups_dir, PathBuf::from("/srv/butik/backups"));
    }

    #[test]
    fn test_database_url() {
        let paths = StorePaths::from_root("/srv/butik");
        assert_eq!(paths.database_url(), "sqlite:///srv/butik/dev.db?mode=rw");
        assert_eq!(
            paths.create_database_url(),
            "sqlite:///srv/butik/dev.db?mode=rwc"
        );
    }
}
