use atena_core::Storage;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;
use thiserror::Error;
use tracing::{debug, warn};

pub mod paths;

#[derive(Debug, Error)]
pub enum FileStorageError {
    #[error("storage io: {0}")]
    Io(#[from] std::io::Error),
}

/// [`Storage`] over a data directory: one file per key, replaced atomically
/// via a temp file, with timestamped backup copies kept under
/// `<root>/backups` and rotated down to `max_backups`.
///
/// The trait surface is infallible; write failures are logged and dropped,
/// unreadable files read as unset.
pub struct FileStorage {
    root: PathBuf,
    backups_dir: PathBuf,
    max_backups: usize,
}

impl FileStorage {
    pub fn open_default() -> Result<Self, FileStorageError> {
        Self::open_with(paths::data_root(), 10)
    }

    pub fn open_with(root: PathBuf, max_backups: usize) -> Result<Self, FileStorageError> {
        let backups_dir = root.join("backups");
        fs::create_dir_all(&root)?;
        fs::create_dir_all(&backups_dir)?;
        Ok(Self {
            root,
            backups_dir,
            max_backups: max_backups.max(1),
        })
    }

    fn file_for(&self, key: &str) -> PathBuf {
        self.root.join(format!("{}.json", sanitize(key)))
    }

    fn try_set(&self, key: &str, value: &str) -> Result<(), std::io::Error> {
        let path = self.file_for(key);
        let mut tmp = NamedTempFile::new_in(&self.root)?;
        tmp.write_all(value.as_bytes())?;
        tmp.flush()?;
        let _ = fs::remove_file(&path);
        tmp.persist(&path)?;

        self.write_backup(key, value)?;
        Ok(())
    }

    fn write_backup(&self, key: &str, value: &str) -> Result<(), std::io::Error> {
        let ts = chrono::Local::now().format("%Y%m%d-%H%M%S");
        let backup_path = self.backups_dir.join(format!("{}-{ts}.json", sanitize(key)));
        let mut tmp = NamedTempFile::new_in(&self.backups_dir)?;
        tmp.write_all(value.as_bytes())?;
        tmp.flush()?;
        let _ = fs::remove_file(&backup_path);
        tmp.persist(&backup_path)?;

        rotate_backups(&self.backups_dir, self.max_backups)?;
        Ok(())
    }
}

fn sanitize(key: &str) -> String {
    key.chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '-') {
                c
            } else {
                '_'
            }
        })
        .collect()
}

fn rotate_backups(dir: &Path, keep: usize) -> Result<(), std::io::Error> {
    let mut entries: Vec<_> = fs::read_dir(dir)?
        .filter_map(|e| e.ok())
        .filter(|e| e.path().extension().and_then(|s| s.to_str()) == Some("json"))
        .collect();
    entries.sort_by_key(|e| e.metadata().and_then(|m| m.modified()).ok());
    if entries.len() > keep {
        for e in &entries[0..entries.len() - keep] {
            let _ = fs::remove_file(e.path());
        }
    }
    Ok(())
}

impl Storage for FileStorage {
    fn get(&self, key: &str) -> Option<String> {
        let path = self.file_for(key);
        match fs::read_to_string(&path) {
            Ok(s) => Some(s),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => None,
            Err(e) => {
                debug!(key, error = %e, "unreadable storage file, treating as unset");
                None
            }
        }
    }

    fn set(&self, key: &str, value: &str) {
        if let Err(e) = self.try_set(key, value) {
            warn!(key, error = %e, "failed to persist storage file");
        }
    }

    fn remove(&self, key: &str) {
        let path = self.file_for(key);
        if let Err(e) = fs::remove_file(&path) {
            if e.kind() != std::io::ErrorKind::NotFound {
                warn!(key, error = %e, "failed to remove storage file");
            }
        }
    }
}
