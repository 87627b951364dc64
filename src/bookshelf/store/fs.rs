use super::{parse_records, CatalogStore, RawLoad, Recovery};
use crate::error::{LibraryError, Result};
use crate::model::Book;
use chrono::Local;
use std::fs;
use std::path::{Path, PathBuf};
use uuid::Uuid;

pub struct FileStore {
    path: PathBuf,
    backup_corrupt: bool,
}

impl FileStore {
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            backup_corrupt: true,
        }
    }

    pub fn with_backups(mut self, backup_corrupt: bool) -> Self {
        self.backup_corrupt = backup_corrupt;
        self
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn ensure_parent(&self) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                fs::create_dir_all(parent).map_err(LibraryError::Io)?;
            }
        }
        Ok(())
    }

    fn write_atomic(&self, content: &str) -> Result<()> {
        self.ensure_parent()?;
        let file_name = self
            .path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "library.json".to_string());
        let tmp_file = self
            .path
            .with_file_name(format!(".{}-{}.tmp", file_name, Uuid::new_v4()));
        let written = fs::write(&tmp_file, content).and_then(|_| fs::rename(&tmp_file, &self.path));
        if let Err(e) = written {
            // A failed write can leave a partial file behind
            let _ = fs::remove_file(&tmp_file);
            return Err(LibraryError::Io(e));
        }
        Ok(())
    }

    /// Moves the unreadable file aside so the reset does not destroy it.
    fn backup(&self) -> Result<PathBuf> {
        let stamp = Local::now().format("%Y%m%d%H%M%S");
        let mut backup = PathBuf::from(format!("{}.corrupt-{}", self.path.display(), stamp));
        let mut n = 1;
        while backup.exists() {
            backup = PathBuf::from(format!(
                "{}.corrupt-{}-{}",
                self.path.display(),
                stamp,
                n
            ));
            n += 1;
        }
        fs::rename(&self.path, &backup).map_err(LibraryError::Io)?;
        Ok(backup)
    }
}

impl CatalogStore for FileStore {
    fn load(&mut self) -> Result<RawLoad> {
        if !self.path.exists() {
            return Ok(RawLoad::default());
        }

        let content = fs::read_to_string(&self.path).map_err(LibraryError::Io)?;
        match parse_records(&content) {
            Ok(records) => Ok(RawLoad {
                records,
                recovery: None,
            }),
            Err(reason) => {
                let backup = if self.backup_corrupt {
                    Some(self.backup()?)
                } else {
                    None
                };
                self.write_atomic("[]")?;
                Ok(RawLoad {
                    records: Vec::new(),
                    recovery: Some(Recovery { reason, backup }),
                })
            }
        }
    }

    fn save(&mut self, books: &[Book]) -> Result<()> {
        let content = serde_json::to_string_pretty(books).map_err(LibraryError::Serialization)?;
        self.write_atomic(&content)
    }

    fn location(&self) -> String {
        self.path.display().to_string()
    }
}
