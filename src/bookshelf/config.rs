use crate::error::{LibraryError, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

const CONFIG_FILENAME: &str = "config.json";
const DEFAULT_LIBRARY_FILE: &str = "library.json";
const DEFAULT_TOP_AUTHORS: usize = 5;

pub const KEYS: [&str; 3] = ["library-file", "top-authors", "backup-corrupt"];

/// Configuration for bookshelf, stored in `<data dir>/config.json`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct LibraryConfig {
    /// Library file name, relative to the data directory unless absolute
    #[serde(default = "default_library_file")]
    pub library_file: String,

    /// How many authors the stats view lists
    #[serde(default = "default_top_authors")]
    pub top_authors: usize,

    /// Keep a copy of an unreadable library before resetting it
    #[serde(default = "default_backup_corrupt")]
    pub backup_corrupt: bool,
}

fn default_library_file() -> String {
    DEFAULT_LIBRARY_FILE.to_string()
}

fn default_top_authors() -> usize {
    DEFAULT_TOP_AUTHORS
}

fn default_backup_corrupt() -> bool {
    true
}

impl Default for LibraryConfig {
    fn default() -> Self {
        Self {
            library_file: default_library_file(),
            top_authors: default_top_authors(),
            backup_corrupt: default_backup_corrupt(),
        }
    }
}

impl LibraryConfig {
    /// Load config from the given directory, or return defaults if not found
    pub fn load<P: AsRef<Path>>(config_dir: P) -> Result<Self> {
        let config_path = config_dir.as_ref().join(CONFIG_FILENAME);

        if !config_path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(&config_path).map_err(LibraryError::Io)?;
        let config: LibraryConfig =
            serde_json::from_str(&content).map_err(LibraryError::Serialization)?;
        Ok(config)
    }

    /// Save config to the given directory
    pub fn save<P: AsRef<Path>>(&self, config_dir: P) -> Result<()> {
        let config_dir = config_dir.as_ref();

        if !config_dir.exists() {
            fs::create_dir_all(config_dir).map_err(LibraryError::Io)?;
        }

        let config_path = config_dir.join(CONFIG_FILENAME);
        let content = serde_json::to_string_pretty(self).map_err(LibraryError::Serialization)?;
        fs::write(config_path, content).map_err(LibraryError::Io)?;
        Ok(())
    }

    pub fn library_path<P: AsRef<Path>>(&self, data_dir: P) -> PathBuf {
        let file = Path::new(&self.library_file);
        if file.is_absolute() {
            file.to_path_buf()
        } else {
            data_dir.as_ref().join(file)
        }
    }

    pub fn get(&self, key: &str) -> Option<String> {
        match key {
            "library-file" => Some(self.library_file.clone()),
            "top-authors" => Some(self.top_authors.to_string()),
            "backup-corrupt" => Some(self.backup_corrupt.to_string()),
            _ => None,
        }
    }

    pub fn set(&mut self, key: &str, value: &str) -> std::result::Result<(), String> {
        match key {
            "library-file" => {
                let value = value.trim();
                if value.is_empty() {
                    return Err("library-file cannot be empty".to_string());
                }
                self.library_file = value.to_string();
            }
            "top-authors" => {
                self.top_authors = value
                    .trim()
                    .parse()
                    .map_err(|_| format!("top-authors must be a number, got {}", value))?;
            }
            "backup-corrupt" => {
                self.backup_corrupt = match value.trim().to_ascii_lowercase().as_str() {
                    "true" | "yes" | "on" | "1" => true,
                    "false" | "no" | "off" | "0" => false,
                    _ => return Err(format!("backup-corrupt must be true or false, got {}", value)),
                };
            }
            _ => return Err(format!("Unknown config key: {}", key)),
        }
        Ok(())
    }
}
