use std::fs::{self, File};
use std::io::{BufWriter, ErrorKind, Write};
use std::path::{Path, PathBuf};

use anyhow::{anyhow, Context, Result};
use tracing::debug;

use crate::repository::traits::StorageBackend;

const DEFAULT_DIR_NAME: &str = ".volunteer-hours";
const ITEM_EXTENSION: &str = "json";
const TMP_SUFFIX: &str = "tmp";

/// Directory-backed key-value storage. Each key is one `<key>.json` file.
#[derive(Clone, Debug)]
pub struct FileStorage {
    base_dir: PathBuf,
}

impl FileStorage {
    pub fn new(base_dir: Option<PathBuf>) -> Result<Self> {
        let path = match base_dir {
            Some(dir) => dir,
            None => default_data_dir()?,
        };
        fs::create_dir_all(&path)
            .with_context(|| format!("Could not create data directory {}", path.display()))?;

        Ok(FileStorage { base_dir: path })
    }

    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    fn item_path(&self, key: &str) -> Result<PathBuf> {
        if key.is_empty() || key.contains(['/', '\\']) || key.starts_with('.') {
            return Err(anyhow!("Invalid storage key: '{}'", key));
        }
        Ok(self.base_dir.join(format!("{}.{}", key, ITEM_EXTENSION)))
    }
}

/// `~/.volunteer-hours`
pub fn default_data_dir() -> Result<PathBuf> {
    let home_dir = dirs::home_dir().ok_or_else(|| anyhow!("Could not determine home directory"))?;
    Ok(home_dir.join(DEFAULT_DIR_NAME))
}

impl StorageBackend for FileStorage {
    fn get_item(&self, key: &str) -> Result<Option<String>> {
        let path = self.item_path(key)?;
        match fs::read_to_string(&path) {
            Ok(content) => Ok(Some(content)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e).with_context(|| format!("Could not read {}", path.display())),
        }
    }

    fn set_item(&self, key: &str, value: &str) -> Result<()> {
        let path = self.item_path(key)?;
        let tmp = path.with_extension(format!("{}.{}", ITEM_EXTENSION, TMP_SUFFIX));
        if let Err(e) = write_then_rename(&tmp, &path, value) {
            if let Err(cleanup) = fs::remove_file(&tmp) {
                if cleanup.kind() != ErrorKind::NotFound {
                    debug!(path = %tmp.display(), error = %cleanup, "could not remove temp file");
                }
            }
            return Err(e);
        }
        debug!(key, bytes = value.len(), "stored item");
        Ok(())
    }
}

/// Writes `value` to `tmp` and moves it over `path`, so a reader never sees
/// a half-written item.
fn write_then_rename(tmp: &Path, path: &Path, value: &str) -> Result<()> {
    let file = File::create(tmp).with_context(|| format!("Could not create {}", tmp.display()))?;
    let mut writer = BufWriter::new(file);
    writer
        .write_all(value.as_bytes())
        .and_then(|()| writer.flush())
        .with_context(|| format!("Could not write {}", tmp.display()))?;
    drop(writer);
    fs::rename(tmp, path).with_context(|| format!("Could not write {}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_missing_item_is_none() {
        let dir = tempdir().unwrap();
        let storage = FileStorage::new(Some(dir.path().to_path_buf())).unwrap();
        assert_eq!(storage.get_item("entries").unwrap(), None);
    }

    #[test]
    fn test_set_then_get_overwrites() {
        let dir = tempdir().unwrap();
        let storage = FileStorage::new(Some(dir.path().to_path_buf())).unwrap();

        storage.set_item("entries", "[1]").unwrap();
        storage.set_item("entries", "[2]").unwrap();

        assert_eq!(storage.get_item("entries").unwrap().as_deref(), Some("[2]"));
        assert!(dir.path().join("entries.json").exists());
        assert!(!dir.path().join("entries.json.tmp").exists());
    }

    #[test]
    fn test_failed_write_leaves_no_temp_file() {
        let dir = tempdir().unwrap();
        let storage = FileStorage::new(Some(dir.path().to_path_buf())).unwrap();
        let blocked = dir.path().join("entries.json");
        fs::create_dir(&blocked).unwrap();
        fs::write(blocked.join("keep"), "x").unwrap();

        let err = storage.set_item("entries", "[]").unwrap_err();

        assert!(err.to_string().contains("entries.json"));
        assert!(!dir.path().join("entries.json.tmp").exists());
        assert!(blocked.join("keep").exists());
    }

    #[test]
    fn test_creates_nested_base_dir() {
        let dir = tempdir().unwrap();
        let nested = dir.path().join("a").join("b");
        FileStorage::new(Some(nested.clone())).unwrap();
        assert!(nested.is_dir());
    }

    #[test]
    fn test_rejects_path_like_keys() {
        let dir = tempdir().unwrap();
        let storage = FileStorage::new(Some(dir.path().to_path_buf())).unwrap();
        assert!(storage.set_item("../escape", "x").is_err());
        assert!(storage.get_item("").is_err());
    }
}
