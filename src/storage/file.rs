use super::Store;
use crate::error::AppError;
use std::fs;
use std::path::PathBuf;
use tracing::debug;

/// One `<key>.json` file per key inside a data directory.
#[derive(Debug, Clone)]
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        FileStore { dir: dir.into() }
    }

    pub fn path_for(&self, key: &str) -> PathBuf {
        let safe: String = key
            .chars()
            .map(|c| if c.is_ascii_alphanumeric() || c == '-' || c == '_' { c } else { '_' })
            .collect();
        self.dir.join(format!("{}.json", safe))
    }
}

impl Store for FileStore {
    fn get(&self, key: &str) -> Option<String> {
        let path = self.path_for(key);
        match fs::read_to_string(&path) {
            Ok(content) => Some(content),
            Err(e) => {
                debug!("No stored value at {}: {}", path.display(), e);
                None
            }
        }
    }

    fn set(&mut self, key: &str, value: String) -> Result<(), AppError> {
        fs::create_dir_all(&self.dir).map_err(|e| {
            AppError::StorageError(format!(
                "Failed to create data directory {}: {}",
                self.dir.display(),
                e
            ))
        })?;

        let path = self.path_for(key);
        fs::write(&path, value).map_err(|e| {
            AppError::StorageError(format!("Failed to write {}: {}", path.display(), e))
        })?;

        debug!("Wrote {}", path.display());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn key_is_sanitized_into_a_file_name() {
        let store = FileStore::new("/data");
        assert_eq!(store.path_for("winrateData"), PathBuf::from("/data/winrateData.json"));
        assert_eq!(store.path_for("../x"), PathBuf::from("/data/___x.json"));
    }
}
