use std::path::PathBuf;

use anyhow::{Context, Result};

use super::KeyValueStore;

/// Stores each key as the file `<dir>/<key>`, holding the raw value.
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    pub fn new(dir: PathBuf) -> Self {
        Self { dir }
    }

    fn entry_path(&self, key: &str) -> PathBuf {
        self.dir.join(key)
    }
}

impl KeyValueStore for FileStore {
    fn load(&self, key: &str) -> Result<Option<String>> {
        let path = self.entry_path(key);
        if !path.exists() {
            return Ok(None);
        }
        let contents = std::fs::read_to_string(&path)
            .with_context(|| format!("Failed to read stored entry: {}", key))?;
        Ok(Some(contents))
    }

    fn save(&self, key: &str, value: &str) -> Result<()> {
        std::fs::create_dir_all(&self.dir)
            .with_context(|| format!("Failed to create data directory: {}", self.dir.display()))?;
        std::fs::write(self.entry_path(key), value)
            .with_context(|| format!("Failed to write stored entry: {}", key))?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_load_missing_is_none() {
        let temp = tempdir().unwrap();
        let store = FileStore::new(temp.path().to_path_buf());
        assert_eq!(store.load("theme").unwrap(), None);
    }

    #[test]
    fn test_save_creates_dir_and_overwrites() {
        let temp = tempdir().unwrap();
        let dir = temp.path().join("pokedex");
        let store = FileStore::new(dir.clone());

        store.save("theme", "light").unwrap();
        store.save("theme", "dark").unwrap();

        assert_eq!(std::fs::read_to_string(dir.join("theme")).unwrap(), "dark");
        assert!(!dir.join("theme.json").exists());
        assert_eq!(store.load("theme").unwrap().as_deref(), Some("dark"));
    }
}
