//! Flat-file entry storage.
//!
//! Every entry is a `<title>.md` file holding raw Markdown. The file name is the
//! key, so lookups here are exact; case-insensitive matching lives in
//! [`crate::search`].

pub mod title;

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{Arc, RwLock};

use rand::seq::SliceRandom;
use uuid::Uuid;

use crate::error::{Result, StoreError};
use crate::search;

const ENTRY_EXT: &str = ".md";

/// Handle to the entries directory, shared by every request.
///
/// Reads hold a shared lock and writes an exclusive one, so a reader never sees
/// a partially written file. Creates and updates look for a case-insensitive
/// match under the write lock, so titles stay unique ignoring case. Two edits of
/// the same title still race: the last write wins.
pub struct EntryStore {
    root: Arc<PathBuf>,
    lock: Arc<RwLock<()>>,
}

impl EntryStore {
    pub fn open(root: impl Into<PathBuf>) -> Result<Self> {
        let root = root.into();
        fs::create_dir_all(&root)?;
        tracing::debug!("Opened entry store at {}", root.display());
        Ok(Self {
            root: Arc::new(root),
            lock: Arc::new(RwLock::new(())),
        })
    }

    /// Open the store under the platform data directory.
    pub fn open_default() -> anyhow::Result<Self> {
        let dirs = directories::ProjectDirs::from("", "", "encyclopedia")
            .ok_or_else(|| anyhow::anyhow!("Could not determine data directory"))?;
        Ok(Self::open(dirs.data_dir().join("entries"))?)
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    // ============================================================
    // Entry operations
    // ============================================================

    /// All entry titles, sorted.
    pub fn list_entries(&self) -> Result<Vec<String>> {
        let _guard = self.lock.read().expect("entry store lock poisoned");
        self.read_titles()
    }

    /// Content of the entry stored under exactly `title`.
    pub fn get_entry(&self, title: &str) -> Result<String> {
        let path = self.entry_path(title)?;
        let _guard = self.lock.read().expect("entry store lock poisoned");

        match fs::read_to_string(&path) {
            Ok(content) => Ok(content),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                Err(StoreError::NotFound(title.to_string()))
            }
            Err(e) => Err(e.into()),
        }
    }

    /// Create or overwrite the entry stored under exactly `title`.
    pub fn save_entry(&self, title: &str, content: &str) -> Result<()> {
        let path = self.entry_path(title)?;
        let _guard = self.lock.write().expect("entry store lock poisoned");
        self.write_file(&path, title, content)
    }

    /// Add a new entry, failing with `AlreadyExists` if any title matches
    /// ignoring case. The check and the write happen under one write lock.
    pub fn create_entry(&self, title: &str, content: &str) -> Result<()> {
        let path = self.entry_path(title)?;
        let _guard = self.lock.write().expect("entry store lock poisoned");

        let titles = self.read_titles()?;
        if search::title_exists(&titles, title) {
            return Err(StoreError::AlreadyExists(title.to_string()));
        }
        self.write_file(&path, title, content)
    }

    /// Overwrite the entry matching `title` ignoring case, or create it under
    /// `title` when none matches. Returns the title the content was saved under.
    pub fn update_entry(&self, title: &str, content: &str) -> Result<String> {
        let _guard = self.lock.write().expect("entry store lock poisoned");

        let titles = self.read_titles()?;
        let target = search::resolve_title(&titles, title)
            .unwrap_or(title)
            .to_string();
        let path = self.entry_path(&target)?;
        self.write_file(&path, &target, content)?;
        Ok(target)
    }

    /// A title picked uniformly from the current entries.
    pub fn random_title(&self) -> Result<String> {
        let titles = self.list_entries()?;
        titles
            .choose(&mut rand::thread_rng())
            .cloned()
            .ok_or(StoreError::EmptyStore)
    }

    // Callers hold the lock.
    fn read_titles(&self) -> Result<Vec<String>> {
        let mut titles = Vec::new();
        for dir_entry in fs::read_dir(self.root.as_path())? {
            let dir_entry = dir_entry?;
            if !dir_entry.file_type()?.is_file() {
                continue;
            }
            let file_name = dir_entry.file_name();
            let Some(name) = file_name.to_str() else {
                continue;
            };
            match name.strip_suffix(ENTRY_EXT) {
                Some(title) if title::check(title).is_ok() => titles.push(title.to_string()),
                _ => {}
            }
        }

        titles.sort();
        Ok(titles)
    }

    // Callers hold the write lock.
    fn write_file(&self, path: &Path, title: &str, content: &str) -> Result<()> {
        // Atomic write
        let tmp_path = self.root.join(format!(".{}.tmp", Uuid::new_v4()));
        fs::write(&tmp_path, content)?;
        if let Err(e) = fs::rename(&tmp_path, path) {
            let _ = fs::remove_file(&tmp_path);
            return Err(e.into());
        }

        tracing::info!("Saved entry '{}' ({} bytes)", title, content.len());
        Ok(())
    }

    fn entry_path(&self, title: &str) -> Result<PathBuf> {
        title::check(title).map_err(|_| StoreError::InvalidTitle(title.to_string()))?;
        Ok(self.root.join(format!("{title}{ENTRY_EXT}")))
    }
}

impl Clone for EntryStore {
    fn clone(&self) -> Self {
        Self {
            root: self.root.clone(),
            lock: self.lock.clone(),
        }
    }
}
