//! Durable key/value storage for the document.
//!
//! The editor mirrors the full document text to a single key after every
//! change. [`FileStorage`] keeps each key in a file under a directory;
//! [`MemoryStorage`] is the in-process backend used by tests and
//! `--ephemeral` sessions.

use std::collections::HashMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// Key the document text is stored under.
pub const STORAGE_KEY: &str = "markdown-content";

/// Document shown when storage holds nothing usable.
pub const WELCOME_DOCUMENT: &str = "# Welcome to markpad

Write **markdown** on the left and watch the _preview_ on the right.

## Shortcuts

- Ctrl+B bold, Ctrl+I italic, Ctrl+1/2/3 headings
- Ctrl+K link, Ctrl+E inline code, Ctrl+U bulleted list
- Ctrl+Z undo, Ctrl+Y redo
- Ctrl+S export `document.md`
- Ctrl+H lists every shortcut

```rust
fn main() {
    println!(\"Hello, markpad!\");
}
```

> Everything you type is saved automatically.
";

/// Storage failure.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("failed to read {key} from {path}: {source}")]
    Read {
        key: String,
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("failed to write {key} to {path}: {source}")]
    Write {
        key: String,
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("invalid storage key {0:?}")]
    InvalidKey(String),
    #[error("storage backend unavailable: {0}")]
    Unavailable(String),
}

/// Key/value backend for persisted text.
pub trait Storage {
    /// Read the value for `key`. Returns `Ok(None)` when it was never written.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError`] when the backend cannot be read.
    fn read(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Overwrite the value for `key`.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError`] when the value cannot be written.
    fn write(&mut self, key: &str, value: &str) -> Result<(), StorageError>;

    /// Human-readable location for the status line.
    fn describe(&self) -> String;
}

/// One file per key inside a directory.
#[derive(Debug, Clone)]
pub struct FileStorage {
    dir: PathBuf,
}

impl FileStorage {
    /// Storage rooted at `dir`. The directory is created on first write.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path_for(&self, key: &str) -> Result<PathBuf, StorageError> {
        let valid = !key.is_empty()
            && key
                .chars()
                .all(|ch| ch.is_ascii_alphanumeric() || matches!(ch, '-' | '_' | '.'))
            && !key.starts_with('.');
        if !valid {
            return Err(StorageError::InvalidKey(key.to_string()));
        }
        Ok(self.dir.join(key))
    }
}

impl Storage for FileStorage {
    fn read(&self, key: &str) -> Result<Option<String>, StorageError> {
        let path = self.path_for(key)?;
        match fs::read_to_string(&path) {
            Ok(value) => Ok(Some(value)),
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(source) => Err(StorageError::Read {
                key: key.to_string(),
                path,
                source,
            }),
        }
    }

    fn write(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        let path = self.path_for(key)?;
        let write_err = |source| StorageError::Write {
            key: key.to_string(),
            path: path.clone(),
            source,
        };
        fs::create_dir_all(&self.dir).map_err(write_err)?;
        // Sibling file plus rename: readers see the old text or the new one.
        let tmp = path.with_extension("tmp");
        fs::write(&tmp, value).map_err(write_err)?;
        fs::rename(&tmp, &path).map_err(write_err)?;
        tracing::debug!(key, path = %path.display(), bytes = value.len(), "stored");
        Ok(())
    }

    fn describe(&self) -> String {
        self.dir.display().to_string()
    }
}

/// In-memory map. Nothing survives the process.
#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
    values: HashMap<String, String>,
    fail_writes: bool,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed `key` with `value`.
    #[must_use]
    pub fn with_value(mut self, key: &str, value: &str) -> Self {
        self.values.insert(key.to_string(), value.to_string());
        self
    }

    /// Make every subsequent write fail, for exercising warning paths.
    #[must_use]
    pub const fn failing_writes(mut self) -> Self {
        self.fail_writes = true;
        self
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.values.get(key).map(String::as_str)
    }
}

impl Storage for MemoryStorage {
    fn read(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.values.get(key).cloned())
    }

    fn write(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        if self.fail_writes {
            return Err(StorageError::Unavailable("writes disabled".to_string()));
        }
        self.values.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn describe(&self) -> String {
        "memory".to_string()
    }
}

/// Where the starting document came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadSource {
    Stored,
    Welcome,
}

/// Outcome of [`load_initial_document`].
#[derive(Debug)]
pub struct InitialDocument {
    pub text: String,
    pub source: LoadSource,
    /// Read failure that forced the welcome document, if any.
    pub warning: Option<StorageError>,
}

/// Pick the starting document: the stored text when present and non-empty,
/// otherwise the welcome document. Read failures fall back to the welcome
/// document and are reported, never swallowed.
pub fn load_initial_document(storage: &dyn Storage) -> InitialDocument {
    match storage.read(STORAGE_KEY) {
        Ok(Some(text)) if !text.is_empty() => InitialDocument {
            text,
            source: LoadSource::Stored,
            warning: None,
        },
        Ok(_) => InitialDocument {
            text: WELCOME_DOCUMENT.to_string(),
            source: LoadSource::Welcome,
            warning: None,
        },
        Err(err) => {
            tracing::warn!(error = %err, "could not read stored document, using welcome text");
            InitialDocument {
                text: WELCOME_DOCUMENT.to_string(),
                source: LoadSource::Welcome,
                warning: Some(err),
            }
        }
    }
}

/// Mirror `text` to [`STORAGE_KEY`].
///
/// # Errors
///
/// Returns the backend's [`StorageError`]; callers report it and carry on.
pub fn persist_document(storage: &mut dyn Storage, text: &str) -> Result<(), StorageError> {
    storage.write(STORAGE_KEY, text)
}
