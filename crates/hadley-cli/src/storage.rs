//! JSON file standing in for browser storage.
//!
//! The file holds one flat object of string values:
//!
//! ```json
//! { "hadley-theme": "light", "hadley-theme-name": "sulaco" }
//! ```

use std::collections::BTreeMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use hadley::switcher::{BackendError, ThemeStorage};
use tracing::{debug, warn};

/// [`ThemeStorage`] persisted to a JSON file on every write.
#[derive(Debug, Clone)]
pub struct FileStorage {
    path: PathBuf,
    values: BTreeMap<String, String>,
    load_error: Option<String>,
}

impl FileStorage {
    /// Open `path`. A missing file is empty storage; an unreadable or
    /// malformed file makes reads fail until the next write replaces it.
    pub fn open(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let (values, load_error) = match fs::read_to_string(&path) {
            Ok(content) => match serde_json::from_str(&content) {
                Ok(values) => (values, None),
                Err(err) => {
                    warn!(state.path = %path.display(), error = %err, "State file is malformed");
                    (BTreeMap::new(), Some(format!("malformed state file: {err}")))
                }
            },
            Err(err) if err.kind() == io::ErrorKind::NotFound => {
                debug!(state.path = %path.display(), "No state file yet");
                (BTreeMap::new(), None)
            }
            Err(err) => (BTreeMap::new(), Some(format!("cannot read state file: {err}"))),
        };
        Self {
            path,
            values,
            load_error,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn save(&self) -> Result<(), BackendError> {
        let json = serde_json::to_string_pretty(&self.values)
            .map_err(|err| BackendError::new(err.to_string()))?;
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|err| BackendError::new(err.to_string()))?;
        }
        fs::write(&self.path, json).map_err(|err| {
            BackendError::new(format!("cannot write {}: {err}", self.path.display()))
        })
    }
}

impl ThemeStorage for FileStorage {
    fn get(&self, key: &str) -> Result<Option<String>, BackendError> {
        if let Some(err) = &self.load_error {
            return Err(BackendError::new(err.clone()));
        }
        Ok(self.values.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), BackendError> {
        self.values.insert(key.to_string(), value.to_string());
        self.save()?;
        self.load_error = None;
        Ok(())
    }
}
