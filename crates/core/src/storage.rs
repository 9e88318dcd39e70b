//! Persistence gateway for the patient store.
//!
//! The store is a single JSON document: a top-level object mapping patient id to record.
//! It is read in full on every [`PatientStorage::load`] and rewritten in full on every
//! [`PatientStorage::save`]. Nothing is cached between calls; the file is the source of
//! truth.

use crate::constants::{EMPTY_STORE, STORE_TMP_SUFFIX};
use crate::patient::PatientStore;
use crate::{PatientError, PatientResult};
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

/// Whole-document load/save of the patient store.
pub trait PatientStorage: Send + Sync {
    /// Reads and deserialises the entire store.
    fn load(&self) -> PatientResult<PatientStore>;

    /// Serialises and writes the entire store, replacing what was there.
    fn save(&self, store: &PatientStore) -> PatientResult<()>;
}

/// [`PatientStorage`] backed by a JSON file on disk.
///
/// Saves go to a sibling temporary file which is then renamed over the store, so a crash
/// mid-write leaves either the old or the new document, never a truncated one.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Creates an empty store (`{}`) if the file does not exist yet.
    ///
    /// # Returns
    /// `true` if a new file was written, `false` if one was already present.
    pub fn initialise(&self) -> PatientResult<bool> {
        if self.path.exists() {
            return Ok(false);
        }
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(PatientError::FileWrite)?;
        }
        fs::write(&self.path, EMPTY_STORE).map_err(PatientError::FileWrite)?;
        tracing::info!("initialised empty patient store at {}", self.path.display());
        Ok(true)
    }

    fn tmp_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(|n| n.to_os_string())
            .unwrap_or_default();
        name.push(STORE_TMP_SUFFIX);
        self.path.with_file_name(name)
    }
}

impl PatientStorage for JsonFileStore {
    fn load(&self) -> PatientResult<PatientStore> {
        let raw = match fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Err(PatientError::StoreMissing(self.path.clone()));
            }
            Err(e) => return Err(PatientError::FileRead(e)),
        };
        let store: PatientStore =
            serde_json::from_str(&raw).map_err(PatientError::Deserialization)?;
        tracing::debug!(
            "loaded {} patient(s) from {}",
            store.len(),
            self.path.display()
        );
        Ok(store)
    }

    fn save(&self, store: &PatientStore) -> PatientResult<()> {
        let mut raw = serde_json::to_vec_pretty(store).map_err(PatientError::Serialization)?;
        raw.push(b'\n');

        let tmp = self.tmp_path();
        let mut file = fs::File::create(&tmp).map_err(PatientError::FileWrite)?;
        file.write_all(&raw).map_err(PatientError::FileWrite)?;
        file.sync_all().map_err(PatientError::FileWrite)?;
        drop(file);

        if let Err(e) = fs::rename(&tmp, &self.path) {
            let _ = fs::remove_file(&tmp);
            return Err(PatientError::FileWrite(e));
        }

        tracing::debug!(
            "saved {} patient(s) to {}",
            store.len(),
            self.path.display()
        );
        Ok(())
    }
}
