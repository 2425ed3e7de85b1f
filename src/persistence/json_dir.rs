use std::{
    fs, io,
    path::{Path, PathBuf},
};

use crate::snapshot::SequenceSnapshot;

use super::{
    new_id, now_millis, sort_summaries, validate_id, SequenceStore, SequenceSummary, StoreError,
    StoredSequence,
};

const EXTENSION: &str = "json";

/// One `<id>.json` file per sequence inside a library directory.
///
/// The directory is created on first write. Files that fail to parse are
/// skipped by [`SequenceStore::list`] (with a warning) but reported by
/// [`SequenceStore::get`].
#[derive(Debug, Clone)]
pub struct JsonDirStore {
    dir: PathBuf,
}

impl JsonDirStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path(&self, id: &str) -> Result<PathBuf, StoreError> {
        validate_id(id)?;
        Ok(self.dir.join(format!("{id}.{EXTENSION}")))
    }

    fn read(&self, id: &str) -> Result<StoredSequence, StoreError> {
        let path = self.path(id)?;
        let json = fs::read_to_string(&path).map_err(|err| match err.kind() {
            io::ErrorKind::NotFound => StoreError::NotFound(id.to_string()),
            _ => StoreError::Io(err),
        })?;
        Ok(serde_json::from_str(&json)?)
    }

    /// Write through a temporary file so a crash never leaves half a file.
    fn write(&self, id: &str, stored: &StoredSequence) -> Result<(), StoreError> {
        let path = self.path(id)?;
        fs::create_dir_all(&self.dir)?;
        let json = serde_json::to_string_pretty(stored)?;
        let tmp = path.with_extension("json.tmp");
        fs::write(&tmp, json)?;
        fs::rename(&tmp, &path).inspect_err(|_| {
            let _ = fs::remove_file(&tmp);
        })?;
        Ok(())
    }
}

impl SequenceStore for JsonDirStore {
    fn list(&self) -> Result<Vec<SequenceSummary>, StoreError> {
        let entries = match fs::read_dir(&self.dir) {
            Ok(entries) => entries,
            Err(err) if err.kind() == io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(err) => return Err(err.into()),
        };

        let mut summaries = Vec::new();
        for entry in entries {
            let path = entry?.path();
            if path.extension().and_then(|e| e.to_str()) != Some(EXTENSION) {
                continue;
            }
            let Some(id) = path.file_stem().and_then(|s| s.to_str()) else {
                continue;
            };
            match self.read(id) {
                Ok(stored) => summaries.push(stored.summary(id)),
                Err(err) => log::warn!("skipping {}: {err}", path.display()),
            }
        }
        sort_summaries(&mut summaries);
        Ok(summaries)
    }

    fn get(&self, id: &str) -> Result<SequenceSnapshot, StoreError> {
        let mut sequence = self.read(id)?.sequence;
        sequence.id = Some(id.to_string());
        Ok(sequence)
    }

    fn create(&mut self, snapshot: &SequenceSnapshot) -> Result<String, StoreError> {
        let id = new_id();
        self.write(&id, &StoredSequence::new(&id, snapshot, now_millis()))?;
        log::info!("saved new sequence {id} to {}", self.dir.display());
        Ok(id)
    }

    fn update(&mut self, id: &str, snapshot: &SequenceSnapshot) -> Result<(), StoreError> {
        let created_at = self.read(id)?.created_at;
        self.write(id, &StoredSequence::new(id, snapshot, created_at))
    }

    fn delete(&mut self, id: &str) -> Result<(), StoreError> {
        let path = self.path(id)?;
        fs::remove_file(&path).map_err(|err| match err.kind() {
            io::ErrorKind::NotFound => StoreError::NotFound(id.to_string()),
            _ => StoreError::Io(err),
        })
    }
}
