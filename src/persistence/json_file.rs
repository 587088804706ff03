//! A slot stored as a JSON file in a data directory.

use std::{
    fs,
    io::ErrorKind,
    path::{Path, PathBuf},
};

use crate::{Error, persistence::SlotStorage};

/// Stores the slot `name` in the file `<dir>/<name>.json`.
///
/// Writes go to a temporary file next to the slot file which is then renamed
/// over it, so the slot file always holds a complete payload.
#[derive(Debug, Clone, PartialEq)]
pub struct JsonFileSlot {
    path: PathBuf,
}

impl JsonFileSlot {
    /// Use the slot `name` in the directory `dir`. Nothing is created until
    /// the first write.
    pub fn new(dir: &Path, name: &str) -> Self {
        Self {
            path: dir.join(format!("{name}.json")),
        }
    }

    /// The file that holds the payload.
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn temporary_path(&self) -> PathBuf {
        self.path.with_extension("json.tmp")
    }
}

impl SlotStorage for JsonFileSlot {
    fn read_slot(&self) -> Result<Option<String>, Error> {
        match fs::read_to_string(&self.path) {
            Ok(payload) => Ok(Some(payload)),
            Err(error) if error.kind() == ErrorKind::NotFound => Ok(None),
            Err(error) => Err(error.into()),
        }
    }

    fn write_slot(&mut self, payload: &str) -> Result<(), Error> {
        if let Some(dir) = self.path.parent() {
            fs::create_dir_all(dir)?;
        }

        let temporary_path = self.temporary_path();
        fs::write(&temporary_path, payload)?;
        fs::rename(&temporary_path, &self.path)?;

        Ok(())
    }
}
