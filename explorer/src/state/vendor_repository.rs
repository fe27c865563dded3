use common::constants::VENDOR_STORAGE_KEY;
use common::errors::StorageError;
use common::types::shop::Shop;
use std::fs::{self, File};
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

/// The durable record of registered vendors: one JSON array in
/// `<storage dir>/street_food_vendors.json`, rewritten in full on every save.
#[derive(Debug, Clone)]
pub struct VendorRepository {
    path: PathBuf,
}

impl VendorRepository {
    pub fn new(storage_dir: impl AsRef<Path>) -> Self {
        Self {
            path: storage_dir
                .as_ref()
                .join(format!("{VENDOR_STORAGE_KEY}.json")),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Reads the stored vendors. A missing file is an empty list.
    pub fn load(&self) -> Result<Vec<Shop>, StorageError> {
        let content = match fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(e.into()),
        };
        Ok(serde_json::from_str(&content)?)
    }

    /// Writes the whole list and syncs it to disk before returning.
    pub fn save(&self, vendors: &[Shop]) -> Result<(), StorageError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(vendors)?;

        // Write next to the target and rename, so a crash mid-write leaves
        // the previous record intact.
        let tmp = self.path.with_extension("json.tmp");
        let mut file = File::create(&tmp)?;
        file.write_all(json.as_bytes())?;
        file.sync_all()?;
        fs::rename(&tmp, &self.path)?;
        Ok(())
    }
}
