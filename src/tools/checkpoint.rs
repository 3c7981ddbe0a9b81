//! Save and load serializable objects

use anyhow::{Context, Result};
use serde::{de::DeserializeOwned, Serialize};
use std::fs::File;
use std::io::{BufReader, BufWriter, Write};
use std::path::Path;

/// Serialize `value` to `path`, creating parent directories as needed
pub fn save<T: Serialize + ?Sized, P: AsRef<Path>>(value: &T, path: P) -> Result<()> {
    let path = path.as_ref();
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create {}", parent.display()))?;
    }

    let file = File::create(path)
        .with_context(|| format!("Failed to create checkpoint {}", path.display()))?;
    let mut writer = BufWriter::new(file);
    serde_json::to_writer(&mut writer, value)
        .with_context(|| format!("Failed to write checkpoint {}", path.display()))?;
    writer
        .flush()
        .with_context(|| format!("Failed to flush checkpoint {}", path.display()))
}

/// Load an object previously written with [`save`]
pub fn load<T: DeserializeOwned, P: AsRef<Path>>(path: P) -> Result<T> {
    let path = path.as_ref();
    let file = File::open(path)
        .with_context(|| format!("Failed to open checkpoint {}", path.display()))?;
    serde_json::from_reader(BufReader::new(file))
        .with_context(|| format!("Failed to read checkpoint {}", path.display()))
}
