//! Persisted layout configuration
//!
//! Settings live in two scopes under one root directory:
//! - `settings.json` holds the global defaults (page, rows, presentation)
//! - `albums/<album>.json` holds one album's customization maps plus the
//!   settings where the album differs from the global defaults
//!
//! Loading merges the album record over the global defaults over the
//! built-in defaults. Unknown keys are ignored and a key whose value no
//! longer parses is skipped, so older and newer records both load.

use crate::options::{CUSTOMIZATION_KEYS, LayoutConfig};
use crate::types::*;
use serde_json::{Map, Value};
use std::path::{Path, PathBuf};

const GLOBAL_FILE: &str = "settings.json";
const ALBUMS_DIR: &str = "albums";

/// Directory-backed store for global and per-album layout settings
#[derive(Debug, Clone)]
pub struct ConfigStore {
    root: PathBuf,
}

impl ConfigStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    fn global_path(&self) -> PathBuf {
        self.root.join(GLOBAL_FILE)
    }

    fn album_path(&self, album_id: &str) -> PathBuf {
        self.root
            .join(ALBUMS_DIR)
            .join(format!("{}.json", sanitize_album_id(album_id)))
    }

    /// Global defaults merged over the built-in defaults
    pub async fn load_global(&self) -> Result<LayoutConfig> {
        let global = read_record(&self.global_path()).await?;
        Ok(merge_records(&[strip_customizations(global)]))
    }

    /// Effective configuration for an album
    pub async fn load_album(&self, album_id: &str) -> Result<LayoutConfig> {
        let global = read_record(&self.global_path()).await?;
        let album = read_record(&self.album_path(album_id)).await?;
        Ok(merge_records(&[strip_customizations(global), album]))
    }

    /// Persist the global defaults; customization maps are never written here
    pub async fn save_global(&self, config: &LayoutConfig) -> Result<()> {
        let record = strip_customizations(serde_json::to_value(config.clamped())?);
        write_record(&self.global_path(), &record).await
    }

    /// Persist an album record (clamped values are what get written).
    ///
    /// Settings equal to the current global defaults are left out so later
    /// changes to the defaults still reach the album.
    pub async fn save_album(&self, album_id: &str, config: &LayoutConfig) -> Result<()> {
        let inherited = serde_json::to_value(self.load_global().await?)?;
        let record = album_delta(serde_json::to_value(config.clamped())?, &inherited);
        write_record(&self.album_path(album_id), &record).await
    }
}

async fn read_record(path: &Path) -> Result<Value> {
    match tokio::fs::read(path).await {
        Ok(bytes) => match serde_json::from_slice(&bytes) {
            Ok(value) => Ok(value),
            Err(e) => {
                log::warn!("Ignoring unreadable settings {}: {}", path.display(), e);
                Ok(Value::Null)
            }
        },
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(Value::Null),
        Err(e) => Err(e.into()),
    }
}

async fn write_record(path: &Path, record: &Value) -> Result<()> {
    if let Some(parent) = path.parent() {
        tokio::fs::create_dir_all(parent).await?;
    }
    let json = serde_json::to_string_pretty(record)?;
    tokio::fs::write(path, json).await?;
    log::debug!("Saved settings to {}", path.display());
    Ok(())
}

/// Keep the customization keys and every setting that differs from `inherited`
fn album_delta(mut record: Value, inherited: &Value) -> Value {
    if let Value::Object(map) = &mut record {
        map.retain(|key, value| {
            CUSTOMIZATION_KEYS.contains(&key.as_str()) || inherited.get(key) != Some(&*value)
        });
    }
    record
}

fn strip_customizations(mut record: Value) -> Value {
    if let Value::Object(map) = &mut record {
        for key in CUSTOMIZATION_KEYS {
            map.remove(key);
        }
    }
    record
}

/// Merge records in order (later wins) over the built-in defaults.
///
/// Only keys `LayoutConfig` knows are considered, and each key is applied on
/// its own: if its value does not deserialize, it is skipped and the value
/// underneath it is kept. The result is clamped.
pub fn merge_records(records: &[Value]) -> LayoutConfig {
    let mut merged: Map<String, Value> = match serde_json::to_value(LayoutConfig::default()) {
        Ok(Value::Object(map)) => map,
        _ => return LayoutConfig::default(),
    };
    let known: Vec<String> = merged.keys().cloned().collect();

    for record in records {
        let Value::Object(entries) = record else {
            continue;
        };
        for key in &known {
            let Some(value) = entries.get(key) else {
                continue;
            };

            let mut candidate = merged.clone();
            candidate.insert(key.clone(), value.clone());
            match serde_json::from_value::<LayoutConfig>(Value::Object(candidate.clone())) {
                Ok(_) => merged = candidate,
                Err(e) => log::warn!("Ignoring persisted setting '{}': {}", key, e),
            }
        }
    }

    serde_json::from_value::<LayoutConfig>(Value::Object(merged))
        .unwrap_or_default()
        .clamped()
}

/// Keep album ids usable as file names
fn sanitize_album_id(album_id: &str) -> String {
    let cleaned: String = album_id
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == '-' || c == '_' {
                c
            } else {
                '_'
            }
        })
        .collect();
    if cleaned.is_empty() {
        "_".to_string()
    } else {
        cleaned
    }
}
