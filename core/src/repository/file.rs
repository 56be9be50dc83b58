use std::fs::{self, File};
use std::io::{BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

use anyhow::{anyhow, Context, Result};
use serde_json::{Map, Value};
use tracing::{debug, warn};

use crate::repository::traits::KeyValueStore;

const DEFAULT_FILE_NAME: &str = "store.json";
const TEMP_EXTENSION: &str = "json.tmp";
const DEFAULT_DIR_NAME: &str = ".savings_tracker";

pub fn default_data_dir() -> Result<PathBuf> {
    let home_dir = dirs::home_dir()
        .ok_or_else(|| anyhow!("Could not determine home directory"))?;
    Ok(home_dir.join(DEFAULT_DIR_NAME))
}

/// All keys live in one JSON object that is rewritten on every save.
#[derive(Clone)]
pub struct FileKeyValueStore {
    file_path: PathBuf,
}

impl FileKeyValueStore {
    pub fn new(base_dir: Option<PathBuf>) -> Result<Self> {
        let mut path = match base_dir {
            Some(dir) => dir,
            None => default_data_dir()?,
        };
        fs::create_dir_all(&path)
            .with_context(|| format!("creating data directory {}", path.display()))?;
        path.push(DEFAULT_FILE_NAME);

        let store = FileKeyValueStore { file_path: path };
        if !store.file_path.exists() {
            store.write_entries(&Map::new())?;
            debug!(path = %store.file_path.display(), "created empty store");
        }

        Ok(store)
    }

    pub fn path(&self) -> &Path {
        &self.file_path
    }

    fn read_entries(&self) -> Result<Map<String, Value>> {
        let file = File::open(&self.file_path)
            .with_context(|| format!("opening {}", self.file_path.display()))?;
        let reader = BufReader::new(file);
        let entries = serde_json::from_reader(reader)
            .with_context(|| format!("parsing {}", self.file_path.display()))?;
        Ok(entries)
    }

    fn temp_path(&self) -> PathBuf {
        self.file_path.with_extension(TEMP_EXTENSION)
    }

    // The store file is only ever replaced by a rename, so an interrupted
    // write leaves the previous contents in place.
    fn write_entries(&self, entries: &Map<String, Value>) -> Result<()> {
        let temp_path = self.temp_path();
        let file = File::create(&temp_path)
            .with_context(|| format!("writing {}", temp_path.display()))?;
        let mut writer = BufWriter::new(file);
        serde_json::to_writer_pretty(&mut writer, entries)?;
        writer.flush()?;
        writer.get_ref().sync_all()?;
        fs::rename(&temp_path, &self.file_path)
            .with_context(|| format!("replacing {}", self.file_path.display()))?;
        Ok(())
    }

    fn save_value(&self, key: &str, value: Value) -> Result<()> {
        let mut entries = self.read_entries()?;
        entries.insert(key.to_string(), value);
        self.write_entries(&entries)
    }
}

impl KeyValueStore for FileKeyValueStore {
    fn load_string(&self, key: &str) -> Result<Option<String>> {
        let entries = self.read_entries()?;
        match entries.get(key) {
            None => Ok(None),
            Some(Value::String(s)) => Ok(Some(s.clone())),
            Some(other) => {
                warn!(key, value = %other, "expected a string, ignoring stored value");
                Ok(None)
            }
        }
    }

    fn load_f64(&self, key: &str) -> Result<Option<f64>> {
        let entries = self.read_entries()?;
        match entries.get(key) {
            None => Ok(None),
            Some(Value::Number(n)) => Ok(n.as_f64()),
            Some(other) => {
                warn!(key, value = %other, "expected a number, ignoring stored value");
                Ok(None)
            }
        }
    }

    fn save_string(&self, key: &str, value: &str) -> Result<()> {
        self.save_value(key, Value::String(value.to_string()))
    }

    fn save_f64(&self, key: &str, value: f64) -> Result<()> {
        // JSON has no representation for NaN or infinity.
        let number = serde_json::Number::from_f64(value)
            .ok_or_else(|| anyhow!("cannot store {} for '{}'", value, key))?;
        self.save_value(key, Value::Number(number))
    }
}
