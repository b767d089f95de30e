use std::fs::{self, File};
use std::io::{BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tracing::debug;

use crate::repository::document::{DocumentBackend, StoreDocument};

const DEFAULT_FILE_NAME: &str = "schedule.json";

/// Stores the whole organizer as one pretty-printed JSON file.
#[derive(Clone)]
pub struct FileRepository {
    file_path: PathBuf,
}

impl FileRepository {
    /// Opens `<data_dir>/schedule.json`, creating the directory and an empty
    /// document if needed.
    pub fn new(data_dir: &Path) -> Result<Self> {
        fs::create_dir_all(data_dir)
            .with_context(|| format!("Could not create data directory {}", data_dir.display()))?;
        let path = data_dir.join(DEFAULT_FILE_NAME);

        let repo = FileRepository { file_path: path };
        if !repo.file_path.exists() {
            repo.save(&StoreDocument::default())?;
        }
        Ok(repo)
    }

    pub fn path(&self) -> &Path {
        &self.file_path
    }
}

impl DocumentBackend for FileRepository {
    fn load(&self) -> Result<StoreDocument> {
        let file = File::open(&self.file_path)
            .with_context(|| format!("Could not open {}", self.file_path.display()))?;
        let reader = BufReader::new(file);
        let doc = serde_json::from_reader(reader)
            .with_context(|| format!("Malformed store {}", self.file_path.display()))?;
        Ok(doc)
    }

    fn save(&self, doc: &StoreDocument) -> Result<()> {
        // Write to a sibling file first so a failed write never truncates the store.
        let tmp_path = self.file_path.with_extension("json.tmp");
        let file = File::create(&tmp_path)?;
        let mut writer = BufWriter::new(file);
        serde_json::to_writer_pretty(&mut writer, doc)?;
        writer.flush()?;
        fs::rename(&tmp_path, &self.file_path)?;
        debug!(path = %self.file_path.display(), "store saved");
        Ok(())
    }
}
