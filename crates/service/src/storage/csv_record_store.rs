use std::{io::ErrorKind, path::{Path, PathBuf}, sync::Arc};

use async_trait::async_trait;
use tokio::fs;
use tracing::{debug, info};

use crate::errors::StoreError;
use crate::records::{sort_records, Record, RecordStore};

const HEADER: [&str; 2] = ["name", "value"];

/// CSV file-backed record store.
///
/// The file holds a `name,value` header followed by one row per record.
/// Reads parse the whole file; writes serialize the whole set in memory and
/// replace the file in a single write. There is no lock, so two concurrent
/// load-modify-save cycles can overwrite each other.
#[derive(Clone, Debug)]
pub struct CsvRecordStore {
    file_path: PathBuf,
}

impl CsvRecordStore {
    pub fn new<P: Into<PathBuf>>(path: P) -> Arc<Self> {
        Arc::new(Self { file_path: path.into() })
    }

    pub fn path(&self) -> &Path {
        &self.file_path
    }

    fn encode(records: &[Record]) -> Result<Vec<u8>, StoreError> {
        let mut wtr = csv::Writer::from_writer(vec![]);
        wtr.write_record(HEADER)?;
        for record in records {
            wtr.write_record([record.name.as_str(), record.value.as_str()])?;
        }
        wtr.into_inner().map_err(|e| StoreError::Io(e.into_error()))
    }

    fn decode(bytes: &[u8]) -> Result<Vec<Record>, StoreError> {
        let mut rdr = csv::Reader::from_reader(bytes);
        let mut records = Vec::new();
        for row in rdr.deserialize::<Record>() {
            records.push(row?);
        }
        Ok(records)
    }
}

#[async_trait]
impl RecordStore for CsvRecordStore {
    async fn ensure_initialized(&self) -> Result<(), StoreError> {
        if let Some(parent) = self.file_path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).await?;
            }
        }
        if fs::try_exists(&self.file_path).await? {
            debug!(path = %self.file_path.display(), "record file already present");
            return Ok(());
        }
        fs::write(&self.file_path, Self::encode(&[])?).await?;
        info!(path = %self.file_path.display(), "created empty record file");
        Ok(())
    }

    async fn load_all(&self) -> Result<Vec<Record>, StoreError> {
        let bytes = match fs::read(&self.file_path).await {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(e.into()),
        };
        let mut records = Self::decode(&bytes)?;
        sort_records(&mut records);
        Ok(records)
    }

    async fn save_all(&self, records: &[Record]) -> Result<(), StoreError> {
        let data = Self::encode(records)?;
        fs::write(&self.file_path, data).await?;
        debug!(path = %self.file_path.display(), count = records.len(), "record file rewritten");
        Ok(())
    }
}
