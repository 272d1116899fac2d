use crate::domain::ports::KeyValueStore;
use crate::utils::error::Result;
use std::path::PathBuf;
use tokio::fs;

/// File-per-key store under a base directory: key `khata_customers` lives
/// at `<base>/khata_customers.json`. The on-disk layout mirrors the
/// browser localStorage bucket the books were originally kept in.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    base_path: PathBuf,
}

impl JsonFileStore {
    pub fn new(base_path: impl Into<PathBuf>) -> Self {
        Self {
            base_path: base_path.into(),
        }
    }

    fn key_path(&self, key: &str) -> PathBuf {
        self.base_path.join(format!("{}.json", key))
    }
}

impl KeyValueStore for JsonFileStore {
    async fn read_key(&self, key: &str) -> Result<Option<Vec<u8>>> {
        match fs::read(self.key_path(key)).await {
            Ok(data) => Ok(Some(data)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    async fn write_key(&self, key: &str, data: &[u8]) -> Result<()> {
        fs::create_dir_all(&self.base_path).await?;
        fs::write(self.key_path(key), data).await?;
        Ok(())
    }
}
