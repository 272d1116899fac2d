pub mod clients;
pub mod deliveries;
pub mod khata;

use crate::domain::ports::KeyValueStore;
use crate::utils::error::Result;
use serde::de::DeserializeOwned;
use serde::Serialize;

pub(crate) async fn load_collection<S, T>(store: &S, key: &str) -> Result<Vec<T>>
where
    S: KeyValueStore,
    T: DeserializeOwned,
{
    match store.read_key(key).await? {
        Some(bytes) => Ok(serde_json::from_slice(&bytes)?),
        None => Ok(Vec::new()),
    }
}

pub(crate) async fn save_collection<S, T>(store: &S, key: &str, items: &[T]) -> Result<()>
where
    S: KeyValueStore,
    T: Serialize,
{
    let bytes = serde_json::to_vec_pretty(items)?;
    store.write_key(key, &bytes).await
}

pub(crate) fn next_id(ids: impl Iterator<Item = u64>) -> u64 {
    ids.max().unwrap_or(0) + 1
}
