use crate::utils::error::Result;
use async_trait::async_trait;

/// Persisted key-value bucket. Values are JSON documents; a missing key
/// reads as `None`.
pub trait KeyValueStore: Send + Sync {
    fn read_key(
        &self,
        key: &str,
    ) -> impl std::future::Future<Output = Result<Option<Vec<u8>>>> + Send;
    fn write_key(
        &self,
        key: &str,
        data: &[u8],
    ) -> impl std::future::Future<Output = Result<()>> + Send;
}

/// Transport seam to the external planning service. Takes the prompt and
/// the declared structured-output schema, returns the raw response
/// document. Parsing and ordering stay with the caller.
#[async_trait]
pub trait RoutePlanner: Send + Sync {
    async fn plan_route(&self, prompt: &str, response_schema: &serde_json::Value)
        -> Result<String>;
}
