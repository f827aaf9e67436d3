use crate::error::Result;
use async_trait::async_trait;

/// Source of full post objects, used to enrich replies by id.
///
/// Supplied by the caller; typically a client for the service's own API.
#[async_trait]
pub trait PostLookup: Send + Sync {
    async fn post_by_id(&self, id: u64) -> Result<serde_json::Value>;
}
