use crate::domain::model::ApiRequest;
use crate::utils::error::Result;
use async_trait::async_trait;

/// Executes a shaped request against the remote service and returns the
/// selected members of its response body.
#[async_trait]
pub trait ApiInvoker: Send + Sync {
    async fn call_api(&self, request: ApiRequest) -> Result<serde_json::Value>;
}
