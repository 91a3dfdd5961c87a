use crate::error::ApiError;
use serde_json::Value;

/// Seam between the data layer and whatever carries requests to the GraphQL
/// endpoint. Implementations return the raw response body; envelope handling
/// lives with the operation descriptors. Non-Send on purpose: the UI runtime
/// is single-threaded.
#[allow(async_fn_in_trait)]
pub trait GraphqlTransport {
    async fn execute(&self, document: &str, variables: &Value) -> Result<Value, ApiError>;
}
