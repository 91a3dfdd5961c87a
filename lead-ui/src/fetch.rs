use lead_core::error::ApiError;
use lead_core::transport::GraphqlTransport;
use serde_json::Value;
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::JsFuture;
use web_sys::{Request, RequestInit, RequestMode, Response};

/// Browser fetch carrier for GraphQL requests. POSTs `{query, variables}` to
/// the configured endpoint and hands the raw body back to the data layer.
pub struct FetchTransport {
    endpoint: String,
}

impl FetchTransport {
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
        }
    }
}

impl GraphqlTransport for FetchTransport {
    async fn execute(&self, document: &str, variables: &Value) -> Result<Value, ApiError> {
        let payload = serde_json::json!({
            "query": document,
            "variables": variables,
        });
        let body =
            serde_json::to_string(&payload).map_err(|e| ApiError::Transport(e.to_string()))?;

        let opts = RequestInit::new();
        opts.set_method("POST");
        opts.set_mode(RequestMode::Cors);
        opts.set_body(&JsValue::from_str(&body));

        let request = Request::new_with_str_and_init(&self.endpoint, &opts)
            .map_err(|e| ApiError::Transport(format!("request build failed: {e:?}")))?;
        request
            .headers()
            .set("Content-Type", "application/json")
            .map_err(|e| ApiError::Transport(format!("header set failed: {e:?}")))?;

        let window = web_sys::window()
            .ok_or_else(|| ApiError::Transport("window not available".to_string()))?;
        let response = JsFuture::from(window.fetch_with_request(&request))
            .await
            .map_err(|e| ApiError::Transport(format!("fetch rejected: {e:?}")))?;
        let response: Response = response
            .dyn_into()
            .map_err(|_| ApiError::Transport("fetch returned a non-response".to_string()))?;

        if !response.ok() {
            return Err(ApiError::Transport(format!(
                "endpoint returned status {}",
                response.status()
            )));
        }

        let json = JsFuture::from(
            response
                .json()
                .map_err(|e| ApiError::Transport(format!("body read failed: {e:?}")))?,
        )
        .await
        .map_err(|e| ApiError::Transport(format!("body read rejected: {e:?}")))?;

        serde_wasm_bindgen::from_value(json).map_err(|e| ApiError::Decode(e.to_string()))
    }
}
