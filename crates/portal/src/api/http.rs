//! HTTP implementation of [`PortalApi`] using `reqwest`.

use std::sync::Arc;

use async_trait::async_trait;
use serde::Deserialize;
use serde::de::DeserializeOwned;
use tracing::debug;
use url::Url;

use returnwiz_core::Email;

use crate::config::PortalConfig;

use super::error::ApiError;
use super::types::{
    CreateReturnRequest, LoginRequest, LoginResponse, OrderLookupRequest, OrderSnapshot,
    RegisterTenantRequest, ReturnOverview, ReturnReceipt, TenantRecord,
};
use super::PortalApi;

/// Error body shape used by the backend for rejections.
#[derive(Debug, Deserialize)]
struct ErrorBody {
    detail: Option<String>,
}

/// Client for the ReturnWiz backend REST service.
///
/// Thin and stateless; the workflows decide what a failure means. Cheap to
/// clone via `Arc`.
#[derive(Clone)]
pub struct HttpPortalApi {
    inner: Arc<HttpPortalApiInner>,
}

struct HttpPortalApiInner {
    client: reqwest::Client,
    base_url: Url,
}

impl HttpPortalApi {
    /// Create a new backend client from portal configuration.
    #[must_use]
    pub fn new(config: &PortalConfig) -> Self {
        Self::with_base_url(config.api_base_url.clone())
    }

    /// Create a new backend client against an explicit base URL.
    #[must_use]
    pub fn with_base_url(base_url: Url) -> Self {
        Self {
            inner: Arc::new(HttpPortalApiInner {
                client: reqwest::Client::new(),
                base_url,
            }),
        }
    }

    fn endpoint(&self, path: &str) -> Result<Url, ApiError> {
        self.inner
            .base_url
            .join(path)
            .map_err(|e| ApiError::Parse(format!("invalid endpoint {path}: {e}")))
    }

    /// POST a JSON body and decode a JSON response.
    async fn post_json<B, T>(&self, path: &str, body: &B) -> Result<T, ApiError>
    where
        B: serde::Serialize + Sync,
        T: DeserializeOwned,
    {
        let url = self.endpoint(path)?;
        debug!(%url, "portal api request");

        let response = self.inner.client.post(url).json(body).send().await?;
        Self::decode(response).await
    }

    /// GET a JSON response.
    async fn get_json<T>(&self, path: &str, query: &[(&str, &str)]) -> Result<T, ApiError>
    where
        T: DeserializeOwned,
    {
        let url = self.endpoint(path)?;
        debug!(%url, "portal api request");

        let response = self.inner.client.get(url).query(query).send().await?;
        Self::decode(response).await
    }

    /// Turn a response into the expected type or an [`ApiError::Status`]
    /// carrying the backend's `detail` message when one was sent.
    async fn decode<T: DeserializeOwned>(response: reqwest::Response) -> Result<T, ApiError> {
        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            let detail = serde_json::from_str::<ErrorBody>(&body)
                .ok()
                .and_then(|b| b.detail);
            tracing::warn!(
                status = status.as_u16(),
                detail = detail.as_deref().unwrap_or(""),
                "portal api rejected request"
            );
            return Err(ApiError::Status {
                status: status.as_u16(),
                detail,
            });
        }

        serde_json::from_str(&body).map_err(|e| {
            tracing::error!(
                error = %e,
                body = %body.chars().take(500).collect::<String>(),
                "failed to parse portal api response"
            );
            ApiError::Parse(e.to_string())
        })
    }
}

#[async_trait]
impl PortalApi for HttpPortalApi {
    async fn search_order(&self, request: &OrderLookupRequest) -> Result<OrderSnapshot, ApiError> {
        self.post_json("/returns/search", request).await
    }

    async fn create_return(&self, request: &CreateReturnRequest) -> Result<ReturnReceipt, ApiError> {
        self.post_json("/returns", request).await
    }

    async fn register_tenant(
        &self,
        request: &RegisterTenantRequest,
    ) -> Result<TenantRecord, ApiError> {
        self.post_json("/tenants/register", request).await
    }

    async fn list_returns(&self, shop_email: &Email) -> Result<Vec<ReturnOverview>, ApiError> {
        self.get_json("/returns", &[("shop_email", shop_email.as_str())])
            .await
    }

    async fn login(&self, request: &LoginRequest) -> Result<LoginResponse, ApiError> {
        self.post_json("/login", request).await
    }
}
