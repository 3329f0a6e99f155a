//! Operation contracts for the ReturnWiz backend service.
//!
//! The workflow core consumes the backend through exactly five logical
//! operations, collected in the [`PortalApi`] trait. Workflows depend only on
//! these signatures, never on transport details, so any HTTP client or mock
//! can be substituted in tests.

mod error;
mod http;
pub mod types;

pub use error::ApiError;
pub use http::HttpPortalApi;
pub use types::{
    CreateReturnRequest, LineItem, LoginRequest, LoginResponse, OrderLookupRequest, OrderSnapshot,
    RegisterTenantRequest, ReturnItem, ReturnOverview, ReturnOverviewItem, ReturnReceipt,
    TenantRecord,
};

use async_trait::async_trait;

use returnwiz_core::Email;

/// The five operations the workflow core needs from the backend.
///
/// Paths and verbs of the shipped implementation are part of the existing
/// contract and preserved bit-for-bit; see [`HttpPortalApi`].
#[async_trait]
pub trait PortalApi: Send + Sync {
    /// Look up an order by number and email (`POST /returns/search`).
    ///
    /// # Errors
    ///
    /// A non-2xx response means the order was not found or the email does
    /// not match.
    async fn search_order(&self, request: &OrderLookupRequest) -> Result<OrderSnapshot, ApiError>;

    /// Create a return case and get a tracking number back (`POST /returns`).
    ///
    /// # Errors
    ///
    /// A non-2xx response means the return could not be created.
    async fn create_return(&self, request: &CreateReturnRequest)
    -> Result<ReturnReceipt, ApiError>;

    /// Register (or finalize) a tenant (`POST /tenants/register`).
    ///
    /// # Errors
    ///
    /// A non-2xx response may carry a `detail` field, surfaced verbatim to
    /// the merchant.
    async fn register_tenant(
        &self,
        request: &RegisterTenantRequest,
    ) -> Result<TenantRecord, ApiError>;

    /// List a merchant's return cases (`GET /returns?shop_email=`).
    ///
    /// # Errors
    ///
    /// A non-2xx response means the dashboard data could not be loaded.
    async fn list_returns(&self, shop_email: &Email) -> Result<Vec<ReturnOverview>, ApiError>;

    /// Authenticate a merchant (`POST /login`).
    ///
    /// # Errors
    ///
    /// Any non-2xx response is treated as invalid credentials; no further
    /// detail is exposed.
    async fn login(&self, request: &LoginRequest) -> Result<LoginResponse, ApiError>;
}

#[async_trait]
impl<T: PortalApi + ?Sized> PortalApi for std::sync::Arc<T> {
    async fn search_order(&self, request: &OrderLookupRequest) -> Result<OrderSnapshot, ApiError> {
        (**self).search_order(request).await
    }

    async fn create_return(
        &self,
        request: &CreateReturnRequest,
    ) -> Result<ReturnReceipt, ApiError> {
        (**self).create_return(request).await
    }

    async fn register_tenant(
        &self,
        request: &RegisterTenantRequest,
    ) -> Result<TenantRecord, ApiError> {
        (**self).register_tenant(request).await
    }

    async fn list_returns(&self, shop_email: &Email) -> Result<Vec<ReturnOverview>, ApiError> {
        (**self).list_returns(shop_email).await
    }

    async fn login(&self, request: &LoginRequest) -> Result<LoginResponse, ApiError> {
        (**self).login(request).await
    }
}

#[cfg(test)]
pub(crate) mod stub {
    //! A scripted [`PortalApi`] double for workflow unit tests.

    use std::collections::VecDeque;
    use std::sync::Mutex;
    use std::sync::atomic::{AtomicUsize, Ordering};

    use super::*;

    /// Queue-backed stub: each operation pops its next scripted result and
    /// counts how often it was invoked.
    #[derive(Default)]
    pub struct StubPortalApi {
        pub search_results: Mutex<VecDeque<Result<OrderSnapshot, ApiError>>>,
        pub create_results: Mutex<VecDeque<Result<ReturnReceipt, ApiError>>>,
        pub register_results: Mutex<VecDeque<Result<TenantRecord, ApiError>>>,
        pub list_results: Mutex<VecDeque<Result<Vec<ReturnOverview>, ApiError>>>,
        pub login_results: Mutex<VecDeque<Result<LoginResponse, ApiError>>>,
        pub search_calls: AtomicUsize,
        pub create_calls: AtomicUsize,
        pub register_calls: AtomicUsize,
        pub list_calls: AtomicUsize,
        pub login_calls: AtomicUsize,
        /// The last request body each mutating operation saw.
        pub last_create_request: Mutex<Option<CreateReturnRequest>>,
        pub last_register_request: Mutex<Option<RegisterTenantRequest>>,
    }

    impl StubPortalApi {
        pub fn new() -> Self {
            Self::default()
        }

        fn pop<T>(queue: &Mutex<VecDeque<Result<T, ApiError>>>, op: &str) -> Result<T, ApiError> {
            queue
                .lock()
                .expect("stub mutex poisoned")
                .pop_front()
                .unwrap_or_else(|| panic!("no scripted result for {op}"))
        }
    }

    #[async_trait]
    impl PortalApi for StubPortalApi {
        async fn search_order(
            &self,
            _request: &OrderLookupRequest,
        ) -> Result<OrderSnapshot, ApiError> {
            self.search_calls.fetch_add(1, Ordering::SeqCst);
            Self::pop(&self.search_results, "search_order")
        }

        async fn create_return(
            &self,
            request: &CreateReturnRequest,
        ) -> Result<ReturnReceipt, ApiError> {
            self.create_calls.fetch_add(1, Ordering::SeqCst);
            *self.last_create_request.lock().expect("stub mutex poisoned") =
                Some(request.clone());
            Self::pop(&self.create_results, "create_return")
        }

        async fn register_tenant(
            &self,
            request: &RegisterTenantRequest,
        ) -> Result<TenantRecord, ApiError> {
            self.register_calls.fetch_add(1, Ordering::SeqCst);
            *self
                .last_register_request
                .lock()
                .expect("stub mutex poisoned") = Some(request.clone());
            Self::pop(&self.register_results, "register_tenant")
        }

        async fn list_returns(&self, _shop_email: &Email) -> Result<Vec<ReturnOverview>, ApiError> {
            self.list_calls.fetch_add(1, Ordering::SeqCst);
            Self::pop(&self.list_results, "list_returns")
        }

        async fn login(&self, _request: &LoginRequest) -> Result<LoginResponse, ApiError> {
            self.login_calls.fetch_add(1, Ordering::SeqCst);
            Self::pop(&self.login_results, "login")
        }
    }
}
