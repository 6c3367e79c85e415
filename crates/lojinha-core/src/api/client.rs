//! API client for communicating with the lojinha store REST API.
//!
//! This module provides the `ApiClient` struct for making authenticated
//! requests for products, users, and orders. The auth credential is read
//! from the `TokenStore` on every request - never cached in memory - so a
//! login or logout takes effect on the very next call.

use std::time::Duration;

use reqwest::{header::HeaderMap, Client, StatusCode};
use serde::{de::DeserializeOwned, Serialize};
use tracing::{debug, warn};

use crate::auth::TokenStore;
use crate::models::{LoginRequest, LoginResponse, Order, Product, RegisterRequest, User};

use super::ApiError;

/// HTTP request timeout in milliseconds.
/// The only bound on request lifetime - there is no cancellation mechanism.
const REQUEST_TIMEOUT_MS: u64 = 10_000;

/// A successful response: status, headers, and the decoded body.
#[derive(Debug)]
pub struct ApiResponse<T> {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: T,
}

/// API client for the store server.
/// Clone is cheap - reqwest::Client uses Arc internally for connection pooling.
#[derive(Clone)]
pub struct ApiClient {
    client: Client,
    base_url: String,
    store: TokenStore,
}

impl ApiClient {
    /// Create a new API client against `base_url`, reading credentials
    /// from `store`.
    pub fn new(base_url: impl Into<String>, store: TokenStore) -> Result<Self, ApiError> {
        let client = Client::builder()
            .timeout(Duration::from_millis(REQUEST_TIMEOUT_MS))
            .build()
            .map_err(ApiError::Network)?;

        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            store,
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    // ===== Generic verbs =====

    pub async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<ApiResponse<T>, ApiError> {
        let response = self.dispatch(self.client.get(self.url(path))).await?;
        Self::decode(response)
    }

    pub async fn post<T: DeserializeOwned, B: Serialize>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<ApiResponse<T>, ApiError> {
        let response = self
            .dispatch(self.client.post(self.url(path)).json(body))
            .await?;
        Self::decode(response)
    }

    pub async fn put<T: DeserializeOwned, B: Serialize>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<ApiResponse<T>, ApiError> {
        let response = self
            .dispatch(self.client.put(self.url(path)).json(body))
            .await?;
        Self::decode(response)
    }

    pub async fn patch<T: DeserializeOwned, B: Serialize>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<ApiResponse<T>, ApiError> {
        let response = self
            .dispatch(self.client.patch(self.url(path)).json(body))
            .await?;
        Self::decode(response)
    }

    pub async fn delete<T: DeserializeOwned>(
        &self,
        path: &str,
    ) -> Result<ApiResponse<T>, ApiError> {
        let response = self.dispatch(self.client.delete(self.url(path))).await?;
        Self::decode(response)
    }

    /// Send a request with the stored credential attached, applying the
    /// global 401 policy. Returns the raw body text on success.
    async fn dispatch(
        &self,
        mut request: reqwest::RequestBuilder,
    ) -> Result<ApiResponse<String>, ApiError> {
        // Per-request read: a token cleared elsewhere must not be sent again
        let token = match self.store.get().await {
            Ok(token) => token,
            Err(e) => {
                warn!(error = %e, "token store read failed, sending without credential");
                None
            }
        };
        if let Some(ref token) = token {
            request = request.bearer_auth(token);
        }

        let response = request.send().await.map_err(ApiError::from_reqwest)?;
        let status = response.status();
        let headers = response.headers().clone();

        if status == StatusCode::UNAUTHORIZED {
            // Global policy: drop the rejected credential before the error
            // surfaces. A token set by a concurrent login survives.
            let cleared = match token {
                Some(ref sent) => self.store.clear_if(sent).await,
                None => self.store.clear().await,
            };
            if let Err(e) = cleared {
                warn!(error = %e, "failed to clear rejected token");
            }
            let body = response.text().await.unwrap_or_default();
            return Err(ApiError::from_status(status, &body));
        }

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            debug!(status = %status, "request failed");
            return Err(ApiError::from_status(status, &body));
        }

        let body = response.text().await.map_err(ApiError::from_reqwest)?;
        Ok(ApiResponse {
            status,
            headers,
            body,
        })
    }

    fn decode<T: DeserializeOwned>(response: ApiResponse<String>) -> Result<ApiResponse<T>, ApiError> {
        let body = serde_json::from_str(&response.body)
            .map_err(|e| ApiError::InvalidResponse(e.to_string()))?;
        Ok(ApiResponse {
            status: response.status,
            headers: response.headers,
            body,
        })
    }

    // ===== Typed endpoints =====

    /// Authenticate and return the issued token.
    /// Persisting it is the session manager's job, not the dispatcher's.
    pub async fn login(&self, email: &str, password: &str) -> Result<LoginResponse, ApiError> {
        let request = LoginRequest {
            email: email.to_string(),
            password: password.to_string(),
        };
        Ok(self.post("/api/login", &request).await?.body)
    }

    /// Create a new user account.
    pub async fn register(&self, request: &RegisterRequest) -> Result<(), ApiError> {
        self.dispatch(self.client.post(self.url("/api/user")).json(request))
            .await?;
        Ok(())
    }

    /// Fetch a user profile by id.
    pub async fn fetch_user(&self, user_id: &str) -> Result<User, ApiError> {
        Ok(self.get(&format!("/api/user/{user_id}")).await?.body)
    }

    /// Fetch the public product catalog.
    pub async fn fetch_products(&self) -> Result<Vec<Product>, ApiError> {
        let mut products: Vec<Product> = self.get("/api/public/products").await?.body;
        for product in &mut products {
            product.ensure_image();
        }
        Ok(products)
    }

    /// Fetch a single product by id.
    pub async fn fetch_product(&self, product_id: &str) -> Result<Product, ApiError> {
        let mut product: Product = self.get(&format!("/api/product/{product_id}")).await?.body;
        product.ensure_image();
        Ok(product)
    }

    /// Fetch the authenticated user's order history.
    pub async fn fetch_orders(&self) -> Result<Vec<Order>, ApiError> {
        Ok(self.get("/api/orders").await?.body)
    }
}
