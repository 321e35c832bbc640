//! Directory client: capability trait and reqwest-based HTTP implementation.
//!
//! The [`DirectoryClient`] trait is the seam between the reconciliation core
//! and the wire; tests substitute in-memory implementations, production uses
//! [`HttpDirectoryClient`] against the directory's HTTP API.

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::de::DeserializeOwned;
use tracing::debug;

use crate::config::DirectoryConfig;
use crate::error::{DirectoryError, DirectoryResult};
use crate::types::{Alias, AliasHandle, AliasListing, AliasRequest, AuthMounts, Entity, Envelope};

/// Primitive operations the identity directory exposes.
///
/// Each call is a single request/response exchange; any call may fail with a
/// [`DirectoryError`]. Implementations must not retry internally.
#[async_trait]
pub trait DirectoryClient: Send + Sync {
    /// Read a canonical entity by its human-readable name.
    async fn read_entity_by_name(&self, name: &str) -> DirectoryResult<Entity>;

    /// Read an alias by its remote-assigned id.
    async fn read_alias(&self, alias_id: &str) -> DirectoryResult<Alias>;

    /// List all aliases (`keys` in listing order plus per-id attributes).
    ///
    /// The directory answers 404 when no aliases exist, surfaced here as
    /// [`DirectoryError::NotFound`]; callers decide whether that means
    /// "empty" in their context.
    async fn list_aliases(&self) -> DirectoryResult<AliasListing>;

    /// Create an alias, or update one the directory considers equivalent.
    ///
    /// Returns the `{id, canonical_id}` handle when the directory includes
    /// one in its response.
    async fn create_alias(&self, request: &AliasRequest) -> DirectoryResult<Option<AliasHandle>>;

    /// Update the alias with the given id.
    async fn update_alias(
        &self,
        alias_id: &str,
        request: &AliasRequest,
    ) -> DirectoryResult<Option<AliasHandle>>;

    /// Delete the alias with the given id. Deleting an id that does not
    /// exist is a directory-side no-op.
    async fn delete_alias(&self, alias_id: &str) -> DirectoryResult<()>;

    /// Read the mounted auth backends, keyed by mount path.
    async fn read_auth_mounts(&self) -> DirectoryResult<AuthMounts>;
}

/// HTTP implementation of [`DirectoryClient`].
///
/// Speaks the directory's v1 API with token authentication. Every response
/// payload arrives wrapped in a `{"data": ...}` envelope.
#[derive(Debug, Clone)]
pub struct HttpDirectoryClient {
    base_url: String,
    token: String,
    http_client: Client,
}

impl HttpDirectoryClient {
    /// Build a client from a validated [`DirectoryConfig`].
    pub fn from_config(config: &DirectoryConfig) -> DirectoryResult<Self> {
        config.validate()?;

        let http_client = Client::builder()
            .timeout(config.timeout())
            .danger_accept_invalid_certs(!config.tls_verify)
            .user_agent(concat!("idalias/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| {
                DirectoryError::invalid_config(format!("failed to build HTTP client: {e}"))
            })?;

        Ok(Self {
            base_url: config.address.trim_end_matches('/').to_string(),
            token: config.token.clone(),
            http_client,
        })
    }

    /// Create a client with a pre-built `reqwest::Client` (for testing).
    #[must_use]
    pub fn with_http_client(base_url: String, token: String, http_client: Client) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            token,
            http_client,
        }
    }

    /// Get the base URL.
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}/v1/{}", self.base_url, path)
    }

    // ── Internal HTTP methods ─────────────────────────────────────────

    async fn get<T: DeserializeOwned>(&self, path: &str) -> DirectoryResult<T> {
        debug!("directory GET {}", path);
        let response = self
            .http_client
            .get(self.url(path))
            .header("X-Vault-Token", &self.token)
            .send()
            .await?;
        Self::handle_response(path, response).await
    }

    async fn get_list<T: DeserializeOwned>(&self, path: &str) -> DirectoryResult<T> {
        debug!("directory LIST {}", path);
        let response = self
            .http_client
            .get(self.url(path))
            .query(&[("list", "true")])
            .header("X-Vault-Token", &self.token)
            .send()
            .await?;
        Self::handle_response(path, response).await
    }

    /// POST a mutation. The directory answers either `200` with a `data`
    /// envelope or `204 No Content`.
    async fn post_mutation<T: DeserializeOwned>(
        &self,
        path: &str,
        body: &AliasRequest,
    ) -> DirectoryResult<Option<T>> {
        debug!("directory POST {}", path);
        let response = self
            .http_client
            .post(self.url(path))
            .header("X-Vault-Token", &self.token)
            .json(body)
            .send()
            .await?;

        let status = response.status();
        if status == StatusCode::NO_CONTENT {
            return Ok(None);
        }
        if status.is_success() {
            let envelope: Envelope<T> = Self::decode_body(response).await?;
            return Ok(Some(envelope.data));
        }
        Err(Self::error_from_response(path, response).await)
    }

    async fn delete(&self, path: &str) -> DirectoryResult<()> {
        debug!("directory DELETE {}", path);
        let response = self
            .http_client
            .delete(self.url(path))
            .header("X-Vault-Token", &self.token)
            .send()
            .await?;

        if response.status().is_success() {
            Ok(())
        } else {
            Err(Self::error_from_response(path, response).await)
        }
    }

    // ── Response handling ─────────────────────────────────────────────

    async fn handle_response<T: DeserializeOwned>(
        path: &str,
        response: reqwest::Response,
    ) -> DirectoryResult<T> {
        if response.status().is_success() {
            let envelope: Envelope<T> = Self::decode_body(response).await?;
            Ok(envelope.data)
        } else {
            Err(Self::error_from_response(path, response).await)
        }
    }

    async fn decode_body<T: DeserializeOwned>(response: reqwest::Response) -> DirectoryResult<T> {
        let body = response.text().await?;
        serde_json::from_str(&body)
            .map_err(|e| DirectoryError::parse(format!("failed to decode response: {e}")))
    }

    async fn error_from_response(path: &str, response: reqwest::Response) -> DirectoryError {
        let status = response.status();
        let body = response.text().await.unwrap_or_default();
        let detail = extract_error_detail(&body, status);

        match status {
            StatusCode::NOT_FOUND => DirectoryError::NotFound {
                path: path.to_string(),
            },
            StatusCode::FORBIDDEN => DirectoryError::PermissionDenied { message: detail },
            StatusCode::UNAUTHORIZED => DirectoryError::AuthFailed { message: detail },
            _ => DirectoryError::ServiceError {
                status: status.as_u16(),
                detail,
            },
        }
    }
}

/// Pull the human-readable message out of the directory's standard
/// `{"errors": [...]}` error body, falling back to the raw body.
fn extract_error_detail(body: &str, status: StatusCode) -> String {
    #[derive(serde::Deserialize)]
    struct ErrorBody {
        errors: Vec<String>,
    }

    if let Ok(parsed) = serde_json::from_str::<ErrorBody>(body) {
        if !parsed.errors.is_empty() {
            return parsed.errors.join("; ");
        }
    }
    if body.is_empty() {
        format!("HTTP {status}")
    } else {
        body.to_string()
    }
}

#[async_trait]
impl DirectoryClient for HttpDirectoryClient {
    async fn read_entity_by_name(&self, name: &str) -> DirectoryResult<Entity> {
        self.get(&format!("identity/entity/name/{name}")).await
    }

    async fn read_alias(&self, alias_id: &str) -> DirectoryResult<Alias> {
        self.get(&format!("identity/entity-alias/id/{alias_id}"))
            .await
    }

    async fn list_aliases(&self) -> DirectoryResult<AliasListing> {
        self.get_list("identity/entity-alias/id").await
    }

    async fn create_alias(&self, request: &AliasRequest) -> DirectoryResult<Option<AliasHandle>> {
        self.post_mutation("identity/entity-alias", request).await
    }

    async fn update_alias(
        &self,
        alias_id: &str,
        request: &AliasRequest,
    ) -> DirectoryResult<Option<AliasHandle>> {
        self.post_mutation(&format!("identity/entity-alias/id/{alias_id}"), request)
            .await
    }

    async fn delete_alias(&self, alias_id: &str) -> DirectoryResult<()> {
        self.delete(&format!("identity/entity-alias/id/{alias_id}"))
            .await
    }

    async fn read_auth_mounts(&self) -> DirectoryResult<AuthMounts> {
        self.get("sys/auth").await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base_url_trailing_slash_stripped() {
        let client = HttpDirectoryClient::with_http_client(
            "http://127.0.0.1:8200/".to_string(),
            "s.token".to_string(),
            Client::new(),
        );
        assert_eq!(client.base_url(), "http://127.0.0.1:8200");
        assert_eq!(
            client.url("sys/auth"),
            "http://127.0.0.1:8200/v1/sys/auth"
        );
    }

    #[test]
    fn test_extract_error_detail_joins_errors() {
        let detail = extract_error_detail(
            r#"{"errors": ["permission denied", "token expired"]}"#,
            StatusCode::FORBIDDEN,
        );
        assert_eq!(detail, "permission denied; token expired");
    }

    #[test]
    fn test_extract_error_detail_falls_back_to_body() {
        let detail = extract_error_detail("sealed", StatusCode::SERVICE_UNAVAILABLE);
        assert_eq!(detail, "sealed");

        let detail = extract_error_detail("", StatusCode::BAD_GATEWAY);
        assert_eq!(detail, "HTTP 502 Bad Gateway");
    }
}
