//! HTTP adapter for the accounting backend.
//!
//! | Operation | Request |
//! |-----------|---------|
//! | Trigger accounts sync | `POST {api}/sync/chart-of-accounts` |
//! | Fetch accounts | `GET {api}/chart-of-accounts` |
//! | Trigger contacts sync | `POST {api}/sync/contacts` |
//! | Fetch contacts | `GET {api}/contacts` |
//! | Create expense | `POST {api}/expenses` |
//!
//! Receipts have no listing endpoint: their trigger is acknowledged locally
//! and their fetch reports `Unchanged`.

use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue, ACCEPT, COOKIE};
use reqwest::{Client, RequestBuilder};
use serde::de::DeserializeOwned;
use shared_types::{GatewayError, ResourceKey};
use std::time::Duration;
use tracing::debug;

use ed_02_resource_sync::{messages, RemoteCollection, SyncAck, SyncGateway};
use ed_03_expense_submission::{ExpenseDraft, ExpenseGateway};

use super::wire::{
    parse_body, parse_optional_body, remote_error, transport_error, AccountsBody, ContactsBody,
    MessageBody,
};
use crate::container::{BackendConfig, ConfigError};

/// Build the shared client: JSON accept header, XHR marker, session cookie.
pub(crate) fn build_client(config: &BackendConfig) -> Result<Client, ConfigError> {
    let mut headers = HeaderMap::new();
    headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
    headers.insert(
        HeaderName::from_static("x-requested-with"),
        HeaderValue::from_static("XMLHttpRequest"),
    );
    if let Some(cookie) = &config.session_cookie {
        let value = HeaderValue::from_str(cookie).map_err(|_| ConfigError::InvalidCookie)?;
        headers.insert(COOKIE, value);
    }

    Client::builder()
        .default_headers(headers)
        .timeout(config.request_timeout())
        .connect_timeout(Duration::from_secs(5))
        .build()
        .map_err(|e| ConfigError::HttpClient(e.to_string()))
}

/// Send a request; non-2xx statuses become `GatewayError::Remote`.
pub(crate) async fn send(request: RequestBuilder) -> Result<String, GatewayError> {
    let response = request.send().await.map_err(transport_error)?;
    let status = response.status();
    let body = response.text().await.map_err(transport_error)?;

    if !status.is_success() {
        return Err(remote_error(status.as_u16(), &body));
    }
    Ok(body)
}

/// Accounting backend over HTTP.
pub struct HttpBackend {
    client: Client,
    api_base: String,
}

impl HttpBackend {
    /// Create an adapter for `config`.
    pub fn new(config: &BackendConfig) -> Result<Self, ConfigError> {
        Ok(Self {
            client: build_client(config)?,
            api_base: config.api_base(),
        })
    }

    /// Absolute URL of an API path.
    pub fn url(&self, path: &str) -> String {
        format!("{}/{}", self.api_base, path)
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, GatewayError> {
        debug!("GET {}", path);
        let body = send(self.client.get(self.url(path))).await?;
        parse_body(&body)
    }

    async fn post_sync(&self, path: &str) -> Result<SyncAck, GatewayError> {
        debug!("POST {}", path);
        let body = send(self.client.post(self.url(path))).await?;
        let body: MessageBody = parse_optional_body(&body)?;
        Ok(SyncAck {
            message: body.message,
        })
    }
}

#[async_trait]
impl SyncGateway for HttpBackend {
    async fn trigger_sync(&self, resource: ResourceKey) -> Result<SyncAck, GatewayError> {
        match resource {
            ResourceKey::ChartOfAccounts => self.post_sync("sync/chart-of-accounts").await,
            ResourceKey::Contacts => self.post_sync("sync/contacts").await,
            ResourceKey::Receipts => Ok(SyncAck::with_message(messages::synced(resource))),
        }
    }

    async fn fetch_collection(
        &self,
        resource: ResourceKey,
    ) -> Result<RemoteCollection, GatewayError> {
        match resource {
            ResourceKey::ChartOfAccounts => {
                let body: AccountsBody = self.get_json("chart-of-accounts").await?;
                Ok(RemoteCollection::Accounts(
                    body.chartofaccounts.unwrap_or_default(),
                ))
            }
            ResourceKey::Contacts => {
                let body: ContactsBody = self.get_json("contacts").await?;
                Ok(RemoteCollection::Contacts(body.contacts.unwrap_or_default()))
            }
            ResourceKey::Receipts => Ok(RemoteCollection::Unchanged),
        }
    }
}

#[async_trait]
impl ExpenseGateway for HttpBackend {
    async fn create_expense(&self, draft: &ExpenseDraft) -> Result<(), GatewayError> {
        debug!("POST expenses");
        send(self.client.post(self.url("expenses")).json(draft)).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_urls() {
        let backend = HttpBackend::new(&BackendConfig::default()).unwrap();
        assert_eq!(
            backend.url("sync/chart-of-accounts"),
            "http://localhost:8000/api/zoho/sync/chart-of-accounts"
        );
    }

    #[test]
    fn test_bad_cookie_rejected() {
        let config = BackendConfig {
            session_cookie: Some("session=abc\n".to_string()),
            ..BackendConfig::default()
        };
        assert!(matches!(
            HttpBackend::new(&config),
            Err(ConfigError::InvalidCookie)
        ));
    }

    #[tokio::test]
    async fn test_receipts_are_acknowledged_locally() {
        let backend = HttpBackend::new(&BackendConfig::default()).unwrap();
        let ack = backend.trigger_sync(ResourceKey::Receipts).await.unwrap();
        assert_eq!(ack.message.as_deref(), Some("Receipts synced successfully!"));
        assert_eq!(
            backend.fetch_collection(ResourceKey::Receipts).await.unwrap(),
            RemoteCollection::Unchanged
        );
    }

    #[tokio::test]
    async fn test_unreachable_backend_is_network_failure() {
        let config = BackendConfig {
            base_url: "http://127.0.0.1:9".to_string(),
            request_timeout_secs: 2,
            ..BackendConfig::default()
        };
        let backend = HttpBackend::new(&config).unwrap();
        let err = backend
            .fetch_collection(ResourceKey::Contacts)
            .await
            .unwrap_err();
        assert!(matches!(err, GatewayError::Network(_)));
    }
}
