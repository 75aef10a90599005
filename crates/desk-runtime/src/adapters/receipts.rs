//! Receipt gateways.
//!
//! The backend may not expose receipt storage yet. Without a configured
//! endpoint the placeholder accepts uploads and deletes without sending
//! anything, so receipts live only in the local collection.

use async_trait::async_trait;
use reqwest::multipart::{Form, Part};
use reqwest::{Client, Url};
use shared_types::GatewayError;
use tracing::debug;

use ed_04_receipt_lifecycle::{ReceiptGateway, ReceiptUpload, FILE_PART};

use super::http_backend::{build_client, send};
use crate::container::{BackendConfig, ConfigError};

/// Multipart upload to a receipt endpoint; deletes go to `{endpoint}/{id}`.
pub struct HttpReceipts {
    client: Client,
    endpoint: Url,
}

impl HttpReceipts {
    /// Create an adapter posting to `endpoint`.
    pub fn new(config: &BackendConfig, endpoint: impl Into<String>) -> Result<Self, ConfigError> {
        let raw = endpoint.into();
        let endpoint = Url::parse(raw.trim_end_matches('/')).map_err(|_| ConfigError::InvalidUrl {
            var: "DESK_RECEIPTS_ENDPOINT",
            value: raw.clone(),
        })?;
        Ok(Self {
            client: build_client(config)?,
            endpoint,
        })
    }

    /// `{endpoint}/{id}` with `id` percent-encoded as one path segment.
    fn receipt_url(&self, id: &str) -> Result<Url, GatewayError> {
        let mut url = self.endpoint.clone();
        url.path_segments_mut()
            .map_err(|_| GatewayError::Malformed(format!("{} cannot take a path", self.endpoint)))?
            .pop_if_empty()
            .push(id);
        Ok(url)
    }

    fn form(upload: &ReceiptUpload) -> Result<Form, GatewayError> {
        let file = Part::bytes(upload.file.bytes.clone())
            .file_name(upload.file.filename.clone())
            .mime_str(&upload.file.content_type)
            .map_err(|e| GatewayError::Malformed(format!("content type: {}", e)))?;

        let form = upload
            .text_parts()
            .into_iter()
            .fold(Form::new().part(FILE_PART, file), |form, (name, value)| {
                form.text(name, value.to_string())
            });
        Ok(form)
    }
}

#[async_trait]
impl ReceiptGateway for HttpReceipts {
    async fn upload_receipt(&self, upload: &ReceiptUpload) -> Result<(), GatewayError> {
        debug!("POST {} ({})", self.endpoint, upload.file.filename);
        let form = Self::form(upload)?;
        send(self.client.post(self.endpoint.clone()).multipart(form)).await?;
        Ok(())
    }

    async fn delete_receipt(&self, id: &str) -> Result<(), GatewayError> {
        let url = self.receipt_url(id)?;
        debug!("DELETE {}", url);
        send(self.client.delete(url)).await?;
        Ok(())
    }
}

/// Accepts everything without a network call.
#[derive(Debug, Default)]
pub struct PlaceholderReceipts;

#[async_trait]
impl ReceiptGateway for PlaceholderReceipts {
    async fn upload_receipt(&self, upload: &ReceiptUpload) -> Result<(), GatewayError> {
        debug!("Receipt {} kept locally (no receipt endpoint)", upload.file.filename);
        Ok(())
    }

    async fn delete_receipt(&self, id: &str) -> Result<(), GatewayError> {
        debug!("Receipt {} removed locally (no receipt endpoint)", id);
        Ok(())
    }
}

/// Receipt gateway chosen from configuration.
pub enum ReceiptBackend {
    /// A real endpoint.
    Http(HttpReceipts),
    /// Local-only receipts.
    Placeholder(PlaceholderReceipts),
}

impl ReceiptBackend {
    /// `Http` when `receipts_endpoint` is set, else `Placeholder`.
    pub fn from_config(config: &BackendConfig) -> Result<Self, ConfigError> {
        match &config.receipts_endpoint {
            Some(endpoint) => Ok(Self::Http(HttpReceipts::new(config, endpoint.as_str())?)),
            None => Ok(Self::Placeholder(PlaceholderReceipts)),
        }
    }

    /// Whether uploads only live locally.
    pub fn is_placeholder(&self) -> bool {
        matches!(self, Self::Placeholder(_))
    }
}

#[async_trait]
impl ReceiptGateway for ReceiptBackend {
    async fn upload_receipt(&self, upload: &ReceiptUpload) -> Result<(), GatewayError> {
        match self {
            Self::Http(gateway) => gateway.upload_receipt(upload).await,
            Self::Placeholder(gateway) => gateway.upload_receipt(upload).await,
        }
    }

    async fn delete_receipt(&self, id: &str) -> Result<(), GatewayError> {
        match self {
            Self::Http(gateway) => gateway.delete_receipt(id).await,
            Self::Placeholder(gateway) => gateway.delete_receipt(id).await,
        }
    }
}
