use std::collections::BTreeMap;
use std::time::Duration;

use ssc_core::Identifier;

use crate::error::BackendError;
use crate::xmlrpc::{self, Value};

/// Attribute holding the subscriber's CPE MAC address.
pub const MAC_ADDRESS: &str = "mac-address";

/// Method called when none is configured.
pub const DEFAULT_METHOD: &str = "subscriber.lookup";

/// Per-request timeout when none is configured.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(5);

/// Line binding returned by the provisioning server.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProvisioningRecord {
    attributes: BTreeMap<String, String>,
}

impl ProvisioningRecord {
    pub fn new(attributes: BTreeMap<String, String>) -> Self {
        Self { attributes }
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.attributes.get(name).map(String::as_str)
    }

    pub fn mac_address(&self) -> Option<&str> {
        self.get(MAC_ADDRESS)
    }

    pub fn attributes(&self) -> &BTreeMap<String, String> {
        &self.attributes
    }

    /// Interpret a lookup result. An empty array or nil means no binding;
    /// otherwise the first struct carries the attributes.
    pub fn from_value(value: Value) -> Result<Option<Self>, BackendError> {
        let members = match value {
            Value::Nil => return Ok(None),
            Value::Array(items) => match items.into_iter().next() {
                None => return Ok(None),
                Some(Value::Struct(members)) => members,
                Some(other) => {
                    return Err(BackendError::malformed(format!(
                        "expected struct in lookup result, got {:?}",
                        other
                    )))
                }
            },
            Value::Struct(members) => members,
            other => {
                return Err(BackendError::malformed(format!(
                    "unexpected lookup result {:?}",
                    other
                )))
            }
        };

        let attributes = members
            .into_iter()
            .filter_map(|(name, value)| value.as_text().map(|text| (name, text)))
            .collect();
        Ok(Some(Self::new(attributes)))
    }
}

/// Looks up the line binding for a login.
pub trait ProvisioningClient: Send + Sync {
    fn lookup(
        &self,
        login: &Identifier,
    ) -> impl std::future::Future<Output = Result<Option<ProvisioningRecord>, BackendError>> + Send;
}

/// Provisioning server reached over XML-RPC.
pub struct XmlRpcProvisioningClient {
    client: reqwest::Client,
    url: String,
    method: String,
    timeout: Duration,
}

impl XmlRpcProvisioningClient {
    pub fn new(
        url: impl Into<String>,
        method: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self, BackendError> {
        let client = reqwest::Client::builder().build()?;
        Ok(Self::from_reqwest(url, method, client).with_timeout(timeout))
    }

    pub fn from_reqwest(
        url: impl Into<String>,
        method: impl Into<String>,
        client: reqwest::Client,
    ) -> Self {
        Self {
            client,
            url: url.into(),
            method: method.into(),
            timeout: DEFAULT_TIMEOUT,
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    fn request_error(&self, err: reqwest::Error) -> BackendError {
        if err.is_timeout() {
            BackendError::Timeout(self.timeout)
        } else {
            BackendError::Http(err)
        }
    }
}

impl ProvisioningClient for XmlRpcProvisioningClient {
    async fn lookup(&self, login: &Identifier) -> Result<Option<ProvisioningRecord>, BackendError> {
        let body = xmlrpc::method_call(&self.method, &[Value::String(login.to_string())]);
        tracing::debug!(method = %self.method, %login, "provisioning lookup");

        let response = self
            .client
            .post(&self.url)
            .header(reqwest::header::CONTENT_TYPE, "text/xml")
            .body(body)
            .timeout(self.timeout)
            .send()
            .await
            .map_err(|e| self.request_error(e))?;

        if !response.status().is_success() {
            return Err(BackendError::Status(response.status().as_u16()));
        }

        let text = response.text().await.map_err(|e| self.request_error(e))?;
        ProvisioningRecord::from_value(xmlrpc::parse_response(&text)?)
    }
}
