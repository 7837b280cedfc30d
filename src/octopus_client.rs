use crate::credentials::Credentials;
use crate::decode::decode_body;
use crate::models::{Account, MeterPoint};
use crate::transport::Transport;
use reqwest::header::{HeaderValue, AUTHORIZATION};
use reqwest::{Method, Request, Url};
use serde::de::DeserializeOwned;
use std::time::Duration;

/// Client for the Octopus Energy metering and account API.
///
/// Every lookup issues exactly one authenticated GET. The client is not
/// mutated after construction, so it can be shared across tasks as long as
/// the transport can.
#[derive(Debug, Clone)]
pub struct OctopusClient<T = reqwest::Client> {
    credentials: Credentials,
    base_url: String,
    transport: T,
}

impl<T: Transport> OctopusClient<T> {
    /// Creates a new `OctopusClient`.
    ///
    /// # Arguments
    ///
    /// * `api_key` - The Octopus API key.
    /// * `base_url` - The API root, e.g. `https://api.octopus.energy/v1`.
    /// * `transport` - Executes the prepared requests.
    pub fn new(api_key: impl Into<String>, base_url: impl Into<String>, transport: T) -> Self {
        Self {
            credentials: Credentials::new(api_key),
            base_url: base_url.into(),
            transport,
        }
    }

    /// Looks up an electricity meter point.
    ///
    /// # Arguments
    ///
    /// * `mpan` - The Meter Point Administration Number.
    ///
    /// # Returns
    ///
    /// * `anyhow::Result<MeterPoint>` - The meter point, or the request,
    ///   transport or decode error.
    pub async fn electricity_meter_point(&self, mpan: &str) -> anyhow::Result<MeterPoint> {
        tracing::info!("Looking up electricity meter point {}", mpan);
        self.get(&format!("electricity-meter-points/{}/", mpan)).await
    }

    /// Looks up an account with its properties, meter points, meters and
    /// agreements.
    ///
    /// # Arguments
    ///
    /// * `account_number` - The account number, e.g. `A-93DD6C62`.
    ///
    /// # Returns
    ///
    /// * `anyhow::Result<Account>` - The account, or the request, transport or
    ///   decode error.
    pub async fn account(&self, account_number: &str) -> anyhow::Result<Account> {
        tracing::info!("Looking up account {}", account_number);
        self.get(&format!("accounts/{}/", account_number)).await
    }

    pub fn credentials(&self) -> &Credentials {
        &self.credentials
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Builds the authenticated GET request for `{base_url}/{resource}`.
    pub fn build_request(&self, resource: &str) -> anyhow::Result<Request> {
        let url = Url::parse(&format!("{}/{}", self.base_url, resource))?;
        tracing::debug!("Octopus request URL: {}", url);

        let mut request = Request::new(Method::GET, url);
        let mut auth = HeaderValue::from_str(&self.credentials.authorization_header())?;
        auth.set_sensitive(true);
        request.headers_mut().insert(AUTHORIZATION, auth);

        Ok(request)
    }

    async fn get<R: DeserializeOwned>(&self, resource: &str) -> anyhow::Result<R> {
        let request = self.build_request(resource)?;
        let response = self.transport.execute(request).await?;

        if !response.status.is_success() {
            tracing::warn!(
                "Octopus returned {} for {}; decoding body anyway",
                response.status,
                resource
            );
        }
        tracing::debug!(
            "Decoding {} byte response for {}",
            response.body.len(),
            resource
        );

        decode_body(&response.body)
    }
}

impl OctopusClient<reqwest::Client> {
    /// Creates a client backed by a `reqwest::Client` with a 30 second timeout.
    pub fn with_reqwest(
        api_key: impl Into<String>,
        base_url: impl Into<String>,
    ) -> anyhow::Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(30))
            .build()?;

        Ok(Self::new(api_key, base_url, client))
    }
}
