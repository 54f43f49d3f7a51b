//! Catalog client issuing single-page search requests.

use std::fmt::Debug;
use std::str::FromStr;

use enum_dispatch::enum_dispatch;
use reqwest::StatusCode;
use reqwest::header::{self, HeaderMap, HeaderValue};
use tracing::{debug, instrument};
use url::Url;

use crate::config::CatalogClientConfig;
use crate::error::CatalogClientError;
use crate::mock::MockClient;
use crate::types::{FetchResult, PageNumber};

/// Name of the request header announcing the expected response format.
///
/// Note that this is `accepts`, not the standard `accept`;
/// catalog servers key off this name.
const ACCEPTS_HEADER: &str = "accepts";
const JSON_CONTENT_TYPE: &str = "application/json";

/// The catalog API interface.
///
/// This trait enables alternate implementations:
/// - **HTTP**: GET requests against the catalog endpoint via [`CatalogClient`]
/// - **Mock**: canned responses without HTTP via [`MockClient`]
#[enum_dispatch]
#[allow(async_fn_in_trait)]
pub trait ClientTrait {
    /// Fetch one page of beers matching `query`.
    ///
    /// Every call issues exactly one request; there is no retry.
    async fn fetch_page(
        &self,
        query: &str,
        page: PageNumber,
    ) -> Result<FetchResult, CatalogClientError>;
}

/// Either a client for the actual catalog service,
/// or a mock client for testing.
#[derive(Debug)]
#[enum_dispatch(ClientTrait)]
pub enum Client {
    Catalog(CatalogClient),
    Mock(MockClient),
}

/// A client for the catalog service.
pub struct CatalogClient {
    http: reqwest::Client,
    endpoint: Url,
    config: CatalogClientConfig,
}

impl Debug for CatalogClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CatalogClient")
            .field("catalog_url", &self.config.catalog_url)
            .finish_non_exhaustive()
    }
}

impl CatalogClient {
    /// Create a new catalog client from configuration.
    pub fn new(config: CatalogClientConfig) -> Result<Self, CatalogClientError> {
        let endpoint =
            Url::parse(&config.catalog_url).map_err(|source| CatalogClientError::InvalidUrl {
                url: config.catalog_url.clone(),
                source,
            })?;
        let http = build_http_client(&config)?;

        Ok(Self {
            http,
            endpoint,
            config,
        })
    }

    /// Get the configured catalog URL.
    pub fn catalog_url(&self) -> &str {
        &self.config.catalog_url
    }

    /// The full request URL for a page of results.
    pub fn page_url(&self, query: &str, page: PageNumber) -> Url {
        let mut url = self.endpoint.clone();
        url.query_pairs_mut()
            .append_pair("query", query)
            .append_pair("page_nr", &page.to_string());
        url
    }
}

impl ClientTrait for CatalogClient {
    #[instrument(skip(self), fields(catalog_url = %self.config.catalog_url))]
    async fn fetch_page(
        &self,
        query: &str,
        page: PageNumber,
    ) -> Result<FetchResult, CatalogClientError> {
        let url = self.page_url(query, page);
        debug!(%url, "sending search request");

        let response = self
            .http
            .get(url)
            .header(ACCEPTS_HEADER, JSON_CONTENT_TYPE)
            .send()
            .await
            .map_err(CatalogClientError::Request)?;

        check_response(response.status(), response.headers())?;

        let body = response
            .bytes()
            .await
            .map_err(CatalogClientError::Request)?;
        let result: FetchResult =
            serde_json::from_slice(&body).map_err(CatalogClientError::Decode)?;

        debug!(
            n_beers = result.beers.len(),
            has_next_page = result.has_next_page,
            cached = result.cached,
            has_error = result.error.is_some(),
            "received search results"
        );

        Ok(result)
    }
}

/// Validate the response envelope before the body is read.
///
/// Checks run in a fixed order so the first violated expectation is the
/// one reported.
fn check_response(status: StatusCode, headers: &HeaderMap) -> Result<(), CatalogClientError> {
    if status != StatusCode::OK {
        return Err(CatalogClientError::BadStatus(status));
    }
    if !status.is_success() {
        return Err(CatalogClientError::NotOk(status));
    }

    let content_type = headers
        .get(header::CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .unwrap_or_default();
    if !content_type.contains(JSON_CONTENT_TYPE) {
        return Err(CatalogClientError::WrongContentType(content_type.to_string()));
    }

    Ok(())
}

/// Build the HTTP client with timeouts, user agent and extra headers.
fn build_http_client(config: &CatalogClientConfig) -> Result<reqwest::Client, CatalogClientError> {
    let mut headers = HeaderMap::new();

    for (key, value) in &config.extra_headers {
        headers.insert(
            header::HeaderName::from_str(key).map_err(
                |e: reqwest::header::InvalidHeaderName| CatalogClientError::Other(e.to_string()),
            )?,
            HeaderValue::from_str(value).map_err(|e: reqwest::header::InvalidHeaderValue| {
                CatalogClientError::Other(e.to_string())
            })?,
        );
    }

    debug!(
        catalog_url = %config.catalog_url,
        extra_headers = config.extra_headers.len(),
        connect_timeout = ?config.connect_timeout,
        request_timeout = ?config.request_timeout,
        "building catalog HTTP client"
    );

    let client_builder = reqwest::Client::builder()
        .default_headers(headers)
        .connect_timeout(config.connect_timeout)
        .timeout(config.request_timeout);

    let client_builder = if let Some(ref user_agent) = config.user_agent {
        client_builder.user_agent(user_agent)
    } else {
        client_builder
    };

    client_builder
        .build()
        .map_err(CatalogClientError::BuildClient)
}
