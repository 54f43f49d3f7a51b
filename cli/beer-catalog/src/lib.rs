//! HTTP client and data model for the beer catalog API.
//!
//! This crate provides:
//! - The catalog data model ([`Beer`], [`FetchResult`], [`PageNumber`])
//! - An HTTP client that fetches a single page of search results
//! - A mock client with queued responses for tests and offline use
//! - Sample data for tests (feature-gated)
//!
//! ## Usage
//!
//! ```ignore
//! use beer_catalog::{CatalogClient, CatalogClientConfig, ClientTrait, PageNumber};
//!
//! let client = CatalogClient::new(CatalogClientConfig::new("http://localhost:8080"))?;
//! let page = client.fetch_page("Ale", PageNumber::FIRST).await?;
//! ```

mod client;
mod config;
mod error;
mod mock;
mod types;

#[cfg(any(test, feature = "tests"))]
pub mod fixtures;

pub use client::{CatalogClient, Client, ClientTrait};
pub use config::CatalogClientConfig;
pub use error::{CatalogClientError, MockDataError, display_chain};
pub use mock::{BEERS_CATALOG_MOCK_DATA_VAR, MockClient, MockResponse};
pub use types::{Beer, FetchError, FetchResult, PageNumber};
