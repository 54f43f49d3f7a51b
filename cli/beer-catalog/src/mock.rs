//! A catalog client that answers from a queue of canned responses.

use std::collections::VecDeque;
use std::path::Path;
use std::sync::{Arc, Mutex};

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::client::ClientTrait;
use crate::error::{CatalogClientError, MockDataError};
use crate::types::{FetchResult, PageNumber};

/// If set to a path, the CLI answers searches from this file of
/// [MockResponse]s instead of contacting the catalog.
pub const BEERS_CATALOG_MOCK_DATA_VAR: &str = "BEERS_CATALOG_MOCK_DATA";

// Arc allows you to push things into the client from outside the client if necessary
// Mutex allows you to share across threads (necessary because of tokio)
type MockField<T> = Arc<Mutex<T>>;

/// A canned answer to a single `fetch_page` call.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum MockResponse {
    /// A page as the server would have sent it.
    Page(FetchResult),
    /// A failure before a page could be decoded.
    Failure { failure: String },
}

/// A catalog client that can be seeded with mock responses
#[derive(Debug, Default, Clone)]
pub struct MockClient {
    pub mock_responses: MockField<VecDeque<MockResponse>>,
    /// Every `(query, page)` this client was asked for, in order.
    pub requests: MockField<Vec<(String, PageNumber)>>,
}

impl MockClient {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a mock client answering with the responses stored in a JSON
    /// array at `path`.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, MockDataError> {
        let contents =
            std::fs::read_to_string(path.as_ref()).map_err(MockDataError::ReadMockFile)?;
        let responses: VecDeque<MockResponse> =
            serde_json::from_str(&contents).map_err(MockDataError::ParseJson)?;
        debug!(
            path = %path.as_ref().display(),
            n_responses = responses.len(),
            "read mock responses"
        );

        Ok(Self {
            mock_responses: Arc::new(Mutex::new(responses)),
            ..Self::default()
        })
    }

    /// Push a new page into the list of mock responses
    pub fn push_page(&mut self, page: FetchResult) {
        self.mock_responses
            .lock()
            .expect("couldn't acquire mock lock")
            .push_back(MockResponse::Page(page));
    }

    /// Push a failure into the list of mock responses
    pub fn push_failure(&mut self, message: impl Into<String>) {
        self.mock_responses
            .lock()
            .expect("couldn't acquire mock lock")
            .push_back(MockResponse::Failure {
                failure: message.into(),
            });
    }

    /// The requests received so far.
    pub fn requests(&self) -> Vec<(String, PageNumber)> {
        self.requests
            .lock()
            .expect("couldn't acquire mock lock")
            .clone()
    }
}

impl ClientTrait for MockClient {
    async fn fetch_page(
        &self,
        query: &str,
        page: PageNumber,
    ) -> Result<FetchResult, CatalogClientError> {
        self.requests
            .lock()
            .expect("couldn't acquire mock lock")
            .push((query.to_string(), page));

        let mock_resp = self
            .mock_responses
            .lock()
            .expect("couldn't acquire mock lock")
            .pop_front();
        match mock_resp {
            Some(MockResponse::Page(page)) => Ok(page),
            Some(MockResponse::Failure { failure }) => Err(CatalogClientError::Other(failure)),
            None => Err(CatalogClientError::Other(format!(
                "no mock response left for query '{query}' on page {page}"
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use pretty_assertions::assert_eq;

    use super::*;
    use crate::fixtures;

    #[tokio::test]
    async fn answers_in_order_and_records_requests() {
        let mut client = MockClient::new();
        client.push_page(fixtures::response_no_next_3());
        client.push_failure("Test error message...");

        let first = client.fetch_page("Ale", PageNumber::FIRST).await.unwrap();
        assert_eq!(first, fixtures::response_no_next_3());

        let second = client
            .fetch_page("Ale", PageNumber::new(2).unwrap())
            .await
            .unwrap_err();
        assert_eq!(second.to_string(), "Test error message...");

        assert_eq!(client.requests(), vec![
            ("Ale".to_string(), PageNumber::FIRST),
            ("Ale".to_string(), PageNumber::new(2).unwrap()),
        ]);
    }

    #[tokio::test]
    async fn clones_share_the_queue() {
        let mut client = MockClient::new();
        let observer = client.clone();
        client.push_page(FetchResult::empty());

        let _ = client.fetch_page("Ale", PageNumber::FIRST).await;
        assert_eq!(observer.requests().len(), 1);
    }

    #[tokio::test]
    async fn fails_when_exhausted() {
        let mut client = MockClient::new();
        client.push_page(fixtures::response_has_next_10());
        client.fetch_page("Ale", PageNumber::FIRST).await.unwrap();

        let err = client
            .fetch_page("Ale", PageNumber::new(2).unwrap())
            .await
            .unwrap_err();
        assert!(matches!(err, CatalogClientError::Other(_)));
        assert_eq!(
            err.to_string(),
            "no mock response left for query 'Ale' on page 2"
        );
        assert_eq!(client.requests().len(), 2);
    }

    #[tokio::test]
    async fn reads_responses_from_file() {
        let responses = vec![
            MockResponse::Page(fixtures::response_has_next_10()),
            MockResponse::Failure {
                failure: "offline".to_string(),
            },
        ];
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(serde_json::to_string(&responses).unwrap().as_bytes())
            .unwrap();

        let client = MockClient::from_file(file.path()).unwrap();
        let page = client.fetch_page("Ale", PageNumber::FIRST).await.unwrap();
        assert_eq!(page.beers.len(), 10);
        assert!(page.has_next_page);
        assert!(client.fetch_page("Ale", PageNumber::FIRST).await.is_err());
    }

    #[test]
    fn missing_file_is_reported() {
        let result = MockClient::from_file("/nonexistent/mock.json");
        assert!(matches!(result, Err(MockDataError::ReadMockFile(_))));
    }

    #[test]
    fn invalid_json_is_reported() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(b"{ not json").unwrap();
        let result = MockClient::from_file(file.path());
        assert!(matches!(result, Err(MockDataError::ParseJson(_))));
    }
}
