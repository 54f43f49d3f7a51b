//! Error handling for catalog API operations.

use reqwest::StatusCode;
use thiserror::Error;

/// Common error type for catalog API operations.
///
/// The three response validation failures are kept distinct so that the
/// message shown to the user says which check failed.
#[derive(Debug, Error)]
pub enum CatalogClientError {
    #[error("invalid catalog url '{url}'")]
    InvalidUrl {
        url: String,
        #[source]
        source: url::ParseError,
    },
    #[error("failed to build catalog HTTP client")]
    BuildClient(#[source] reqwest::Error),
    #[error("failed to reach the catalog")]
    Request(#[source] reqwest::Error),
    #[error("catalog responded with status {0}, expected 200 OK")]
    BadStatus(StatusCode),
    #[error("catalog response was not OK ({0})")]
    NotOk(StatusCode),
    #[error("catalog response is not JSON (content-type: '{0}')")]
    WrongContentType(String),
    #[error("failed to decode catalog response")]
    Decode(#[source] serde_json::Error),
    #[error("{0}")]
    Other(String),
}

/// Errors reading canned responses for the [MockClient](crate::MockClient).
#[derive(Debug, Error)]
pub enum MockDataError {
    /// Failed to read the JSON file pointed at by `BEERS_CATALOG_MOCK_DATA`
    #[error("failed to read mock response file")]
    ReadMockFile(#[source] std::io::Error),
    /// Failed to parse the contents of the mock data file as JSON
    #[error("failed to parse mock data as JSON")]
    ParseJson(#[source] serde_json::Error),
}

/// Format an error and all of its sources on a single line,
/// separated by `: `.
pub fn display_chain(mut err: &dyn std::error::Error) -> String {
    let mut fmt = err.to_string();
    while let Some(source) = err.source() {
        fmt = format!("{fmt}: {source}");
        err = source;
    }

    fmt
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_chain_includes_sources() {
        let json_err = serde_json::from_str::<u64>("\"nope\"").unwrap_err();
        let json_msg = json_err.to_string();
        let err = CatalogClientError::Decode(json_err);

        assert_eq!(
            display_chain(&err),
            format!("failed to decode catalog response: {json_msg}")
        );
    }

    #[test]
    fn display_chain_without_source_is_display() {
        let err = CatalogClientError::BadStatus(StatusCode::NOT_FOUND);
        assert_eq!(
            display_chain(&err),
            "catalog responded with status 404 Not Found, expected 200 OK"
        );
    }
}
