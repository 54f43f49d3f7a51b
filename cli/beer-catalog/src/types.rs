//! Catalog interaction types.
//!
//! These mirror the JSON documents served by the catalog endpoint.
//! Decoding is strict about structure: a missing field or a field of the
//! wrong type fails the whole response rather than producing a partially
//! filled value.

use std::num::NonZeroU64;

use derive_more::{Display, FromStr};
use serde::{Deserialize, Serialize};

/// A single catalog item.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Beer {
    pub id: u64,
    pub name: String,
    pub tagline: String,
    pub description: String,
    pub image_url: String,
    /// Alcohol by volume, in percent.
    pub abv: f64,
    pub food_pairing: Vec<String>,
    pub brewers_tips: String,
}

/// The error document embedded in a [FetchResult].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FetchError {
    pub message: String,
}

/// One page of search results, as returned by the catalog.
///
/// `error` and a populated `beers` list are not exclusive on the wire.
/// Consumers treat a result with an error as having no items.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FetchResult {
    pub beers: Vec<Beer>,
    /// Set by the server when it answered from its own cache.
    /// Carried along but not interpreted.
    #[serde(default)]
    pub cached: bool,
    pub has_next_page: bool,
    #[serde(default)]
    pub error: Option<FetchError>,
}

impl FetchResult {
    /// A completed listing without any items and without an error.
    pub fn empty() -> Self {
        Self {
            beers: Vec::new(),
            cached: false,
            has_next_page: false,
            error: None,
        }
    }

    /// The result of a fetch that did not produce a listing.
    pub fn failed(message: impl Into<String>) -> Self {
        Self {
            error: Some(FetchError {
                message: message.into(),
            }),
            ..Self::empty()
        }
    }

    pub fn error_message(&self) -> Option<&str> {
        self.error.as_ref().map(|error| error.message.as_str())
    }
}

/// A 1-based page number.
///
/// There is no upper bound; the server reports whether a further page
/// exists.
///
/// Displays and parses as the bare number.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Display, FromStr, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct PageNumber(NonZeroU64);

impl PageNumber {
    pub const FIRST: PageNumber = PageNumber(NonZeroU64::MIN);

    /// Returns [None] for `0`.
    pub fn new(page: u64) -> Option<Self> {
        NonZeroU64::new(page).map(Self)
    }

    pub fn get(self) -> u64 {
        self.0.get()
    }

    pub fn is_first(self) -> bool {
        self == Self::FIRST
    }

    pub fn next(self) -> Self {
        Self(self.0.saturating_add(1))
    }

    /// The previous page, staying on the first page.
    pub fn prev(self) -> Self {
        Self::new(self.get() - 1).unwrap_or(Self::FIRST)
    }
}

impl Default for PageNumber {
    fn default() -> Self {
        Self::FIRST
    }
}
