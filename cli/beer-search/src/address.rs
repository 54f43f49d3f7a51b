//! Search parameters carried in the page address.
//!
//! An address with a `query` parameter describes an active search,
//! e.g. `http://localhost/?query=Ale&page_nr=3`.
//! An address without one describes the idle search page.

use beer_catalog::PageNumber;
use url::Url;

pub const QUERY_PARAM: &str = "query";
pub const PAGE_PARAM: &str = "page_nr";

/// Query and page number as read from an address.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AddressParams {
    pub query: String,
    pub page_number: PageNumber,
}

impl AddressParams {
    /// Read the first `query` and `page_nr` parameters of `address`.
    ///
    /// Values are decoded once. Missing or invalid values fall back to
    /// an empty query and the first page.
    pub fn from_address(address: &Url) -> Self {
        let mut query = None;
        let mut page = None;
        for (key, value) in address.query_pairs() {
            match &*key {
                QUERY_PARAM if query.is_none() => query = Some(value),
                PAGE_PARAM if page.is_none() => page = Some(value),
                _ => {},
            }
        }

        Self {
            query: parse_query(query.as_deref()),
            page_number: page.as_deref().map(parse_page_number).unwrap_or_default(),
        }
    }

    /// Whether these parameters describe an active search.
    pub fn has_query(&self) -> bool {
        !self.query.is_empty()
    }
}

/// Parse a page number, defaulting to the first page.
///
/// Empty, non-numeric, fractional and non-positive values all map to 1.
/// A leading `+` is accepted, so `+5` is page 5.
pub fn parse_page_number(raw: &str) -> PageNumber {
    raw.trim().parse().unwrap_or_default()
}

/// The query, or the empty string if there is none.
pub fn parse_query(raw: Option<&str>) -> String {
    raw.unwrap_or_default().to_string()
}

/// Build the address for a search.
///
/// Any query string or fragment of `base` is dropped.
/// An empty `query` yields the bare base address, which reloads into the
/// idle state.
pub fn build_address(base: &Url, query: &str, page_number: Option<PageNumber>) -> Url {
    let mut address = base_address(base);
    if query.is_empty() {
        return address;
    }

    let page_number = page_number.unwrap_or_default();
    address
        .query_pairs_mut()
        .append_pair(QUERY_PARAM, query)
        .append_pair(PAGE_PARAM, &page_number.to_string());
    address
}

/// `address` without query string and fragment.
pub fn base_address(address: &Url) -> Url {
    let mut base = address.clone();
    base.set_query(None);
    base.set_fragment(None);
    base
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use proptest::prelude::*;

    use super::*;

    fn url(s: &str) -> Url {
        Url::parse(s).unwrap()
    }

    fn page(n: u64) -> PageNumber {
        PageNumber::new(n).unwrap()
    }

    #[test]
    fn invalid_page_numbers_default_to_first() {
        for raw in [
            "",
            " ",
            "0",
            "-1",
            "-20",
            "+0",
            "+",
            "++5",
            "abc",
            "3.5",
            "1e3",
            "0x10",
            "99999999999999999999999",
        ] {
            assert_eq!(parse_page_number(raw), PageNumber::FIRST, "raw: {raw:?}");
        }
    }

    #[test]
    fn valid_page_numbers_are_kept() {
        assert_eq!(parse_page_number("1"), page(1));
        assert_eq!(parse_page_number("3"), page(3));
        assert_eq!(parse_page_number(" 42 "), page(42));
        assert_eq!(parse_page_number("1000"), page(1000));
        assert_eq!(parse_page_number("+5"), page(5));
    }

    #[test]
    fn absent_query_is_empty() {
        assert_eq!(parse_query(None), "");
        assert_eq!(parse_query(Some("Ale")), "Ale");
    }

    #[test]
    fn reads_params_from_address() {
        let params = AddressParams::from_address(&url("http://localhost/?query=Ale&page_nr=3"));
        assert_eq!(params, AddressParams {
            query: "Ale".to_string(),
            page_number: page(3),
        });
        assert!(params.has_query());
    }

    #[test]
    fn page_zero_in_address_is_first_page() {
        let params = AddressParams::from_address(&url("http://localhost/?query=Ale&page_nr=0"));
        assert_eq!(params.page_number, PageNumber::FIRST);
    }

    #[test]
    fn missing_params_default() {
        let params = AddressParams::from_address(&url("http://localhost/"));
        assert_eq!(params, AddressParams::default());
        assert!(!params.has_query());

        let params = AddressParams::from_address(&url("http://localhost/?query=Ale"));
        assert_eq!(params.page_number, PageNumber::FIRST);
    }

    #[test]
    fn decodes_encoded_query() {
        let params =
            AddressParams::from_address(&url("http://localhost/?query=India%20Pale+Ale%25&page_nr=2"));
        assert_eq!(params.query, "India Pale Ale%");
    }

    #[test]
    fn first_occurrence_wins() {
        let params = AddressParams::from_address(&url(
            "http://localhost/?query=Ale&query=Stout&page_nr=2&page_nr=5",
        ));
        assert_eq!(params.query, "Ale");
        assert_eq!(params.page_number, page(2));
    }

    #[test]
    fn builds_search_address() {
        let base = url("http://localhost/");
        assert_eq!(
            build_address(&base, "Ale", Some(page(1))).as_str(),
            "http://localhost/?query=Ale&page_nr=1"
        );
        assert_eq!(
            build_address(&base, "Ale", None).as_str(),
            "http://localhost/?query=Ale&page_nr=1"
        );
        assert_eq!(
            build_address(&base, "Ale", Some(page(4))).as_str(),
            "http://localhost/?query=Ale&page_nr=4"
        );
    }

    #[test]
    fn empty_query_builds_bare_address() {
        let base = url("http://localhost/beers?query=Ale&page_nr=2#top");
        assert_eq!(
            build_address(&base, "", Some(page(7))).as_str(),
            "http://localhost/beers"
        );
    }

    #[test]
    fn replaces_existing_params() {
        let base = url("http://localhost/beers?query=Ale&page_nr=2");
        assert_eq!(
            build_address(&base, "Stout", Some(page(3))).as_str(),
            "http://localhost/beers?query=Stout&page_nr=3"
        );
    }

    proptest! {
        #[test]
        fn non_positive_numbers_default_to_first(n in i64::MIN..=0) {
            prop_assert_eq!(parse_page_number(&n.to_string()), PageNumber::FIRST);
        }

        #[test]
        fn positive_numbers_are_kept(n in 1..=u64::MAX) {
            prop_assert_eq!(parse_page_number(&n.to_string()).get(), n);
        }

        #[test]
        fn non_numeric_defaults_to_first(raw in "[^0-9]*") {
            prop_assert_eq!(parse_page_number(&raw), PageNumber::FIRST);
        }

        #[test]
        fn address_round_trips(query in ".+", n in 1..=u64::MAX) {
            let base = url("http://localhost/");
            let address = build_address(&base, &query, PageNumber::new(n));
            let params = AddressParams::from_address(&address);
            prop_assert_eq!(params.query, query);
            prop_assert_eq!(params.page_number.get(), n);
        }

        #[test]
        fn empty_query_never_has_params(n in 1..=u64::MAX) {
            let base = url("http://localhost/");
            let address = build_address(&base, "", PageNumber::new(n));
            prop_assert_eq!(address.query(), None);
            prop_assert!(!AddressParams::from_address(&address).has_query());
        }
    }
}
