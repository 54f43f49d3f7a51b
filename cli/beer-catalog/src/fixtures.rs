//! Sample catalog data for tests.

use crate::types::{Beer, FetchResult};

pub const MOCK_QUERY: &str = "Ale";
pub const MOCK_ERROR_MESSAGE: &str = "Test error message...";

fn pairings() -> Vec<String> {
    vec!["Pairing 1...".to_string(), "Pairing 2...".to_string()]
}

pub fn trashy_blonde() -> Beer {
    Beer {
        id: 2,
        name: "Trashy Blonde".to_string(),
        tagline: "You Know You Shouldn't".to_string(),
        description: "Desc...".to_string(),
        image_url: "https://images.punkapi.com/v2/2.png".to_string(),
        abv: 4.1,
        food_pairing: pairings(),
        brewers_tips: "Tips...".to_string(),
    }
}

pub fn fake_lager() -> Beer {
    Beer {
        id: 8,
        name: "Fake Lager".to_string(),
        tagline: "Bohemian Pilsner.".to_string(),
        description: "Desc...".to_string(),
        image_url: "https://images.punkapi.com/v2/8.png".to_string(),
        abv: 4.7,
        food_pairing: pairings(),
        brewers_tips: "Tips...".to_string(),
    }
}

pub fn russian_doll() -> Beer {
    Beer {
        id: 18,
        name: "Russian Doll – India Pale Ale".to_string(),
        tagline: "Nesting Hop Bomb.".to_string(),
        description: "Desc...".to_string(),
        image_url: "https://images.punkapi.com/v2/18.png".to_string(),
        abv: 6.0,
        food_pairing: pairings(),
        brewers_tips: "Tips...".to_string(),
    }
}

/// A server-side error document.
pub fn response_error() -> FetchResult {
    FetchResult {
        cached: true,
        ..FetchResult::failed(MOCK_ERROR_MESSAGE)
    }
}

/// Three beers, last page.
pub fn response_no_next_3() -> FetchResult {
    FetchResult {
        beers: vec![trashy_blonde(), fake_lager(), russian_doll()],
        cached: true,
        has_next_page: false,
        error: None,
    }
}

/// Ten beers, more pages available.
pub fn response_has_next_10() -> FetchResult {
    let mut beers = vec![trashy_blonde(), fake_lager(), russian_doll()];
    beers.extend(std::iter::repeat_n(fake_lager(), 7));
    FetchResult {
        beers,
        cached: true,
        has_next_page: true,
        error: None,
    }
}

/// No beers and no error.
pub fn response_empty() -> FetchResult {
    FetchResult {
        cached: true,
        ..FetchResult::empty()
    }
}
