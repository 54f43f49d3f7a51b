//! Text rendering of the search page.

use beer_catalog::Beer;
use beer_search::DisplayState;
use indoc::formatdoc;
use itertools::Itertools;

pub const NOT_FOUND_MESSAGE: &str = "Page not found...";
pub const IDLE_MESSAGE: &str = "Search for beers";
pub const LOADING_MESSAGE: &str = "Loading...";
pub const EMPTY_MESSAGE: &str = "No beers found...";

/// A beer as a single line, numbered from 1
pub fn render_card(position: usize, beer: &Beer) -> String {
    format!(
        "{position}. {name}  {abv}% · {tagline}",
        name = beer.name,
        abv = beer.abv,
        tagline = beer.tagline
    )
}

pub fn render_listing(beers: &[Beer]) -> String {
    beers
        .iter()
        .enumerate()
        .map(|(index, beer)| render_card(index + 1, beer))
        .join("\n")
}

/// Everything the page shows in `state`, except for the overlay.
pub fn render_state(state: &DisplayState<'_>) -> String {
    match state {
        DisplayState::NotFound => NOT_FOUND_MESSAGE.to_string(),
        DisplayState::Idle => IDLE_MESSAGE.to_string(),
        DisplayState::Loading => LOADING_MESSAGE.to_string(),
        DisplayState::Error(message) => format!("Error: {message}"),
        DisplayState::Empty(_) => EMPTY_MESSAGE.to_string(),
        DisplayState::Listing { beers, .. } => render_listing(beers),
    }
}

/// Details of a single beer, wrapped to `width` columns.
///
/// Food pairings are left out if there are none.
pub fn render_overlay(beer: &Beer, width: usize) -> String {
    let header = formatdoc! {"
        {name}
        {image_url}
        {abv}% · {tagline}",
        name = beer.name,
        image_url = beer.image_url,
        abv = beer.abv,
        tagline = beer.tagline,
    };

    let indented = textwrap::Options::new(width)
        .initial_indent("  ")
        .subsequent_indent("  ");

    let mut sections = vec![header];
    if !beer.description.is_empty() {
        sections.push(textwrap::fill(&beer.description, width));
    }
    sections.push(format!(
        "Tips\n{}",
        textwrap::fill(&beer.brewers_tips, &indented)
    ));
    if !beer.food_pairing.is_empty() {
        let pairings = beer
            .food_pairing
            .iter()
            .map(|pairing| format!("  - {pairing}"))
            .join("\n");
        sections.push(format!("Food Pairings\n{pairings}"));
    }

    sections.join("\n\n")
}
