//! The search and pagination state machine.
//!
//! A [SearchController] lives for exactly one address. It is mounted on the
//! navigator's current address, fetches the page that address describes,
//! and reacts to user input. Submitting a search or turning a page never
//! changes the mounted state in place: it navigates to a new address, and the
//! caller mounts a fresh controller there (see [Transition::Reload]).
//! Address and displayed content can therefore never drift apart.

use beer_catalog::{Beer, ClientTrait, FetchResult, PageNumber, display_chain};
use tracing::{debug, instrument, warn};
use url::Url;

use crate::address::{AddressParams, base_address, build_address};
use crate::navigator::Navigator;
use crate::selection::Selection;

/// Which page buttons are enabled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageControls {
    pub has_prev: bool,
    pub has_next: bool,
}

/// What the presentation layer should show.
///
/// Derived from the controller state on every call to
/// [SearchController::display_state], never stored.
#[derive(Debug, Clone, PartialEq)]
pub enum DisplayState<'a> {
    /// The address is not the search page.
    NotFound,
    /// No search in the address; prompt for one.
    Idle,
    /// A search is in flight.
    Loading,
    /// The search failed. No items and no page controls.
    Error(&'a str),
    /// The search completed without matches.
    Empty(PageControls),
    /// The search produced at least one item.
    Listing {
        beers: &'a [Beer],
        controls: PageControls,
    },
}

impl DisplayState<'_> {
    /// The page controls shown in this state, if any.
    pub fn page_controls(&self) -> Option<PageControls> {
        match self {
            DisplayState::Empty(controls) | DisplayState::Listing { controls, .. } => {
                Some(*controls)
            },
            DisplayState::NotFound
            | DisplayState::Idle
            | DisplayState::Loading
            | DisplayState::Error(_) => None,
        }
    }
}

/// The outcome of a user action.
#[must_use]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    /// State changed in place; render again.
    Render,
    /// The controller navigated. Discard it and mount a new one on the
    /// navigator's current address.
    Reload,
}

/// Holds the state of one search page.
#[derive(Debug)]
pub struct SearchController<C, N> {
    client: C,
    navigator: N,
    /// The current address without search parameters, or the search page
    /// if the current address is not found.
    base: Url,
    /// Whether the current address is the search page.
    found: bool,
    /// Query and page number committed by the address.
    params: AddressParams,
    /// Query text as edited by the user, not yet submitted.
    query_text: String,
    result: Option<FetchResult>,
    selection: Selection<Beer>,
}

impl<C: ClientTrait, N: Navigator> SearchController<C, N> {
    /// Mount on the navigator's current address.
    ///
    /// Without a query in the address, or on an address whose path is not
    /// the navigator's home, the controller is resolved immediately and
    /// never contacts the catalog.
    /// With a query, the page it names is pending until [Self::settle].
    pub fn mount(client: C, navigator: N) -> Self {
        let address = navigator.current_address();
        let home = navigator.home();
        let found = address.path() == home.path();
        let params = AddressParams::from_address(&address);
        if !found {
            debug!(%address, home = %home, "address not found");
        }
        debug!(
            %address,
            query = %params.query,
            page_number = %params.page_number,
            "mounting search controller"
        );

        let result = if found && params.has_query() {
            None
        } else {
            Some(FetchResult::empty())
        };

        Self {
            client,
            navigator,
            base: if found { base_address(&address) } else { home },
            found,
            query_text: params.query.clone(),
            params,
            result,
            selection: Selection::default(),
        }
    }

    /// The request that has to complete before the page is resolved.
    pub fn pending_request(&self) -> Option<(&str, PageNumber)> {
        match self.result {
            None => Some((self.params.query.as_str(), self.params.page_number)),
            Some(_) => None,
        }
    }

    /// Perform the pending request, if any, and store its result.
    ///
    /// A failed request is stored as a result carrying the error,
    /// so this never fails. Failures are not retried.
    #[instrument(skip(self), fields(query = %self.params.query, page_number = %self.params.page_number))]
    pub async fn settle(&mut self) {
        if self.result.is_some() {
            return;
        }

        let result = match self
            .client
            .fetch_page(&self.params.query, self.params.page_number)
            .await
        {
            Ok(result) => result,
            Err(err) => {
                let message = display_chain(&err);
                warn!(%message, "search failed");
                FetchResult::failed(message)
            },
        };
        self.result = Some(result);
    }

    pub fn display_state(&self) -> DisplayState<'_> {
        if !self.found {
            return DisplayState::NotFound;
        }
        if !self.params.has_query() {
            return DisplayState::Idle;
        }
        let Some(result) = &self.result else {
            return DisplayState::Loading;
        };
        if let Some(message) = result.error_message() {
            return DisplayState::Error(message);
        }

        let controls = PageControls {
            has_prev: !self.params.page_number.is_first(),
            has_next: result.has_next_page,
        };
        if result.beers.is_empty() {
            DisplayState::Empty(controls)
        } else {
            DisplayState::Listing {
                beers: &result.beers,
                controls,
            }
        }
    }

    /// The beer shown in the overlay. The overlay is open iff this is [Some].
    pub fn overlay(&self) -> Option<&Beer> {
        self.selection.selected()
    }

    pub fn page_number(&self) -> PageNumber {
        self.params.page_number
    }

    /// The query text currently in the search box.
    pub fn query_text(&self) -> &str {
        &self.query_text
    }

    pub fn result(&self) -> Option<&FetchResult> {
        self.result.as_ref()
    }

    pub fn navigator(&self) -> &N {
        &self.navigator
    }

    /// Give back the client and navigator, e.g. to mount a new controller
    /// after a [Transition::Reload].
    pub fn into_parts(self) -> (C, N) {
        (self.client, self.navigator)
    }

    /// Edit the search box. Does not search.
    pub fn on_query_text_change(&mut self, text: impl Into<String>) {
        self.query_text = text.into();
    }

    /// Search for the text in the search box, starting at the first page.
    ///
    /// An empty search box navigates back to the idle page.
    pub fn on_submit(&mut self) -> Transition {
        let address = build_address(&self.base, &self.query_text, Some(PageNumber::FIRST));
        self.navigate(address)
    }

    /// Go to the next page, if the server reported one.
    ///
    /// Pages through the text in the search box, which may have been edited
    /// since the mounted search was submitted.
    pub fn on_next(&mut self) -> Transition {
        let controls = self.display_state().page_controls();
        match controls {
            Some(PageControls { has_next: true, .. }) => {
                self.navigate_to_page(self.params.page_number.next())
            },
            _ => {
                debug!("no next page, ignoring");
                Transition::Render
            },
        }
    }

    /// Go to the previous page, if there is one. Like [Self::on_next], pages
    /// through the text in the search box.
    pub fn on_prev(&mut self) -> Transition {
        let controls = self.display_state().page_controls();
        match controls {
            Some(PageControls { has_prev: true, .. }) => {
                self.navigate_to_page(self.params.page_number.prev())
            },
            _ => {
                debug!("no previous page, ignoring");
                Transition::Render
            },
        }
    }

    /// Open the overlay for the beer at `index` of the current listing.
    ///
    /// Ignored if nothing is listed at `index`.
    pub fn on_item_activate(&mut self, index: usize) -> Option<&Beer> {
        let beer = match self.display_state() {
            DisplayState::Listing { beers, .. } => beers.get(index).cloned(),
            _ => None,
        };
        match beer {
            Some(beer) => {
                debug!(id = beer.id, name = %beer.name, "opening overlay");
                self.selection.select(beer);
            },
            None => debug!(index, "no beer at index, ignoring"),
        }
        self.selection.selected()
    }

    /// The overlay's close control was used.
    pub fn on_overlay_close(&mut self) {
        self.selection.clear();
    }

    /// The user clicked outside the overlay.
    pub fn on_overlay_dismiss(&mut self) {
        self.selection.clear();
    }

    fn navigate_to_page(&mut self, page_number: PageNumber) -> Transition {
        let address = build_address(&self.base, &self.query_text, Some(page_number));
        self.navigate(address)
    }

    fn navigate(&mut self, address: Url) -> Transition {
        self.navigator.navigate(address);
        Transition::Reload
    }
}
