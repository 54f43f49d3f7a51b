use anyhow::{Result, bail};
use beer_catalog::{ClientTrait, PageNumber};
use beer_search::{DisplayState, HistoryNavigator, Navigator, PageControls, SearchController, build_address};
use bpaf::Bpaf;
use tracing::{debug, instrument};

use super::{resolve_address, settle};
use crate::config::Config;
use crate::utils::message;
use crate::utils::render::{NOT_FOUND_MESSAGE, render_state};

// Search for beers
#[derive(Debug, Bpaf, Clone)]
pub struct Search {
    /// Display the catalog's response as JSON
    #[bpaf(long)]
    pub json: bool,

    /// Page of results to show, starting at 1
    #[bpaf(long, argument("N"))]
    pub page: Option<PageNumber>,

    /// Text to search for
    #[bpaf(positional("QUERY"))]
    pub query: String,
}

impl Search {
    #[instrument(name = "search", fields(query = self.query, page = ?self.page), skip_all)]
    pub async fn handle(self, config: Config, client: impl ClientTrait + Send) -> Result<()> {
        let address = build_address(&config.app_url, &self.query, self.page);
        let navigator = HistoryNavigator::new(address).with_home(config.app_url);
        show_page(client, navigator, self.json)
    }
}

// Open a search address
#[derive(Debug, Bpaf, Clone)]
pub struct Open {
    /// Display the catalog's response as JSON
    #[bpaf(long)]
    pub json: bool,

    /// Address of a search page, e.g. 'http://localhost/?query=Ale&page_nr=2'
    ///
    /// Relative addresses such as '?query=Ale' are resolved against
    /// the configured 'app_url'.
    #[bpaf(positional("ADDRESS"))]
    pub address: String,
}

impl Open {
    #[instrument(name = "open", fields(address = self.address), skip_all)]
    pub async fn handle(self, config: Config, client: impl ClientTrait + Send) -> Result<()> {
        let address = resolve_address(&config.app_url, &self.address)?;
        let navigator = HistoryNavigator::new(address).with_home(config.app_url);
        show_page(client, navigator, self.json)
    }
}

/// Mount on the navigator's address, wait for the page and print it once.
///
/// A failed search is returned as an error. With `json`, the failed
/// response is printed first. An address that is not the search page is
/// an error as well.
fn show_page<C, N>(client: C, navigator: N, json: bool) -> Result<()>
where
    C: ClientTrait + Send,
    N: Navigator + Send,
{
    let mut controller = SearchController::mount(client, navigator);
    if controller.display_state() == DisplayState::NotFound {
        bail!(
            "{NOT_FOUND_MESSAGE} '{}' is not a search page",
            controller.navigator().current_address()
        );
    }
    settle(&mut controller);

    if json {
        debug!("printing search result as JSON");
        render_result_json(&controller)?;
    }

    let state = controller.display_state();
    if let DisplayState::Error(err) = state {
        bail!("Search failed: {err}");
    }

    if !json {
        debug!("printing search result as user facing");
        println!("{}", render_state(&state));
        if let Some(hint) = page_hint(controller.page_number(), state) {
            message::plain(hint);
        }
    }
    Ok(())
}

fn render_result_json<C: ClientTrait, N: Navigator>(
    controller: &SearchController<C, N>,
) -> Result<()> {
    let json = serde_json::to_string(&controller.result())?;
    println!("{json}");
    Ok(())
}

/// How to reach the neighbouring pages, if there are any.
fn page_hint(page_number: PageNumber, state: DisplayState<'_>) -> Option<String> {
    let hints = match state.page_controls()? {
        PageControls {
            has_prev: false,
            has_next: false,
        } => return None,
        PageControls {
            has_prev: true,
            has_next: false,
        } => format!("Use '--page {}' for the previous page.", page_number.prev()),
        PageControls {
            has_prev: false,
            has_next: true,
        } => format!("Use '--page {}' for the next page.", page_number.next()),
        PageControls {
            has_prev: true,
            has_next: true,
        } => format!(
            "Use '--page {}' for the previous or '--page {}' for the next page.",
            page_number.prev(),
            page_number.next()
        ),
    };
    Some(format!("\nPage {page_number}. {hints}"))
}
