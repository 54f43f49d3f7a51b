mod browse;
mod search;

use std::fmt;
use std::time::Duration;

use anyhow::{Context, Result};
use beer_catalog::ClientTrait;
use beer_search::{Navigator, SearchController};
use bpaf::Bpaf;
use indoc::indoc;
use tracing::debug;
use url::Url;

use crate::config::Config;
use crate::utils::dialog::{Dialog, Spinner};
use crate::utils::init::init_catalog_client;

static BEERS_DESCRIPTION: &'_ str = indoc! {"
    Search the beer catalog from the command line.

    Searches are addressed like pages of the search site:
    'beers open' and 'beers browse' accept addresses such as
    'http://localhost/?query=Ale&page_nr=2'."
};

fn vec_len<T>(x: Vec<T>) -> usize {
    Vec::len(&x)
}

#[derive(Bpaf, Clone, Copy, Debug, PartialEq, Eq)]
pub enum Verbosity {
    Verbose(
        /// Increase logging verbosity
        ///
        /// Invoke multiple times for increasing detail.
        #[bpaf(short('v'), long("verbose"), req_flag(()), many, map(vec_len))]
        usize,
    ),

    /// Silence logs except for errors
    #[bpaf(short, long)]
    Quiet,
}

impl Default for Verbosity {
    fn default() -> Self {
        Verbosity::Verbose(0)
    }
}

#[derive(Bpaf)]
#[bpaf(options, version, descr(BEERS_DESCRIPTION))]
pub struct BeersCli(#[bpaf(external(beers_args))] pub BeersArgs);

/// Main beers args parser
///
/// To parse the beers CLI, use [`BeersCli`] instead using [`beers_cli()`].
#[derive(Debug, Bpaf)]
#[bpaf(ignore_rustdoc)] // we don't want this struct to be interpreted as a group
pub struct BeersArgs {
    /// Verbose mode
    ///
    /// Invoke multiple times for increasing detail.
    #[bpaf(external, fallback(Default::default()))]
    pub verbosity: Verbosity,

    #[bpaf(external(commands))]
    command: Commands,
}

impl BeersArgs {
    pub async fn handle(self, config: Config) -> Result<()> {
        debug!(command = ?self.command, "running command");

        let client = init_catalog_client(&config)?;
        match self.command {
            Commands::Search(args) => args.handle(config, client).await,
            Commands::Open(args) => args.handle(config, client).await,
            Commands::Browse(args) => args.handle(config, client).await,
        }
    }
}

#[derive(Bpaf, Clone)]
enum Commands {
    /// Search the catalog and print one page of results
    #[bpaf(command, short('s'))]
    Search(#[bpaf(external(search::search))] search::Search),

    /// Print the page a search address points at
    #[bpaf(command)]
    Open(#[bpaf(external(search::open))] search::Open),

    /// Search, page through results and view details interactively
    #[bpaf(command, short('b'))]
    Browse(#[bpaf(external(browse::browse))] browse::Browse),
}

impl fmt::Debug for Commands {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Commands::Search(_) => write!(f, "search"),
            Commands::Open(_) => write!(f, "open"),
            Commands::Browse(_) => write!(f, "browse"),
        }
    }
}

/// Resolve an address given on the command line.
///
/// Relative addresses, e.g. `?query=Ale`, are resolved against `app_url`.
fn resolve_address(app_url: &Url, raw: &str) -> Result<Url> {
    app_url
        .join(raw)
        .with_context(|| format!("Invalid address '{raw}'"))
}

/// Complete the controller's pending request, if any,
/// showing a spinner while it takes long.
fn settle<C, N>(controller: &mut SearchController<C, N>)
where
    C: ClientTrait + Send,
    N: Navigator + Send,
{
    if controller.pending_request().is_none() {
        return;
    }

    Dialog {
        message: "Searching for beers...",
        help_message: None,
        typed: Spinner::new(|| tokio::runtime::Handle::current().block_on(controller.settle())),
    }
    .spin_with_delay(Duration::from_millis(500));
}
