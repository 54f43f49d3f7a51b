use anyhow::{Result, bail};
use beer_catalog::ClientTrait;
use beer_search::{DisplayState, HistoryNavigator, Navigator, SearchController, Transition};
use bpaf::Bpaf;
use indoc::indoc;
use inquire::InquireError;
use itertools::Itertools;
use tracing::{debug, instrument};

use super::{resolve_address, settle};
use crate::config::Config;
use crate::utils::dialog::{Dialog, Text};
use crate::utils::message;
use crate::utils::render::{render_overlay, render_state};

const BROWSE_HELP: &str = indoc! {"
    /<text>  search for <text>, '/' alone clears the search
    n        next page
    p        previous page
    <number> show details of a beer
    c        close the details
    q        quit

    Esc closes the details, Ctrl-C quits."
};

/// Upper bound for the width of wrapped text
const MAX_TEXT_WIDTH: usize = 100;

// Browse search results interactively
#[derive(Debug, Bpaf, Clone)]
pub struct Browse {
    /// Address to start at, e.g. '?query=Ale&page_nr=2'
    ///
    /// Defaults to the configured 'app_url'.
    #[bpaf(positional("ADDRESS"))]
    pub address: Option<String>,
}

impl Browse {
    #[instrument(name = "browse", fields(address = ?self.address), skip_all)]
    pub async fn handle(self, config: Config, client: impl ClientTrait + Send) -> Result<()> {
        if !Dialog::can_prompt() {
            bail!("'beers browse' requires an interactive terminal, use 'beers search' instead.");
        }

        let start = match self.address {
            Some(raw) => resolve_address(&config.app_url, &raw)?,
            None => config.app_url.clone(),
        };

        let mut parts = (client, HistoryNavigator::new(start).with_home(config.app_url));
        loop {
            let (client, navigator) = parts;
            let mut controller = SearchController::mount(client, navigator);
            settle(&mut controller);

            if interact(&mut controller).await? == Step::Quit {
                return Ok(());
            }
            parts = controller.into_parts();
        }
    }
}

/// A line typed at the browse prompt.
#[derive(Debug, Clone, PartialEq, Eq)]
enum Input {
    Search(String),
    Next,
    Prev,
    /// Zero based index into the listing
    Details(usize),
    Close,
    Help,
    Quit,
    Nothing,
    Unknown(String),
}

impl Input {
    fn parse(line: &str) -> Input {
        let line = line.trim();
        if let Some(text) = line.strip_prefix('/') {
            return Input::Search(text.trim().to_string());
        }

        match line {
            "" => Input::Nothing,
            "n" | "next" => Input::Next,
            "p" | "prev" => Input::Prev,
            "c" | "close" => Input::Close,
            "h" | "?" | "help" => Input::Help,
            "q" | "quit" => Input::Quit,
            _ => match line.parse::<usize>() {
                Ok(number) if number > 0 => Input::Details(number - 1),
                _ => Input::Unknown(line.to_string()),
            },
        }
    }
}

/// What to do after handling input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Step {
    Render,
    Reload,
    Quit,
}

impl From<Transition> for Step {
    fn from(transition: Transition) -> Self {
        match transition {
            Transition::Render => Step::Render,
            Transition::Reload => Step::Reload,
        }
    }
}

/// Render and prompt until the user quits or the controller navigates.
///
/// Returns either [Step::Quit] or [Step::Reload].
async fn interact<C, N>(controller: &mut SearchController<C, N>) -> Result<Step>
where
    C: ClientTrait + Send,
    N: Navigator + Send,
{
    let width = textwrap::termwidth().min(MAX_TEXT_WIDTH);
    loop {
        println!("\n{}", render_page(controller, width));

        let help = hints(controller);
        let prompt = Dialog {
            message: "beers>",
            help_message: Some(help.as_str()),
            typed: Text {
                placeholder: Some(controller.query_text()),
            },
        }
        .prompt()
        .await;

        let step = match prompt {
            Ok(line) => apply_input(controller, Input::parse(&line)),
            // Esc
            Err(InquireError::OperationCanceled) if controller.overlay().is_some() => {
                controller.on_overlay_dismiss();
                Step::Render
            },
            Err(InquireError::OperationCanceled | InquireError::OperationInterrupted) => {
                Step::Quit
            },
            Err(err) => return Err(err.into()),
        };

        if step != Step::Render {
            return Ok(step);
        }
    }
}

fn apply_input<C, N>(controller: &mut SearchController<C, N>, input: Input) -> Step
where
    C: ClientTrait,
    N: Navigator,
{
    debug!(?input, "handling input");
    match input {
        Input::Search(text) => {
            controller.on_query_text_change(text);
            controller.on_submit().into()
        },
        Input::Next => controller.on_next().into(),
        Input::Prev => controller.on_prev().into(),
        Input::Details(index) => {
            if index < listed_count(controller) {
                controller.on_item_activate(index);
            } else {
                message::warning(format!("There is no beer number {}", index + 1));
            }
            Step::Render
        },
        Input::Close => {
            controller.on_overlay_close();
            Step::Render
        },
        Input::Help => {
            message::plain(BROWSE_HELP);
            Step::Render
        },
        Input::Quit => Step::Quit,
        Input::Nothing => Step::Render,
        Input::Unknown(line) => {
            message::warning(format!("Unknown command '{line}', type 'h' for help"));
            Step::Render
        },
    }
}

fn listed_count<C: ClientTrait, N: Navigator>(controller: &SearchController<C, N>) -> usize {
    match controller.display_state() {
        DisplayState::Listing { beers, .. } => beers.len(),
        _ => 0,
    }
}

/// The listing, or the details of the selected beer on top of it.
fn render_page<C: ClientTrait, N: Navigator>(
    controller: &SearchController<C, N>,
    width: usize,
) -> String {
    let state = render_state(&controller.display_state());
    match controller.overlay() {
        Some(beer) => format!("{state}\n\n{}", render_overlay(beer, width)),
        None => state,
    }
}

/// Commands available in the current state.
///
/// Page controls are only listed while enabled.
fn hints<C: ClientTrait, N: Navigator>(controller: &SearchController<C, N>) -> String {
    let state = controller.display_state();
    let mut hints = vec!["/<text> search".to_string()];

    if controller.overlay().is_some() {
        hints.push("c close".to_string());
    } else if let DisplayState::Listing { beers, .. } = &state {
        hints.push(format!("1-{} details", beers.len()));
    }

    if let Some(controls) = state.page_controls() {
        if controls.has_prev {
            hints.push("p previous".to_string());
        }
        if controls.has_next {
            hints.push("n next".to_string());
        }
        hints.insert(0, format!("page {}", controller.page_number()));
    }

    hints.push("q quit".to_string());
    hints.into_iter().join(" · ")
}
