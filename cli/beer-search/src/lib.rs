//! Search, pagination and selection state for the beer catalog client.
//!
//! - [`address`]: reading and building addresses that carry a search
//! - [`navigator`]: the injectable address bar
//! - [`controller`]: the state machine behind the search page
//! - [`selection`]: the item shown in the detail overlay

pub mod address;
pub mod controller;
pub mod navigator;
pub mod selection;

pub use address::{AddressParams, build_address, parse_page_number, parse_query};
pub use controller::{DisplayState, PageControls, SearchController, Transition};
pub use navigator::{HistoryNavigator, Navigator};
pub use selection::Selection;
