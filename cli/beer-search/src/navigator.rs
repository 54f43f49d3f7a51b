//! Access to the current address and the ability to navigate away from it.

use tracing::debug;
use url::Url;

use crate::address::base_address;

/// The address bar of the client.
///
/// Navigating replaces the current address and causes a full reload:
/// the controller that navigated is discarded and a new one is mounted on
/// the new address.
pub trait Navigator {
    fn current_address(&self) -> Url;

    /// The address of the search page. Addresses with another path are not
    /// found.
    fn home(&self) -> Url;

    fn navigate(&mut self, address: Url);
}

impl<N: Navigator + ?Sized> Navigator for &mut N {
    fn current_address(&self) -> Url {
        (**self).current_address()
    }

    fn home(&self) -> Url {
        (**self).home()
    }

    fn navigate(&mut self, address: Url) {
        (**self).navigate(address)
    }
}

/// An in-memory browsing history.
#[derive(Debug, Clone)]
pub struct HistoryNavigator {
    home: Url,
    history: Vec<Url>,
}

impl HistoryNavigator {
    /// Start browsing at `start`, with the search page at the root path.
    pub fn new(start: Url) -> Self {
        let mut home = base_address(&start);
        home.set_path("/");
        Self {
            home,
            history: vec![start],
        }
    }

    /// Serve the search page at `home` instead of the root path.
    pub fn with_home(mut self, home: Url) -> Self {
        self.home = base_address(&home);
        self
    }

    /// Every address visited so far, oldest first.
    pub fn history(&self) -> &[Url] {
        &self.history
    }

    /// Addresses navigated to after the start address.
    pub fn navigations(&self) -> &[Url] {
        &self.history[1..]
    }
}

impl Navigator for HistoryNavigator {
    fn current_address(&self) -> Url {
        // `history` is never empty
        self.history[self.history.len() - 1].clone()
    }

    fn home(&self) -> Url {
        self.home.clone()
    }

    fn navigate(&mut self, address: Url) {
        debug!(%address, "navigating");
        self.history.push(address);
    }
}
