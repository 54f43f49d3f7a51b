//! The item shown in the detail overlay.

/// At most one selected item.
///
/// The overlay is open exactly while an item is selected;
/// there is no separate open/closed flag to keep in sync.
#[derive(Debug, Clone, PartialEq)]
pub struct Selection<T> {
    selected: Option<T>,
}

impl<T> Default for Selection<T> {
    fn default() -> Self {
        Self { selected: None }
    }
}

impl<T> Selection<T> {
    /// Select `item`, replacing any previous selection, and open the overlay.
    pub fn select(&mut self, item: T) {
        self.selected = Some(item);
    }

    /// Drop the selection and close the overlay.
    pub fn clear(&mut self) {
        self.selected = None;
    }

    pub fn selected(&self) -> Option<&T> {
        self.selected.as_ref()
    }

    pub fn is_open(&self) -> bool {
        self.selected.is_some()
    }
}
