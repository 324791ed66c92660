//! View model types representing renderable UI state.
//!
//! View models are computed by [`AppState::compute_viewmodel`](crate::app::AppState::compute_viewmodel)
//! and consumed by the renderer. They hold display-ready strings and
//! indices only; all formatting decisions (year, rating label, truncation,
//! highlight ranges) are made before rendering.
//!
//! # Example
//!
//! ```rust
//! use cinescout::ui::viewmodel::{
//!     FooterInfo, HeaderInfo, ResultsBody, SearchBarInfo, UIViewModel,
//! };
//!
//! let vm = UIViewModel {
//!     header: HeaderInfo { title: " Cinescout ".to_string() },
//!     search_bar: SearchBarInfo {
//!         query: "dune".to_string(),
//!         is_pending: true,
//!         is_focused: true,
//!     },
//!     trending: vec![],
//!     section_title: "Popular Movies".to_string(),
//!     body: ResultsBody::Loading,
//!     footer: FooterInfo { keybindings: "q: close".to_string() },
//! };
//! assert!(vm.search_bar.is_pending);
//! ```

/// Fixed result-table column widths. TITLE gets the rest of the line.
pub const YEAR_WIDTH: usize = 6;
pub const RATING_WIDTH: usize = 8;
pub const LANG_WIDTH: usize = 6;
pub const MIN_TITLE_WIDTH: usize = 10;

/// Width of the TITLE column in a `cols`-wide pane.
#[must_use]
pub const fn title_column_width(cols: usize) -> usize {
    let width = cols.saturating_sub(YEAR_WIDTH + RATING_WIDTH + LANG_WIDTH);
    if width < MIN_TITLE_WIDTH {
        MIN_TITLE_WIDTH
    } else {
        width
    }
}

/// Complete UI view model for rendering.
#[derive(Debug, Clone, PartialEq)]
pub struct UIViewModel {
    pub header: HeaderInfo,

    /// The query input, always visible.
    pub search_bar: SearchBarInfo,

    /// Trending strip, empty when there is nothing to show.
    pub trending: Vec<TrendingItem>,

    /// "Popular Movies" or the query the results belong to.
    pub section_title: String,

    /// What the result area shows.
    pub body: ResultsBody,

    pub footer: FooterInfo,
}

/// Content of the result area. Exactly one of these is shown.
#[derive(Debug, Clone, PartialEq)]
pub enum ResultsBody {
    /// A search is in flight.
    Loading,

    /// The last search failed; the message is user-facing.
    Error(String),

    /// The last search succeeded with no movies.
    Empty(EmptyState),

    /// The visible window of result rows.
    Rows {
        items: Vec<DisplayItem>,
        /// Index into `items` of the selected row.
        selected_index: usize,
    },
}

/// One row of the result table.
///
/// Highlight ranges are `(start, end)` character indices into `title`,
/// already clipped to the truncated title.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DisplayItem {
    pub title: String,
    pub year: String,
    pub rating: String,
    pub language: String,
    pub is_selected: bool,
    pub highlight_ranges: Vec<(usize, usize)>,
}

/// One entry of the trending strip.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrendingItem {
    /// 1-based position.
    pub rank: usize,
    pub title: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeaderInfo {
    pub title: String,
}

/// Keybinding hints for the bottom line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FooterInfo {
    pub keybindings: String,
}

/// Message shown when a search returned nothing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmptyState {
    pub message: String,
    pub subtitle: String,
}

/// Search input display information.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchBarInfo {
    /// Raw query as typed.
    pub query: String,

    /// A keystroke is waiting for the debounce to expire.
    pub is_pending: bool,

    /// Typing goes to the query (search mode).
    pub is_focused: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn title_column_takes_the_remaining_width() {
        assert_eq!(title_column_width(80), 80 - YEAR_WIDTH - RATING_WIDTH - LANG_WIDTH);
    }

    #[test]
    fn title_column_never_shrinks_below_minimum() {
        assert_eq!(title_column_width(12), MIN_TITLE_WIDTH);
        assert_eq!(title_column_width(0), MIN_TITLE_WIDTH);
    }
}
