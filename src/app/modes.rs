//! Input modes.
//!
//! - **Search**: keystrokes edit the query; arrows and Ctrl+n/p move the
//!   selection
//! - **Browse**: the query is frozen; j/k move, `/` returns to Search, `q`
//!   closes
//!
//! The plugin opens in Search mode so typing works immediately.

/// Current input handling mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InputMode {
    /// Typing edits the search query.
    #[default]
    Search,

    /// Single-key navigation over the result table.
    Browse,
}
