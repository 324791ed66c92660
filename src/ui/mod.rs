//! Terminal user interface.
//!
//! ```text
//! AppState → compute_viewmodel → UIViewModel → components → ANSI frame
//! ```
//!
//! The view is a pure function of state: a spinner while a search is in
//! flight, otherwise the error text if one is set, otherwise the result
//! table. The trending strip renders independently whenever it has entries.
//!
//! # Modules
//!
//! - [`viewmodel`]: Display-ready view model types
//! - [`renderer`]: Rendering entry points
//! - [`components`]: Per-element renderers
//! - [`helpers`]: Cursor, padding, and highlight utilities
//! - [`theme`]: Color themes and ANSI escapes

pub mod components;
pub mod helpers;
pub mod renderer;
pub mod theme;
pub mod viewmodel;

pub use renderer::{render, render_startup_error, render_to_string};
pub use theme::{Theme, DEFAULT_THEME};
pub use viewmodel::{
    DisplayItem, EmptyState, FooterInfo, HeaderInfo, ResultsBody, SearchBarInfo, TrendingItem, UIViewModel,
};
