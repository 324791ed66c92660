//! Composable UI component renderers.
//!
//! # Components
//!
//! - [`header`]: Title bar
//! - [`search`]: Search input box with the pending marker
//! - [`trending`]: One-line trending strip
//! - [`table`]: Result table (TITLE, YEAR, RATING, LANG)
//! - [`status`]: Loading, error, and empty messages
//! - [`footer`]: Keybinding hints
//! - [`fatal`]: Configuration error screen
//!
//! # Layout
//!
//! ```text
//! [blank line]
//! [Header]
//! [Border]
//! [Search Bar - 3 lines]
//! [Trending strip, when non-empty]
//! [Section title]
//! [Table headers + rows | status message]
//! [Blank padding to fill screen]
//! [Border]
//! [Footer]
//! ```

mod fatal;
mod footer;
mod header;
mod search;
mod status;
mod table;
mod trending;

pub use fatal::render_fatal;

use crate::ui::helpers::{position_cursor, push_padded};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::{ResultsBody, UIViewModel};

use footer::render_footer;
use header::render_header;
use search::render_search_bar;
use status::{render_empty_state, render_error, render_loading};
use table::{render_table_headers, render_table_rows};
use trending::render_trending;

/// Renders a horizontal border line at `row` and returns the next row.
fn render_border(out: &mut String, row: usize, color: &str, cols: usize) -> usize {
    position_cursor(out, row, 1);
    out.push_str(&Theme::fg(color));
    out.push_str(&"─".repeat(cols));
    out.push_str(Theme::reset());
    row + 1
}

fn render_section_title(out: &mut String, row: usize, title: &str, theme: &Theme, cols: usize) -> usize {
    position_cursor(out, row, 1);
    out.push_str(Theme::bold());
    out.push_str(&Theme::fg(&theme.colors.text_normal));
    push_padded(out, &format!(" {title}"), cols);
    out.push_str(Theme::reset());
    row + 1
}

/// Renders the full screen for `vm`.
pub fn render_screen(out: &mut String, vm: &UIViewModel, theme: &Theme, rows: usize, cols: usize) {
    let mut current_row = 2;

    current_row = render_header(out, current_row, &vm.header, theme, cols);
    current_row = render_border(out, current_row, &theme.colors.border, cols);
    current_row = render_search_bar(out, current_row, &vm.search_bar, theme, cols);
    current_row = render_trending(out, current_row, &vm.trending, theme, cols);
    current_row = render_section_title(out, current_row, &vm.section_title, theme, cols);

    match &vm.body {
        ResultsBody::Loading => render_loading(out, current_row + 1, theme, cols),
        ResultsBody::Error(message) => render_error(out, current_row + 1, message, theme, cols),
        ResultsBody::Empty(empty) => render_empty_state(out, current_row + 1, empty, theme, cols),
        ResultsBody::Rows { items, .. } => {
            current_row = render_table_headers(out, current_row, theme, cols);
            render_table_rows(out, current_row, items, theme, cols);
        }
    }

    let footer_row = rows;
    let border_row = footer_row.saturating_sub(1);

    render_border(out, border_row, &theme.colors.border, cols);
    render_footer(out, footer_row, &vm.footer, theme, cols);
}
