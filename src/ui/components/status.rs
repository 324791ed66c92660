//! Status messages shown in place of the result table.

use crate::ui::helpers::{position_cursor, push_centered};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::EmptyState;

const SPINNER: &str = "⠋ Loading movies…";

/// Renders the loading indicator centered at `row`.
pub fn render_loading(out: &mut String, row: usize, theme: &Theme, cols: usize) {
    position_cursor(out, row, 1);
    out.push_str(&Theme::fg(&theme.colors.spinner_fg));
    push_centered(out, SPINNER, cols);
    out.push_str(Theme::reset());
}

/// Renders a search error centered at `row`.
pub fn render_error(out: &mut String, row: usize, message: &str, theme: &Theme, cols: usize) {
    position_cursor(out, row, 1);
    out.push_str(Theme::bold());
    out.push_str(&Theme::fg(&theme.colors.error_fg));
    push_centered(out, message, cols);
    out.push_str(Theme::reset());
}

/// Renders the two-line "no results" message starting at `row`.
pub fn render_empty_state(out: &mut String, row: usize, empty: &EmptyState, theme: &Theme, cols: usize) {
    position_cursor(out, row, 1);
    out.push_str(&Theme::fg(&theme.colors.empty_state_fg));
    push_centered(out, &empty.message, cols);
    out.push_str(Theme::reset());

    position_cursor(out, row + 1, 1);
    out.push_str(Theme::dim());
    out.push_str(&Theme::fg(&theme.colors.text_dim));
    push_centered(out, &empty.subtitle, cols);
    out.push_str(Theme::reset());
}
