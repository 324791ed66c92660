//! Search bar component renderer.

use crate::ui::helpers::{position_cursor, push_padded};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::SearchBarInfo;

/// Horizontal margin for the search box (spaces on left and right).
const SEARCH_BOX_MARGIN: usize = 5;

/// Shown at the right edge of the box while a debounce timer is live.
const PENDING_MARKER: &str = "…";

/// Renders the 3-line search box at `row` and returns the row after it.
///
/// ```text
/// [margin] ┌──────────────────┐ [margin]
/// [margin] │ Search: dune▏  … │ [margin]
/// [margin] └──────────────────┘ [margin]
/// ```
///
/// The border is dimmed while the input is not focused (browse mode). Long
/// queries keep their tail visible.
pub fn render_search_bar(out: &mut String, row: usize, search: &SearchBarInfo, theme: &Theme, cols: usize) -> usize {
    let box_width = cols.saturating_sub(SEARCH_BOX_MARGIN * 2);
    let inner_width = box_width.saturating_sub(2);
    let border = if search.is_focused {
        &theme.colors.search_bar_border
    } else {
        &theme.colors.border
    };

    position_cursor(out, row, 1);
    out.push_str(&" ".repeat(SEARCH_BOX_MARGIN));
    out.push_str(&Theme::fg(border));
    out.push_str(&format!("┌{}┐", "─".repeat(inner_width)));
    out.push_str(Theme::reset());

    let cursor = if search.is_focused { "▏" } else { "" };
    let marker_width = 3;
    let prefix = " Search: ";
    let query_room = inner_width.saturating_sub(prefix.len() + cursor.chars().count() + marker_width);
    let query_len = search.query.chars().count();
    let visible_query: String = search.query.chars().skip(query_len.saturating_sub(query_room)).collect();
    let text = format!("{prefix}{visible_query}{cursor}");

    position_cursor(out, row + 1, 1);
    out.push_str(&" ".repeat(SEARCH_BOX_MARGIN));
    out.push_str(&Theme::fg(border));
    out.push('│');
    out.push_str(&Theme::fg(&theme.colors.text_normal));
    push_padded(out, &text, inner_width.saturating_sub(marker_width));
    out.push_str(&Theme::fg(&theme.colors.spinner_fg));
    let marker = if search.is_pending { PENDING_MARKER } else { " " };
    push_padded(out, &format!(" {marker}"), marker_width.min(inner_width));
    out.push_str(&Theme::fg(border));
    out.push('│');
    out.push_str(Theme::reset());

    position_cursor(out, row + 2, 1);
    out.push_str(&" ".repeat(SEARCH_BOX_MARGIN));
    out.push_str(&Theme::fg(border));
    out.push_str(&format!("└{}┘", "─".repeat(inner_width)));
    out.push_str(Theme::reset());

    row + 3
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bar(query: &str, is_pending: bool) -> SearchBarInfo {
        SearchBarInfo {
            query: query.to_string(),
            is_pending,
            is_focused: true,
        }
    }

    #[test]
    fn pending_marker_only_while_debouncing() {
        let theme = Theme::default();
        let mut out = String::new();
        render_search_bar(&mut out, 1, &bar("dune", true), &theme, 60);
        assert!(out.contains("Search: dune"));
        assert!(out.contains(PENDING_MARKER));

        out.clear();
        render_search_bar(&mut out, 1, &bar("dune", false), &theme, 60);
        assert!(!out.contains(PENDING_MARKER));
    }

    #[test]
    fn long_query_keeps_its_tail() {
        let theme = Theme::default();
        let mut out = String::new();
        let query = format!("{}end", "x".repeat(100));
        render_search_bar(&mut out, 1, &bar(&query, false), &theme, 40);
        assert!(out.contains("xend"));
    }
}
