//! Result table renderer.
//!
//! Four columns: TITLE takes whatever the fixed-width YEAR, RATING, and LANG
//! columns leave over. Titles arrive already truncated to fit.

use crate::ui::helpers::{self, position_cursor, push_padded};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::{title_column_width, DisplayItem, LANG_WIDTH, RATING_WIDTH, YEAR_WIDTH};

/// Renders the bold column headers at `row` and returns the next row.
pub fn render_table_headers(out: &mut String, row: usize, theme: &Theme, cols: usize) -> usize {
    position_cursor(out, row, 1);
    out.push_str(Theme::bold());
    out.push_str(&Theme::fg(&theme.colors.text_dim));
    push_padded(out, " TITLE", title_column_width(cols));
    push_padded(out, "YEAR", YEAR_WIDTH);
    push_padded(out, "RATING", RATING_WIDTH);
    push_padded(out, "LANG", LANG_WIDTH);
    out.push_str(Theme::reset());
    row + 1
}

/// Renders every row starting at `row` and returns the row after the last.
pub fn render_table_rows(out: &mut String, row: usize, items: &[DisplayItem], theme: &Theme, cols: usize) -> usize {
    let mut current_row = row;
    for item in items {
        current_row = render_table_row(out, current_row, item, theme, cols);
    }
    current_row
}

/// One row, padded to the full width so the selection background spans it.
///
/// Selection colors win over match highlighting.
fn render_table_row(out: &mut String, row: usize, item: &DisplayItem, theme: &Theme, cols: usize) -> usize {
    position_cursor(out, row, 1);

    let base = if item.is_selected {
        format!(
            "{}{}",
            Theme::fg(&theme.colors.selection_fg),
            Theme::bg(&theme.colors.selection_bg)
        )
    } else {
        Theme::fg(&theme.colors.text_normal)
    };
    out.push_str(&base);

    out.push(' ');
    helpers::render_highlighted_text(out, &item.title, &item.highlight_ranges, theme, item.is_selected);
    let title_len = 1 + item.title.chars().count();
    out.push_str(&" ".repeat(title_column_width(cols).saturating_sub(title_len)));

    push_padded(out, &item.year, YEAR_WIDTH);
    if !item.is_selected {
        out.push_str(&Theme::fg(&theme.colors.rating_fg));
    }
    push_padded(out, &item.rating, RATING_WIDTH);
    out.push_str(&base);
    push_padded(out, &item.language, LANG_WIDTH);

    let line_len = title_column_width(cols).max(title_len) + YEAR_WIDTH + RATING_WIDTH + LANG_WIDTH;
    out.push_str(&" ".repeat(cols.saturating_sub(line_len)));

    out.push_str(Theme::reset());
    row + 1
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(title: &str, is_selected: bool) -> DisplayItem {
        DisplayItem {
            title: title.to_string(),
            year: "1995".to_string(),
            rating: "8.3".to_string(),
            language: "EN".to_string(),
            is_selected,
            highlight_ranges: vec![],
        }
    }

    #[test]
    fn rows_advance_one_line_each() {
        let mut out = String::new();
        let items = [item("Heat", true), item("Casino", false)];
        assert_eq!(render_table_rows(&mut out, 8, &items, &Theme::default(), 80), 10);
        assert!(out.contains("Heat"));
        assert!(out.contains("1995"));
        assert!(out.contains("8.3"));
    }

    #[test]
    fn selected_row_uses_selection_background() {
        let theme = Theme::default();
        let mut out = String::new();
        render_table_rows(&mut out, 1, &[item("Heat", true)], &theme, 80);
        assert!(out.contains(&Theme::bg(&theme.colors.selection_bg)));
    }
}
