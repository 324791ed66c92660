//! Trending strip renderer.

use crate::ui::helpers::position_cursor;
use crate::ui::theme::Theme;
use crate::ui::viewmodel::TrendingItem;

/// Renders `Trending  1 Title  2 Title ...` on one line at `row`.
///
/// Entries that do not fit in `cols` are dropped whole. Returns the next
/// row; nothing is drawn and `row` is returned when `items` is empty.
pub fn render_trending(out: &mut String, row: usize, items: &[TrendingItem], theme: &Theme, cols: usize) -> usize {
    if items.is_empty() {
        return row;
    }

    let label = " Trending ";
    position_cursor(out, row, 1);
    out.push_str(Theme::bold());
    out.push_str(&Theme::fg(&theme.colors.header_fg));
    out.push_str(label);
    out.push_str(Theme::reset());

    let mut used = label.len();
    for item in items {
        let rank = format!(" {} ", item.rank);
        let width = rank.len() + item.title.chars().count() + 1;
        if used + width > cols {
            break;
        }
        out.push_str(Theme::bold());
        out.push_str(&Theme::fg(&theme.colors.trending_rank_fg));
        out.push_str(&rank);
        out.push_str(Theme::reset());
        out.push_str(&Theme::fg(&theme.colors.text_normal));
        out.push_str(&item.title);
        out.push(' ');
        used += width;
    }
    out.push_str(&" ".repeat(cols.saturating_sub(used)));
    out.push_str(Theme::reset());

    row + 1
}
