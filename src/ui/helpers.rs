//! Shared rendering utilities.
//!
//! Components append ANSI-styled text to a frame buffer instead of printing
//! directly, so a whole screen is emitted with a single `print!` and can be
//! inspected in tests.

use crate::ui::theme::Theme;

/// Moves the cursor to a 1-indexed `row`/`col`.
pub fn position_cursor(out: &mut String, row: usize, col: usize) {
    out.push_str(&format!("\u{1b}[{row};{col}H"));
}

/// Appends `text` padded with spaces to exactly `width` characters.
///
/// Text longer than `width` is cut on a character boundary.
pub fn push_padded(out: &mut String, text: &str, width: usize) {
    let mut len = 0;
    for c in text.chars().take(width) {
        out.push(c);
        len += 1;
    }
    out.push_str(&" ".repeat(width - len));
}

/// Appends `text` centered in a line of `cols` characters.
pub fn push_centered(out: &mut String, text: &str, cols: usize) {
    let len = text.chars().count().min(cols);
    let padding = (cols - len) / 2;
    out.push_str(&" ".repeat(padding));
    push_padded(out, text, cols - padding);
}

/// Appends text with highlighted character ranges for fuzzy matches.
///
/// Ranges are `(start, end)` character indices, end exclusive. Selected rows
/// are drawn without match highlighting so the selection colors stay intact.
///
/// ```rust
/// use cinescout::ui::helpers::render_highlighted_text;
/// use cinescout::ui::Theme;
///
/// let theme = Theme::default();
/// let mut out = String::new();
/// render_highlighted_text(&mut out, "Batman", &[(0, 3)], &theme, false);
/// assert!(out.ends_with("man"));
/// assert!(out.contains("Bat"));
/// ```
pub fn render_highlighted_text(
    out: &mut String,
    text: &str,
    ranges: &[(usize, usize)],
    theme: &Theme,
    is_selected: bool,
) {
    if ranges.is_empty() || is_selected {
        out.push_str(text);
        return;
    }

    let chars: Vec<char> = text.chars().collect();
    let mut current_pos = 0;

    for &(start, end) in ranges {
        let start = start.clamp(current_pos, chars.len());
        let end = end.clamp(start, chars.len());

        out.extend(&chars[current_pos..start]);

        out.push_str(&Theme::fg(&theme.colors.match_highlight_fg));
        out.push_str(&Theme::bg(&theme.colors.match_highlight_bg));
        out.extend(&chars[start..end]);
        out.push_str(Theme::reset());
        out.push_str(&Theme::fg(&theme.colors.text_normal));

        current_pos = end;
    }

    out.extend(&chars[current_pos..]);
}
