//! Startup failure screen.

use crate::ui::helpers::{position_cursor, push_centered};
use crate::ui::theme::Theme;

/// Renders a configuration error in place of the whole UI.
///
/// Long messages wrap on word boundaries to the pane width.
pub fn render_fatal(out: &mut String, message: &str, theme: &Theme, rows: usize, cols: usize) {
    let mut row = 2;
    position_cursor(out, row, 1);
    out.push_str(Theme::bold());
    out.push_str(&Theme::fg(&theme.colors.error_fg));
    push_centered(out, "Cinescout cannot start", cols);
    out.push_str(Theme::reset());
    row += 2;

    for line in wrap(message, cols.saturating_sub(4).max(10)) {
        if row >= rows {
            break;
        }
        position_cursor(out, row, 1);
        out.push_str(&Theme::fg(&theme.colors.text_normal));
        push_centered(out, &line, cols);
        out.push_str(Theme::reset());
        row += 1;
    }

    if row + 1 < rows {
        position_cursor(out, row + 1, 1);
        out.push_str(&Theme::fg(&theme.colors.text_dim));
        push_centered(out, "Fix the plugin configuration and reload", cols);
        out.push_str(Theme::reset());
    }
}

fn wrap(text: &str, width: usize) -> Vec<String> {
    let mut lines = Vec::new();
    let mut line = String::new();
    for word in text.split_whitespace() {
        if !line.is_empty() && line.chars().count() + 1 + word.chars().count() > width {
            lines.push(std::mem::take(&mut line));
        }
        if !line.is_empty() {
            line.push(' ');
        }
        line.push_str(word);
    }
    if !line.is_empty() {
        lines.push(line);
    }
    lines
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wraps_on_word_boundaries() {
        assert_eq!(wrap("tmdb_api_key is required", 12), vec!["tmdb_api_key", "is required"]);
        assert!(wrap("   ", 10).is_empty());
    }

    #[test]
    fn shows_the_message() {
        let mut out = String::new();
        render_fatal(&mut out, "tmdb_api_key is required", &Theme::default(), 24, 80);
        assert!(out.contains("tmdb_api_key is required"));
    }
}
