//! Top-level rendering entry points.
//!
//! ```text
//! AppState → compute_viewmodel → UIViewModel → components → frame → stdout
//! ```

use crate::app::AppState;
use crate::ui::components;
use crate::ui::theme::Theme;

/// Renders the plugin UI for a `rows` x `cols` pane to stdout.
pub fn render(state: &AppState, rows: usize, cols: usize) {
    print!("{}", render_to_string(state, rows, cols));
}

/// Builds the frame [`render`] prints.
#[must_use]
pub fn render_to_string(state: &AppState, rows: usize, cols: usize) -> String {
    let viewmodel = state.compute_viewmodel(rows, cols);
    let mut out = String::new();
    components::render_screen(&mut out, &viewmodel, &state.theme, rows, cols);
    out
}

/// Renders the startup failure screen to stdout.
pub fn render_startup_error(message: &str, theme: &Theme, rows: usize, cols: usize) {
    let mut out = String::new();
    components::render_fatal(&mut out, message, theme, rows, cols);
    print!("{out}");
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::MovieCatalog;
    use crate::domain::{MovieSummary, TrendingEntry};
    use crate::trending::{TrendingBackend, TrendingStore};
    use std::time::Duration;

    fn state() -> AppState {
        AppState::new(
            MovieCatalog::new("https://api.test/3", "k"),
            TrendingStore::new(TrendingBackend::Local, 5),
            "https://img.test/w500",
            Duration::from_millis(1000),
            Theme::default(),
        )
    }

    #[test]
    fn loading_shows_spinner_not_results() {
        let mut s = state();
        s.search.results = vec![MovieSummary::new(1, "Heat")];
        s.search.is_loading = true;

        let frame = render_to_string(&s, 24, 80);
        assert!(frame.contains("Loading movies"));
        assert!(!frame.contains("Heat"));
    }

    #[test]
    fn error_text_is_rendered() {
        let mut s = state();
        s.search.error = Some("Error fetching movies. Please try again later.".to_string());

        let frame = render_to_string(&s, 24, 80);
        assert!(frame.contains("Error fetching movies. Please try again later."));
        assert!(!frame.contains("TITLE"));
    }

    #[test]
    fn results_render_as_table() {
        let mut s = state();
        s.search.results = vec![MovieSummary::new(1, "Heat"), MovieSummary::new(2, "Ronin")];

        let frame = render_to_string(&s, 24, 80);
        assert!(frame.contains("TITLE"));
        assert!(frame.contains("Heat"));
        assert!(frame.contains("Ronin"));
        assert!(frame.contains("Popular Movies"));
    }

    #[test]
    fn trending_strip_renders_alongside_error() {
        let mut s = state();
        s.search.error = Some("boom".to_string());
        s.search.trending = TrendingEntry::rank_all(vec![TrendingEntry {
            id: "x".to_string(),
            search_term: "heat".to_string(),
            movie_id: 1,
            title: "Heat".to_string(),
            poster_url: None,
            count: 2,
            rank: 0,
        }]);

        let frame = render_to_string(&s, 24, 80);
        assert!(frame.contains("Trending"));
        assert!(frame.contains("Heat"));
        assert!(frame.contains("boom"));
    }

    #[test]
    fn empty_results_show_empty_state() {
        let frame = render_to_string(&state(), 24, 80);
        assert!(frame.contains("No movies found"));
    }
}
