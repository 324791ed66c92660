//! Application state and view model computation.
//!
//! [`AppState`] owns everything the plugin thread knows: the search state
//! the view renders, the debouncer, request bookkeeping (latest search
//! sequence number, pending trending writes), and UI state (selection, input
//! mode, theme). It is mutated only by [`handle_event`](crate::app::handle_event).
//!
//! View models are computed on demand from a state snapshot; see
//! [`AppState::compute_viewmodel`].

use super::debounce::Debouncer;
use super::modes::InputMode;
use crate::catalog::MovieCatalog;
use crate::domain::{trending_key, MovieSummary, TrendingEntry};
use crate::net::HttpRequest;
use crate::storage::MovieSnapshot;
use crate::trending::TrendingStore;
use crate::ui::theme::Theme;
use crate::ui::viewmodel::{
    title_column_width, DisplayItem, EmptyState, FooterInfo, HeaderInfo, ResultsBody, SearchBarInfo, TrendingItem,
    UIViewModel,
};
use fuzzy_matcher::skim::SkimMatcherV2;
use std::collections::BTreeMap;
use std::time::Duration;

/// Rows used by everything except the result rows: blank line, header,
/// border, search box (3), section title, table header, border, footer.
const CHROME_ROWS: usize = 10;

/// The state the view renders.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SearchState {
    /// Text as typed, updated on every keystroke.
    pub raw_query: String,
    /// Debounced query that the current results belong to.
    pub effective_query: String,
    pub results: Vec<MovieSummary>,
    pub is_loading: bool,
    /// User-visible error text, if the last search failed.
    pub error: Option<String>,
    pub trending: Vec<TrendingEntry>,
}

/// The search request whose response is still awaited.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct InFlightSearch {
    pub seq: u64,
    pub query: String,
}

/// A trending write that has been queued but not completed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingWrite {
    pub search_term: String,
    pub movie: MovieSnapshot,
    /// Trending key of the (query, movie) pair this write counts.
    pub key: String,
    /// The write's first request has been issued.
    pub running: bool,
}

/// Central application state container.
#[derive(Debug, Clone)]
pub struct AppState {
    pub search: SearchState,
    pub debouncer: Debouncer,

    /// Index into `search.results`.
    pub selected_index: usize,
    pub input_mode: InputMode,
    pub theme: Theme,

    pub(crate) catalog: MovieCatalog,
    pub(crate) trending_store: TrendingStore,
    pub(crate) image_base_url: String,

    pub(crate) last_seq: u64,
    pub(crate) in_flight: Option<InFlightSearch>,

    pub(crate) next_write_id: u64,
    pub(crate) pending_writes: BTreeMap<u64, PendingWrite>,

    /// Trending writes that failed this session. Diagnostic only.
    pub trending_write_failures: u64,
    pub last_trending_write_error: Option<String>,

    pub(crate) mounted: bool,
}

impl AppState {
    /// Creates the state for a freshly loaded plugin. Nothing is requested
    /// until the `Mounted` event.
    #[must_use]
    pub fn new(
        catalog: MovieCatalog,
        trending_store: TrendingStore,
        image_base_url: impl Into<String>,
        debounce: Duration,
        theme: Theme,
    ) -> Self {
        Self {
            search: SearchState::default(),
            debouncer: Debouncer::new(debounce),
            selected_index: 0,
            input_mode: InputMode::default(),
            theme,
            catalog,
            trending_store,
            image_base_url: image_base_url.into(),
            last_seq: 0,
            in_flight: None,
            next_write_id: 0,
            pending_writes: BTreeMap::new(),
            trending_write_failures: 0,
            last_trending_write_error: None,
            mounted: false,
        }
    }

    /// Marks a search as started and returns its request.
    ///
    /// Any earlier in-flight search is superseded: its response will be
    /// recognized as stale and dropped.
    pub(crate) fn begin_search(&mut self, query: &str) -> HttpRequest {
        self.last_seq += 1;
        self.in_flight = Some(InFlightSearch {
            seq: self.last_seq,
            query: query.to_string(),
        });
        self.search.is_loading = true;
        self.search.error = None;
        self.catalog.request(query, self.last_seq)
    }

    /// Takes the in-flight search if `seq` is the latest one issued.
    pub(crate) fn resolve_search(&mut self, seq: u64) -> Option<InFlightSearch> {
        if self.in_flight.as_ref().is_some_and(|f| f.seq == seq) {
            self.search.is_loading = false;
            self.in_flight.take()
        } else {
            None
        }
    }

    /// Registers a trending write for `movie` and returns its id.
    pub(crate) fn queue_trending_write(&mut self, search_term: &str, movie: &MovieSummary) -> (u64, MovieSnapshot) {
        self.next_write_id += 1;
        let snapshot = MovieSnapshot {
            movie_id: movie.id,
            title: movie.title.clone(),
            poster_url: movie.poster_url(&self.image_base_url),
        };
        self.pending_writes.insert(
            self.next_write_id,
            PendingWrite {
                search_term: search_term.to_string(),
                key: trending_key(search_term, movie.id),
                movie: snapshot.clone(),
                running: false,
            },
        );
        (self.next_write_id, snapshot)
    }

    /// Whether a write other than `write_id` for the same pair is running.
    pub(crate) fn pair_write_running(&self, write_id: u64) -> bool {
        let Some(write) = self.pending_writes.get(&write_id) else {
            return false;
        };
        self.pending_writes
            .iter()
            .any(|(&id, other)| id != write_id && other.running && other.key == write.key)
    }

    /// Oldest queued write for `key` that has not started yet.
    pub(crate) fn next_queued_write(&self, key: &str) -> Option<u64> {
        self.pending_writes
            .iter()
            .find(|(_, write)| !write.running && write.key == key)
            .map(|(&id, _)| id)
    }

    /// Number of trending writes still waiting for completion.
    #[must_use]
    pub fn pending_write_count(&self) -> usize {
        self.pending_writes.len()
    }

    pub fn move_selection_down(&mut self) {
        if self.search.results.is_empty() {
            return;
        }
        self.selected_index = (self.selected_index + 1) % self.search.results.len();
    }

    pub fn move_selection_up(&mut self) {
        if self.search.results.is_empty() {
            return;
        }
        if self.selected_index == 0 {
            self.selected_index = self.search.results.len() - 1;
        } else {
            self.selected_index -= 1;
        }
    }

    /// Builds a renderable view model for a `rows` x `cols` pane.
    ///
    /// Rows are windowed around the selection so it stays visible; when the
    /// selection is near the end the window is pulled back to stay full.
    #[must_use]
    pub fn compute_viewmodel(&self, rows: usize, cols: usize) -> UIViewModel {
        UIViewModel {
            header: HeaderInfo {
                title: " Cinescout ".to_string(),
            },
            search_bar: SearchBarInfo {
                query: self.search.raw_query.clone(),
                is_pending: self.debouncer.is_pending(),
                is_focused: self.input_mode == InputMode::Search,
            },
            trending: self.compute_trending(),
            section_title: self.compute_section_title(),
            body: self.compute_body(rows, cols),
            footer: self.compute_footer(),
        }
    }

    fn compute_trending(&self) -> Vec<TrendingItem> {
        self.search
            .trending
            .iter()
            .map(|entry| TrendingItem {
                rank: entry.rank,
                title: entry.title.clone(),
            })
            .collect()
    }

    fn compute_section_title(&self) -> String {
        if self.search.effective_query.is_empty() {
            "Popular Movies".to_string()
        } else {
            format!("Results for \"{}\"", self.search.effective_query)
        }
    }

    fn compute_body(&self, rows: usize, cols: usize) -> ResultsBody {
        if self.search.is_loading {
            return ResultsBody::Loading;
        }
        if let Some(error) = &self.search.error {
            return ResultsBody::Error(error.clone());
        }
        if self.search.results.is_empty() {
            return ResultsBody::Empty(EmptyState {
                message: "No movies found".to_string(),
                subtitle: "Try a different title".to_string(),
            });
        }

        let chrome = CHROME_ROWS + usize::from(!self.search.trending.is_empty());
        let available_rows = rows.saturating_sub(chrome).max(1);
        let total = self.search.results.len();

        let mut visible_start = self.selected_index.saturating_sub(available_rows / 2);
        let visible_end = (visible_start + available_rows).min(total);
        if visible_end - visible_start < available_rows && total >= available_rows {
            visible_start = visible_end.saturating_sub(available_rows);
        }

        let title_width = title_column_width(cols);
        let matcher = (!self.search.effective_query.is_empty()).then(SkimMatcherV2::default);

        let items = self.search.results[visible_start..visible_end]
            .iter()
            .enumerate()
            .map(|(offset, movie)| {
                self.compute_display_item(movie, visible_start + offset, title_width, matcher.as_ref())
            })
            .collect();

        ResultsBody::Rows {
            items,
            selected_index: self.selected_index.saturating_sub(visible_start),
        }
    }

    fn compute_display_item(
        &self,
        movie: &MovieSummary,
        absolute_idx: usize,
        title_width: usize,
        matcher: Option<&SkimMatcherV2>,
    ) -> DisplayItem {
        let title = truncate_chars(&movie.title, title_width.saturating_sub(2));
        let title_len = title.chars().count();

        let highlight_ranges = matcher.map_or_else(Vec::new, |m| {
            self.compute_highlight_ranges(&movie.title, m)
                .into_iter()
                .filter(|&(start, _)| start < title_len)
                .map(|(start, end)| (start, end.min(title_len)))
                .collect()
        });

        DisplayItem {
            title,
            year: movie.release_year().unwrap_or("----").to_string(),
            rating: movie.rating_label(),
            language: movie
                .original_language
                .as_deref()
                .unwrap_or("--")
                .to_uppercase(),
            is_selected: absolute_idx == self.selected_index,
            highlight_ranges,
        }
    }

    /// Coalesces fuzzy match indices into `(start, end)` character ranges.
    fn compute_highlight_ranges(&self, text: &str, matcher: &SkimMatcherV2) -> Vec<(usize, usize)> {
        use fuzzy_matcher::FuzzyMatcher;

        let Some((_score, indices)) = matcher.fuzzy_indices(text, &self.search.effective_query) else {
            return vec![];
        };

        let mut ranges: Vec<(usize, usize)> = Vec::new();
        for idx in indices {
            match ranges.last_mut() {
                Some((_, end)) if *end == idx => *end = idx + 1,
                _ => ranges.push((idx, idx + 1)),
            }
        }
        ranges
    }

    fn compute_footer(&self) -> FooterInfo {
        let keybindings = match self.input_mode {
            InputMode::Search => "Type to search  Ctrl+u: clear  Ctrl+n/p: move  Enter/Esc: browse",
            InputMode::Browse => "j/k: move  /: search  q/Esc: close",
        };
        FooterInfo {
            keybindings: keybindings.to_string(),
        }
    }
}

/// Truncates to `max` characters, marking the cut with `...`.
fn truncate_chars(text: &str, max: usize) -> String {
    if text.chars().count() <= max {
        return text.to_string();
    }
    let kept: String = text.chars().take(max.saturating_sub(3)).collect();
    format!("{kept}...")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::trending::{TrendingBackend, TrendingStore};

    fn state() -> AppState {
        AppState::new(
            MovieCatalog::new("https://api.test/3", "k"),
            TrendingStore::new(TrendingBackend::Local, 5),
            "https://img.test/w500",
            Duration::from_millis(1000),
            Theme::default(),
        )
    }

    fn movies(n: u64) -> Vec<MovieSummary> {
        (1..=n).map(|id| MovieSummary::new(id, format!("Movie {id}"))).collect()
    }

    #[test]
    fn selection_wraps_both_ways() {
        let mut s = state();
        s.search.results = movies(3);

        s.move_selection_up();
        assert_eq!(s.selected_index, 2);
        s.move_selection_down();
        assert_eq!(s.selected_index, 0);
    }

    #[test]
    fn selection_on_empty_results_is_noop() {
        let mut s = state();
        s.move_selection_down();
        s.move_selection_up();
        assert_eq!(s.selected_index, 0);
    }

    #[test]
    fn newer_search_supersedes_older() {
        let mut s = state();
        let first = s.begin_search("a");
        let second = s.begin_search("ab");

        assert_ne!(first.context, second.context);
        assert!(s.resolve_search(1).is_none());
        assert!(s.search.is_loading);
        assert_eq!(s.resolve_search(2).map(|f| f.query), Some("ab".to_string()));
        assert!(!s.search.is_loading);
    }

    #[test]
    fn loading_body_takes_precedence() {
        let mut s = state();
        s.search.results = movies(2);
        s.search.error = Some("boom".to_string());
        s.search.is_loading = true;

        assert!(matches!(s.compute_viewmodel(30, 80).body, ResultsBody::Loading));
    }

    #[test]
    fn error_body_hides_stale_results() {
        let mut s = state();
        s.search.results = movies(2);
        s.search.error = Some("boom".to_string());

        assert!(matches!(s.compute_viewmodel(30, 80).body, ResultsBody::Error(ref e) if e == "boom"));
    }

    #[test]
    fn rows_are_windowed_around_selection() {
        let mut s = state();
        s.search.results = movies(50);
        s.selected_index = 49;

        let ResultsBody::Rows { items, selected_index } = s.compute_viewmodel(20, 80).body else {
            panic!("expected rows");
        };
        assert_eq!(items.len(), 20 - CHROME_ROWS);
        assert!(items[selected_index].is_selected);
        assert_eq!(items[selected_index].title, "Movie 50");
    }

    #[test]
    fn section_title_reflects_effective_query() {
        let mut s = state();
        assert_eq!(s.compute_viewmodel(30, 80).section_title, "Popular Movies");

        s.search.effective_query = "dune".to_string();
        assert_eq!(s.compute_viewmodel(30, 80).section_title, "Results for \"dune\"");
    }

    #[test]
    fn highlights_follow_effective_query() {
        let mut s = state();
        s.search.results = vec![MovieSummary::new(1, "Batman Begins")];
        s.search.effective_query = "bat".to_string();

        let ResultsBody::Rows { items, .. } = s.compute_viewmodel(30, 80).body else {
            panic!("expected rows");
        };
        assert_eq!(items[0].highlight_ranges, vec![(0, 3)]);
    }

    #[test]
    fn truncated_titles_fit_the_rendered_title_column() {
        let mut s = state();
        s.search.results = vec![MovieSummary::new(1, "x".repeat(200))];

        for cols in [0, 30, 80, 200] {
            let ResultsBody::Rows { items, .. } = s.compute_viewmodel(30, cols).body else {
                panic!("expected rows");
            };
            assert!(1 + items[0].title.chars().count() <= title_column_width(cols));
        }
    }

    #[test]
    fn long_titles_are_truncated_on_char_boundaries() {
        assert_eq!(truncate_chars("Amélie", 10), "Amélie");
        assert_eq!(truncate_chars("Crouching Tiger, Hidden Dragon", 10), "Crouchi...");
        assert_eq!(truncate_chars("ééééééééééé", 6), "ééé...");
    }
}
