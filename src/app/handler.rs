//! Event handling and state transitions.
//!
//! [`handle_event`] is the search orchestrator. It consumes keystrokes,
//! timer expiries, host HTTP responses, and worker responses, mutates
//! [`AppState`], and returns the actions the runtime must execute. It never
//! performs I/O.
//!
//! # Flows
//!
//! ```text
//! Char/Backspace ──► debouncer.schedule ──► ScheduleTimer
//! DebounceElapsed ──► debouncer.fire ──► effective query changed? ──► run_search
//! run_search ──► WebRequest(Movies{seq})
//! WebResponse(Movies{seq}) ──► latest seq? ──► results / error ──► trending write
//! Mounted ──► run_search("") + trending list
//! ```
//!
//! Query input is ignored until `Mounted`, so no search is issued before
//! the host grants web access.

use crate::app::{Action, AppState, InputMode, PendingWrite};
use crate::catalog::{self, CatalogOutcome};
use crate::domain::{CinescoutError, Result, TrendingEntry};
use crate::net::{RequestContext, WebResponse};
use crate::trending::{appwrite, TrendingBackend};
use crate::worker::WorkerResponse;

/// Message shown for any failure to reach or understand the movie catalog.
pub const FETCH_FAILED_MESSAGE: &str = "Error fetching movies. Please try again later.";

/// Message shown when the host refuses the permissions searches need.
pub const PERMISSION_DENIED_MESSAGE: &str = "Web access was denied. Reload the plugin and grant it to search movies.";

/// Events delivered to the orchestrator by the plugin runtime.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    /// Host permissions granted; the session starts.
    Mounted,
    /// Host permissions refused. Nothing will ever be fetched.
    PermissionDenied,

    /// Appends a character to the raw query.
    Char(char),
    /// Removes the last character of the raw query.
    Backspace,
    /// Empties the raw query.
    ClearQuery,
    /// A debounce timer armed by [`Action::ScheduleTimer`] expired.
    DebounceElapsed,

    /// Switches to browse mode.
    FocusResults,
    /// Switches to search mode.
    FocusSearch,
    KeyDown,
    KeyUp,
    CloseFocus,

    /// A host HTTP request completed.
    WebResponse(WebResponse),
    /// The trending worker answered.
    WorkerResponse(WorkerResponse),
}

/// Processes one event.
///
/// Returns whether the UI should re-render and the actions to execute in
/// order.
///
/// # Errors
///
/// Returns an error when a response cannot be matched to anything the
/// state expects (e.g. an upsert for an unknown write). The runtime logs
/// these; the state is left consistent.
pub fn handle_event(state: &mut AppState, event: &Event) -> Result<(bool, Vec<Action>)> {
    let _span = tracing::debug_span!("handle_event", event_type = ?event).entered();

    match event {
        Event::Mounted => Ok(handle_mounted(state)),
        Event::PermissionDenied => {
            tracing::warn!("web access denied, searches disabled");
            state.search.is_loading = false;
            state.search.error = Some(PERMISSION_DENIED_MESSAGE.to_string());
            Ok((true, vec![]))
        }
        Event::Char(_) | Event::Backspace | Event::ClearQuery | Event::DebounceElapsed if !state.mounted => {
            tracing::trace!("query input before mount ignored");
            Ok((false, vec![]))
        }
        Event::Char(c) => {
            if state.input_mode != InputMode::Search {
                return Ok((false, vec![]));
            }
            state.search.raw_query.push(*c);
            Ok((true, vec![schedule_commit(state)]))
        }
        Event::Backspace => {
            if state.input_mode != InputMode::Search || state.search.raw_query.pop().is_none() {
                return Ok((false, vec![]));
            }
            Ok((true, vec![schedule_commit(state)]))
        }
        Event::ClearQuery => {
            if state.search.raw_query.is_empty() {
                return Ok((false, vec![]));
            }
            state.search.raw_query.clear();
            Ok((true, vec![schedule_commit(state)]))
        }
        Event::DebounceElapsed => Ok(handle_debounce_elapsed(state)),
        Event::FocusResults => {
            state.input_mode = InputMode::Browse;
            Ok((true, vec![]))
        }
        Event::FocusSearch => {
            state.input_mode = InputMode::Search;
            Ok((true, vec![]))
        }
        Event::KeyDown => {
            state.move_selection_down();
            Ok((true, vec![]))
        }
        Event::KeyUp => {
            state.move_selection_up();
            Ok((true, vec![]))
        }
        Event::CloseFocus => Ok((false, vec![Action::CloseFocus])),
        Event::WebResponse(response) => handle_web_response(state, response),
        Event::WorkerResponse(response) => handle_worker_response(state, response),
    }
}

fn schedule_commit(state: &mut AppState) -> Action {
    let interval = state.debouncer.schedule(state.search.raw_query.clone());
    tracing::trace!(query = %state.search.raw_query, "debounce rescheduled");
    Action::ScheduleTimer {
        seconds: interval.as_secs_f64(),
    }
}

fn handle_mounted(state: &mut AppState) -> (bool, Vec<Action>) {
    if state.mounted {
        tracing::debug!("already mounted, ignoring");
        return (false, vec![]);
    }
    state.mounted = true;

    let query = state.search.effective_query.clone();
    let search = run_search(state, &query);
    let trending = load_trending(state);
    (true, vec![search, trending])
}

fn handle_debounce_elapsed(state: &mut AppState) -> (bool, Vec<Action>) {
    let Some(committed) = state.debouncer.fire() else {
        return (false, vec![]);
    };

    if committed == state.search.effective_query {
        tracing::debug!(query = %committed, "committed query unchanged, no search");
        return (true, vec![]);
    }

    state.search.effective_query.clone_from(&committed);
    state.selected_index = 0;
    let action = run_search(state, &committed);
    (true, vec![action])
}

/// Starts a catalog search for `query`.
///
/// Sets the loading flag, clears the error, and supersedes any search still
/// in flight.
pub fn run_search(state: &mut AppState, query: &str) -> Action {
    let request = state.begin_search(query);
    tracing::info!(query = %query, seq = state.last_seq, "search started");
    Action::WebRequest(request)
}

/// Starts a trending read.
pub fn load_trending(state: &AppState) -> Action {
    tracing::debug!(limit = state.trending_store.limit(), "loading trending");
    state.trending_store.list_action()
}

fn handle_web_response(state: &mut AppState, response: &WebResponse) -> Result<(bool, Vec<Action>)> {
    match response.context {
        RequestContext::Movies { seq } => Ok(handle_movies_response(state, seq, response)),
        RequestContext::TrendingList => {
            match appwrite::parse_list(response) {
                Ok(entries) => Ok((apply_trending(state, entries), vec![])),
                Err(e) => {
                    tracing::warn!(error = %e, "trending read failed");
                    Ok((false, vec![]))
                }
            }
        }
        RequestContext::TrendingLookup { write_id } => handle_trending_lookup(state, write_id, response),
        RequestContext::TrendingUpsert { write_id } => {
            let actions = match appwrite::parse_upsert(response) {
                Ok(()) => complete_write(state, write_id),
                Err(e) => fail_write(state, write_id, &e.to_string()),
            };
            Ok((false, actions))
        }
    }
}

fn handle_movies_response(state: &mut AppState, seq: u64, response: &WebResponse) -> (bool, Vec<Action>) {
    let Some(search) = state.resolve_search(seq) else {
        tracing::debug!(seq, latest = state.last_seq, "dropping stale search response");
        return (false, vec![]);
    };

    if !response.is_success() {
        let cause = CinescoutError::Transport {
            service: "catalog",
            status: response.status,
        };
        tracing::error!(query = %search.query, error = %cause, body = %response.body_text(), "search failed");
        state.search.error = Some(FETCH_FAILED_MESSAGE.to_string());
        return (true, vec![]);
    }

    match catalog::decode(&response.body) {
        Err(e) => {
            tracing::error!(query = %search.query, error = %e, "search response unreadable");
            state.search.error = Some(FETCH_FAILED_MESSAGE.to_string());
            (true, vec![])
        }
        Ok(CatalogOutcome::ProviderError(message)) => {
            tracing::warn!(query = %search.query, message = %message, "catalog reported an error");
            state.search.error = Some(message);
            state.search.results.clear();
            state.selected_index = 0;
            (true, vec![])
        }
        Ok(CatalogOutcome::Movies(movies)) => {
            tracing::info!(query = %search.query, count = movies.len(), "search completed");
            state.search.results = movies;
            state.selected_index = 0;

            let mut actions = vec![];
            if !search.query.is_empty() {
                if let Some(first) = state.search.results.first().cloned() {
                    let (write_id, snapshot) = state.queue_trending_write(&search.query, &first);
                    tracing::debug!(write_id, movie_id = snapshot.movie_id, "trending write queued");
                    actions.extend(start_write(state, write_id));
                }
            }
            (true, actions)
        }
    }
}

fn handle_trending_lookup(state: &mut AppState, write_id: u64, response: &WebResponse) -> Result<(bool, Vec<Action>)> {
    let pending = state
        .pending_writes
        .get(&write_id)
        .cloned()
        .ok_or_else(|| CinescoutError::Protocol(format!("lookup for unknown trending write {write_id}")))?;

    let TrendingBackend::Appwrite(client) = state.trending_store.backend() else {
        let actions = fail_write(state, write_id, "lookup response without a remote trending store");
        return Ok((false, actions));
    };

    match appwrite::parse_lookup(response) {
        Ok(count) => {
            let request = client.upsert_request(write_id, &pending.search_term, &pending.movie, count + 1);
            Ok((false, vec![Action::WebRequest(request)]))
        }
        Err(e) => Ok((false, fail_write(state, write_id, &e.to_string()))),
    }
}

fn handle_worker_response(state: &mut AppState, response: &WorkerResponse) -> Result<(bool, Vec<Action>)> {
    match response {
        WorkerResponse::TrendingLoaded { entries } => Ok((apply_trending(state, entries.clone()), vec![])),
        WorkerResponse::TrendingLoadFailed { message } => {
            tracing::warn!(error = %message, "trending read failed");
            Ok((false, vec![]))
        }
        WorkerResponse::SearchRecorded { write_id, count } => {
            tracing::debug!(write_id, count, "trending write confirmed");
            Ok((false, complete_write(state, *write_id)))
        }
        WorkerResponse::SearchRecordFailed { write_id, message } => Ok((false, fail_write(state, *write_id, message))),
    }
}

fn apply_trending(state: &mut AppState, entries: Vec<TrendingEntry>) -> bool {
    tracing::debug!(count = entries.len(), "trending loaded");
    if state.search.trending == entries {
        return false;
    }
    state.search.trending = entries;
    true
}

/// Issues the first request of a queued write.
///
/// Remote counts are read and then rewritten, so a remote write waits while
/// another write for the same pair is running.
fn start_write(state: &mut AppState, write_id: u64) -> Option<Action> {
    let remote = matches!(state.trending_store.backend(), TrendingBackend::Appwrite(_));
    if remote && state.pair_write_running(write_id) {
        tracing::debug!(write_id, "trending write queued behind a running write");
        return None;
    }

    let write = state.pending_writes.get_mut(&write_id)?;
    write.running = true;
    let write = write.clone();
    Some(state.trending_store.record_action(write_id, &write.search_term, &write.movie))
}

fn start_next_write(state: &mut AppState, finished: Option<PendingWrite>) -> Vec<Action> {
    let Some(next) = finished.and_then(|write| state.next_queued_write(&write.key)) else {
        return vec![];
    };
    start_write(state, next).into_iter().collect()
}

fn complete_write(state: &mut AppState, write_id: u64) -> Vec<Action> {
    let finished = state.pending_writes.remove(&write_id);
    if finished.is_none() {
        tracing::debug!(write_id, "completion for unknown trending write");
    }
    start_next_write(state, finished)
}

fn fail_write(state: &mut AppState, write_id: u64, message: &str) -> Vec<Action> {
    let finished = state.pending_writes.remove(&write_id);
    state.trending_write_failures += 1;
    state.last_trending_write_error = Some(message.to_string());
    tracing::warn!(write_id, error = %message, failures = state.trending_write_failures, "trending write failed");
    start_next_write(state, finished)
}
