//! Zellij plugin wrapper and entry point.
//!
//! This is the only place that talks to the Zellij host. It maps host events
//! to library [`Event`]s, executes the returned [`Action`]s, and hosts the
//! trending worker.
//!
//! ```text
//! ┌───────────────────────────────┐
//! │      Zellij plugin thread     │
//! │  State ── handle_event ──►    │──► web_request / set_timeout / hide_self
//! │    ▲                          │
//! │    │ CustomMessage            │
//! │    │           PluginMessage  │
//! │  ┌─┴──────────────────────┐   │
//! │  │ CinescoutWorker        │   │  ← local trending.json
//! │  │ (worker thread)        │   │
//! │  └────────────────────────┘   │
//! └───────────────────────────────┘
//! ```
//!
//! # Plugin Lifecycle
//!
//! 1. **Load**: Parse and validate config, initialize tracing, build `AppState`
//! 2. **Permissions**: Request `WebAccess` and `FullHdAccess`
//! 3. **Mount**: On grant, the popular-movies search and trending read start
//! 4. **Update**: Keys, timers, web results, worker messages → `handle_event`
//! 5. **Render**: Library renderer, or the fatal screen if config was invalid
//!
//! # Event Mapping
//!
//! - `Timer` → `Event::DebounceElapsed`
//! - `WebRequestResult` → `Event::WebResponse`
//! - `CustomMessage("cinescout")` → `Event::WorkerResponse`
//! - `PermissionRequestResult(Granted)` → `Event::Mounted`
//! - `PermissionRequestResult(Denied)` → `Event::PermissionDenied`
//!
//! # Keybindings
//!
//! Global:
//! - `Ctrl+n` / `Down`: Move down
//! - `Ctrl+p` / `Up`: Move up
//!
//! In search mode:
//! - printable characters: Type
//! - `Backspace`: Delete
//! - `Ctrl+u`: Clear query
//! - `Enter` / `Tab` / `Esc`: Browse results
//!
//! In browse mode:
//! - `j` / `k`: Move
//! - `/` / `i`: Back to search
//! - `q` / `Esc`: Close plugin

#![allow(clippy::multiple_crate_versions)]

#[cfg(target_family = "wasm")]
use std::collections::BTreeMap;
#[cfg(target_family = "wasm")]
use zellij_tile::prelude::*;
#[cfg(target_family = "wasm")]
use zellij_tile::shim::{post_message_to, post_message_to_plugin};

#[cfg(target_family = "wasm")]
use cinescout::net::{HttpMethod, WebResponse};
#[cfg(target_family = "wasm")]
use cinescout::worker::{init_worker_tracing, TrendingWorker, WorkerMessage, WorkerResponse, WORKER_MESSAGE_NAME};
#[cfg(target_family = "wasm")]
use cinescout::{handle_event, Action, AppState, Config, Event, InputMode, Theme};

#[cfg(target_family = "wasm")]
register_plugin!(State);
#[cfg(target_family = "wasm")]
register_worker!(CinescoutWorker, cinescout_worker, CINESCOUT_WORKER);

/// The plugin is only meaningful inside Zellij.
#[cfg(not(target_family = "wasm"))]
fn main() {
    eprintln!("cinescout is a Zellij plugin; build it with `cargo build --target wasm32-wasip1`");
}

/// Plugin state wrapper.
#[cfg(target_family = "wasm")]
#[derive(Default)]
struct State {
    /// `None` until load, or when the configuration was invalid.
    app: Option<AppState>,

    /// Configuration error shown instead of the UI.
    startup_error: Option<String>,
}

#[cfg(target_family = "wasm")]
impl ZellijPlugin for State {
    fn load(&mut self, configuration: BTreeMap<String, String>) {
        let config = Config::from_zellij(&configuration);
        cinescout::observability::init_tracing(config.as_ref().unwrap_or(&Config::default()));

        let span = tracing::debug_span!("plugin_load");
        let _guard = span.entered();

        let config = match config {
            Ok(config) => config,
            Err(e) => {
                tracing::error!(error = %e, "invalid configuration, plugin disabled");
                self.startup_error = Some(e.to_string());
                return;
            }
        };

        self.app = Some(cinescout::initialize(&config));
        tracing::debug!("app state initialized");

        request_permission(&[PermissionType::WebAccess, PermissionType::FullHdAccess]);
        subscribe(&[
            EventType::Key,
            EventType::Timer,
            EventType::WebRequestResult,
            EventType::CustomMessage,
            EventType::PermissionRequestResult,
        ]);

        tracing::debug!("plugin load complete - waiting for permissions");
    }

    fn update(&mut self, event: zellij_tile::prelude::Event) -> bool {
        let event_name = Self::get_event_name(&event);
        let span = tracing::debug_span!("plugin_update_event", otel.name = %format!("plugin_update::{event_name}"), event_type = %event_name);
        let _guard = span.entered();

        let Some(app) = self.app.as_ref() else {
            return false;
        };

        let our_event = match event {
            zellij_tile::prelude::Event::Key(ref key) => Self::map_key_event(app.input_mode, key),
            zellij_tile::prelude::Event::Timer(_) => Some(Event::DebounceElapsed),
            zellij_tile::prelude::Event::WebRequestResult(status, _headers, body, context) => {
                Self::map_web_result_event(status, body, &context)
            }
            zellij_tile::prelude::Event::CustomMessage(message, payload) => {
                Self::map_custom_message_event(&message, &payload)
            }
            zellij_tile::prelude::Event::PermissionRequestResult(PermissionStatus::Granted) => {
                tracing::info!("permissions granted - mounting");
                Some(Event::Mounted)
            }
            zellij_tile::prelude::Event::PermissionRequestResult(PermissionStatus::Denied) => {
                tracing::warn!("permissions denied - searches cannot run");
                Some(Event::PermissionDenied)
            }
            _ => None,
        };

        our_event.is_some_and(|event| self.dispatch(&event))
    }

    fn render(&mut self, rows: usize, cols: usize) {
        match (&self.app, &self.startup_error) {
            (Some(app), _) => cinescout::ui::render(app, rows, cols),
            (None, Some(error)) => cinescout::ui::render_startup_error(error, &Theme::default(), rows, cols),
            (None, None) => {}
        }
    }
}

#[cfg(target_family = "wasm")]
impl State {
    /// Runs one library event and executes its actions. Returns whether to
    /// re-render.
    fn dispatch(&mut self, event: &Event) -> bool {
        let Some(app) = self.app.as_mut() else {
            return false;
        };

        match handle_event(app, event) {
            Ok((should_render, actions)) => {
                tracing::debug!(action_count = actions.len(), should_render, "event handled");
                for action in &actions {
                    Self::execute_action(action);
                }
                should_render
            }
            Err(e) => {
                tracing::warn!(error = %e, "error handling event");
                false
            }
        }
    }

    fn get_event_name(event: &zellij_tile::prelude::Event) -> String {
        match event {
            zellij_tile::prelude::Event::Key(key) => format!("Key({:?})", key.bare_key),
            zellij_tile::prelude::Event::Timer(_) => "Timer".to_string(),
            zellij_tile::prelude::Event::WebRequestResult(status, ..) => format!("WebRequestResult({status})"),
            zellij_tile::prelude::Event::CustomMessage(msg, _) => format!("CustomMessage({msg})"),
            zellij_tile::prelude::Event::PermissionRequestResult(..) => "PermissionRequestResult".to_string(),
            _ => "Other".to_string(),
        }
    }

    fn map_key_event(mode: InputMode, key: &KeyWithModifier) -> Option<Event> {
        tracing::trace!(bare_key = ?key.bare_key, ?mode, "key event");

        let ctrl = key.key_modifiers.contains(&KeyModifier::Ctrl);
        let alt = key.key_modifiers.contains(&KeyModifier::Alt);

        match key.bare_key {
            BareKey::Char('n') if ctrl => return Some(Event::KeyDown),
            BareKey::Char('p') if ctrl => return Some(Event::KeyUp),
            BareKey::Down => return Some(Event::KeyDown),
            BareKey::Up => return Some(Event::KeyUp),
            _ => {}
        }

        match mode {
            InputMode::Search => match key.bare_key {
                BareKey::Char('u') if ctrl => Some(Event::ClearQuery),
                BareKey::Char(c) if !ctrl && !alt => Some(Event::Char(c)),
                BareKey::Backspace => Some(Event::Backspace),
                BareKey::Enter | BareKey::Tab | BareKey::Esc => Some(Event::FocusResults),
                _ => None,
            },
            InputMode::Browse => match key.bare_key {
                BareKey::Char('j') => Some(Event::KeyDown),
                BareKey::Char('k') => Some(Event::KeyUp),
                BareKey::Char('/' | 'i') => Some(Event::FocusSearch),
                BareKey::Char('q') | BareKey::Esc => Some(Event::CloseFocus),
                _ => None,
            },
        }
    }

    fn map_web_result_event(status: u16, body: Vec<u8>, context: &BTreeMap<String, String>) -> Option<Event> {
        match WebResponse::from_host(status, body, context) {
            Ok(response) => {
                tracing::debug!(status, context = ?response.context, "web response received");
                Some(Event::WebResponse(response))
            }
            Err(e) => {
                tracing::debug!(error = %e, "ignoring web response without our context");
                None
            }
        }
    }

    fn map_custom_message_event(message: &str, payload: &str) -> Option<Event> {
        if message != WORKER_MESSAGE_NAME {
            tracing::debug!(message_name = %message, "ignoring custom message with unknown name");
            return None;
        }

        match serde_json::from_str::<WorkerResponse>(payload) {
            Ok(response) => {
                tracing::debug!(response = ?response, "worker response received");
                Some(Event::WorkerResponse(response))
            }
            Err(e) => {
                tracing::warn!(error = %e, "failed to deserialize worker response");
                None
            }
        }
    }

    fn post_worker_message(message: &WorkerMessage) {
        match serde_json::to_string(message) {
            Ok(payload) => {
                tracing::debug!(payload_len = payload.len(), "posting message to worker");
                post_message_to(PluginMessage {
                    worker_name: Some(WORKER_MESSAGE_NAME.to_string()),
                    name: WORKER_MESSAGE_NAME.to_string(),
                    payload,
                });
            }
            Err(e) => {
                tracing::warn!(error = %e, "failed to serialize worker message");
            }
        }
    }

    #[tracing::instrument(level = "debug")]
    fn execute_action(action: &Action) {
        match action {
            Action::CloseFocus => {
                tracing::debug!("closing plugin focus");
                hide_self();
            }
            Action::ScheduleTimer { seconds } => set_timeout(*seconds),
            Action::WebRequest(request) => {
                let verb = match request.method {
                    HttpMethod::Get => HttpVerb::Get,
                    HttpMethod::Put => HttpVerb::Put,
                };
                web_request(
                    request.url.as_str(),
                    verb,
                    request.headers.clone(),
                    request.body.clone(),
                    request.host_context(),
                );
            }
            Action::PostToWorker(message) => Self::post_worker_message(message),
        }
    }
}

/// Worker thread entry point. Wraps the library worker, which holds the
/// open store and so is not itself serializable.
#[cfg(target_family = "wasm")]
#[derive(Default, serde::Serialize, serde::Deserialize)]
struct CinescoutWorker {
    #[serde(skip)]
    inner: TrendingWorker,
}

#[cfg(target_family = "wasm")]
impl ZellijWorker<'_> for CinescoutWorker {
    fn on_message(&mut self, message: String, payload: String) {
        init_worker_tracing();

        match self.inner.handle_payload(&payload) {
            Ok(response) => post_message_to_plugin(PluginMessage {
                name: message,
                payload: response,
                worker_name: None,
            }),
            Err(e) => tracing::warn!(error = %e, "worker dropped message"),
        }
    }
}
