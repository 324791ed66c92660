//! Application layer coordinating state, events, and actions.
//!
//! This layer sits between the plugin runtime (main.rs) and the catalog,
//! trending, and worker layers. It owns the search orchestration and never
//! touches the host directly.
//!
//! # Architecture
//!
//! ```text
//! Keys / Timer / WebRequestResult → Events → handle_event → State → Actions
//!                                       ↑                              ↓
//!                                       └───── responses ◄── host / worker
//! ```
//!
//! # Modules
//!
//! - [`actions`]: Side effect commands emitted by the event handler
//! - [`debounce`]: Timer-reset debouncer for the query input
//! - [`handler`]: Event processing and the search orchestrator
//! - [`modes`]: Input mode type
//! - [`state`]: Central application state and view model computation
//!
//! # Example
//!
//! ```rust
//! use cinescout::app::{handle_event, Action, AppState, Event};
//! use cinescout::catalog::MovieCatalog;
//! use cinescout::trending::{TrendingBackend, TrendingStore};
//! use cinescout::ui::Theme;
//! use std::time::Duration;
//!
//! let mut state = AppState::new(
//!     MovieCatalog::new("https://api.themoviedb.org/3", "token"),
//!     TrendingStore::new(TrendingBackend::Local, 5),
//!     "https://image.tmdb.org/t/p/w500",
//!     Duration::from_millis(1000),
//!     Theme::default(),
//! );
//!
//! let (_, actions) = handle_event(&mut state, &Event::Mounted)?;
//! assert_eq!(actions.len(), 2);
//!
//! let (_, actions) = handle_event(&mut state, &Event::Char('d'))?;
//! assert_eq!(actions, vec![Action::ScheduleTimer { seconds: 1.0 }]);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod actions;
pub mod debounce;
pub mod handler;
pub mod modes;
pub mod state;

pub use actions::Action;
pub use debounce::{Debouncer, DEFAULT_DEBOUNCE};
pub use handler::{handle_event, Event, FETCH_FAILED_MESSAGE, PERMISSION_DENIED_MESSAGE};
pub use modes::InputMode;
pub use state::{AppState, PendingWrite, SearchState};
