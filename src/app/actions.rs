//! Side effects requested by the event handler.
//!
//! The handler never calls host functions. It returns a `Vec<Action>` and
//! the plugin runtime executes them in order.
//!
//! ```
//! use cinescout::app::Action;
//! use cinescout::worker::WorkerMessage;
//!
//! let actions = vec![
//!     Action::ScheduleTimer { seconds: 1.0 },
//!     Action::PostToWorker(WorkerMessage::load_trending(5)),
//! ];
//! assert_eq!(actions.len(), 2);
//! ```

use crate::net::HttpRequest;
use crate::worker::WorkerMessage;

/// Commands for the plugin runtime.
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    /// Hides the plugin pane.
    CloseFocus,

    /// Arms a host timer. The host answers with a timer event after
    /// `seconds`, which the runtime maps to
    /// [`Event::DebounceElapsed`](crate::app::Event::DebounceElapsed).
    ScheduleTimer { seconds: f64 },

    /// Issues an HTTP request through the host.
    WebRequest(HttpRequest),

    /// Posts a message to the trending worker thread.
    PostToWorker(WorkerMessage),
}
