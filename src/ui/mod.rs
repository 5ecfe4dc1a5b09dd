//! Terminal user interface built on [ratatui](https://docs.rs/ratatui).
//!
//! The UI is organized into three layers:
//!
//! - **[`app`]** — application state, keyboard event loop, playback controls
//! - **[`panes`]** — stateless render functions for each visible pane
//!   (algorithm state, step narration, progress, status bar)
//! - **[`theme`]** — centralized color palette used by all panes
//!
//! The entry point for consumers is [`App`]: construct it with a recorded
//! [`Trace`](crate::step::Trace) and call [`App::run`] to start the event
//! loop.  The app subscribes itself to the playback controller as the
//! engine's [`Sink`](crate::playback::Sink); not part of the stable library
//! API.
//!
//! [`App::run`]: app::App::run

pub mod app;
pub mod panes;
pub mod theme;

pub use app::App;
