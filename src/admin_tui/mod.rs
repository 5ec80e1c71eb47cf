//! Terminal user interface for the Election Khelo admin console.
//!
//! One screen per managed resource, a shared component kit for lists, forms,
//! and modal dialogs, and a single event loop consuming key presses and API
//! completions from the same channel.

pub mod app;
pub mod components;
pub mod events;
pub mod screens;
pub mod ui;

pub use app::{App, Screen};
pub use events::AppEvent;
