//! Admin console for the Election Khelo quiz API.
//!
//! The crate is a thin client: every screen and CLI command fetches JSON from
//! the remote API, renders it, and posts edits back through the same API.
//! Entities live on the server; this process only holds a transient copy.

pub mod admin_tui;
pub mod api;
pub mod cli;
pub mod config;
pub mod models;
pub mod session;
