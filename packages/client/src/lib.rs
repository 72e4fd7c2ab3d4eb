//! Terminal chat client for Hiroba.
//!
//! Joins the chat under a display name, relays typed lines as chat messages,
//! signals typing with a debounce timer and reconnects when the connection
//! drops.

pub mod domain;
pub mod error;
pub mod formatter;
pub mod runner;
pub mod session;
pub mod typing;
pub mod ui;
pub mod view;

pub use runner::run_client;
