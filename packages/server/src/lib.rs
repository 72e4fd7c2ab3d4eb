//! Hiroba chat broadcaster library.
//!
//! Maintains the live set of connected participants and relays join, leave,
//! typing and chat events to every connected WebSocket client.

// layers
pub mod domain;
pub mod infrastructure;
pub mod ui;
pub mod usecase;
