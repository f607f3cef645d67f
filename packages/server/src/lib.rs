//! Hiroba chat relay server library.
//!
//! Clients connect over WebSocket with a username and every text frame they
//! send is broadcast as a JSON chat message to all connected clients.

// layers
pub mod domain;
pub mod infrastructure;
pub mod ui;
pub mod usecase;

pub mod config;
