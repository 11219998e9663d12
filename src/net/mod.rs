//! Networking: STOMP frame codec, session state machine, browser socket driver.
//!
//! `stomp` and `session` are pure and natively testable; `socket` is the
//! thin hydrate-gated layer that moves their frames over a real WebSocket.

pub mod session;
pub mod socket;
pub mod stomp;
