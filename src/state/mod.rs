//! Shared client-side state modules.
//!
//! DESIGN
//! ======
//! State is split by domain (`chat`, `connection`) so individual components
//! can depend on small focused models. All mutation flows through the
//! session driver; components only read.

pub mod chat;
pub mod connection;
