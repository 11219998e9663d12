//! UI components.

pub mod chat_view;
