//! Small browser-environment helpers.

pub mod storage;
