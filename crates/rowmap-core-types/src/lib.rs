//! Core types shared across rowmap facilities
//!
//! This crate holds the canonical field keys and event names used by the
//! logging facility and by statement tracing, so every crate emits the
//! same structured shape.

pub mod schema;
