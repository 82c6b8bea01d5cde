//! Observability boundary.
//!
//! Engine code never logs directly; it emits `ProjectionEvent`s through
//! `sink::record`, and the active sink decides what to do with them.
pub mod sink;
