//! Request middleware.
//!
//! Lifecycle concerns that apply to every request regardless of route.

pub mod trace;

pub use trace::Trace;
