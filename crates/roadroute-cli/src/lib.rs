//! Roadroute CLI library.
//!
//! Rendering helpers shared by the `roadroute` binary and its tests.

pub mod output;
