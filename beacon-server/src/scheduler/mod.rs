//! Scheduler layer for the dashboard
//!
//! Runs the two periodic refresh loops: a slow one re-listing the
//! organization's repositories and a fast one re-rendering the page.

pub mod refresh;

pub use refresh::spawn_refresh_loops;
