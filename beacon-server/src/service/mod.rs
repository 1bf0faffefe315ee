//! Service Module
//!
//! Business logic for the dashboard: repository fetching, build-status
//! probing, and page rendering.

pub mod fetch;
pub mod probe;
pub mod render;
