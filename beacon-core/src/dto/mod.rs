//! Wire representations of external API responses
//!
//! DTOs mirror the JSON shapes returned by the source-control hosting
//! API and convert into the domain types.

pub mod repo;
