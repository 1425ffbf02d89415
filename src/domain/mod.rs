//! Domain layer containing routing logic and value types.
//!
//! # Module Organization
//!
//! - `geometry` - Pure geometry formulas
//! - `retrieval` - Web and catalog search result types
//! - `routing` - Rule table, intent classification, model replies, response envelope
//! - `session` - Session names and transcript turns

pub mod geometry;
pub mod retrieval;
pub mod routing;
pub mod session;
