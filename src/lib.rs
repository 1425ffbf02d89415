//! Query Router - intent classification and dispatch service.
//!
//! A free-text query is matched against an ordered rule table, dispatched to
//! a geometry formula or a retrieval handler, and returned as a normalized
//! response envelope. Queries no rule matches are classified by a language
//! model, which may also answer them directly.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
pub mod server;

pub use server::{build_router, init_tracing, run, Components, StartupError};
