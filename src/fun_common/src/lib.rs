//! Utilities shared by every stage of the front-end: source locations, diagnostics,
//! lexical scopes, and the front-end configuration.

pub mod config;
pub mod diagnostic;
pub mod location;
pub mod scope;
