//! Infrastructure layer
//!
//! Concrete implementations of the domain repository traits.

pub mod persistence;

pub use rusqlite::Connection;
