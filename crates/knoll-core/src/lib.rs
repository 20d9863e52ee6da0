//! Knoll Core - Foundational types for the Knoll terrain crates
//!
//! This crate provides the pieces every other Knoll crate depends on:
//! - `KnollError` - The shared error taxonomy
//! - `Result` - Result alias over `KnollError`

mod error;

pub use error::{KnollError, Result};
