//! # Expression Tests
//!
//! Typing rules for every expression kind, including the fallback types assigned
//! after an error.

pub mod arrays;
pub mod operators;
