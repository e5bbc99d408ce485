//! # Statement Tests
//!
//! Predicates of `if`/`while`/`for`, `break` placement and `return` checking.

pub mod control_flow;
pub mod returns;
