//! Shared test utilities for tvgrid integration harnesses.
//!
//! Import everything you need via `mod common; use common::*;` at the top of
//! each harness file. Everything here is deterministic: no helper reads the
//! wall clock.

pub mod assertions;
pub mod builders;
pub mod fixtures;

pub use assertions::*;
pub use builders::*;
pub use fixtures::*;
