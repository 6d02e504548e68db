//! Orbis Core
//!
//! Shared utilities for the Orbis chart engine: logging setup, frame profiling,
//! fast hash collections and screen-space math types.

pub mod alloc;
pub mod logging;
pub mod math;
pub mod profiling;
