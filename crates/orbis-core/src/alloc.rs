//! Hash collections used across Orbis.
//!
//! Row fields and auxiliary entity data are keyed by short strings, so the
//! AHash hasher is used everywhere a plain map is needed.

pub use ahash::{AHashMap as HashMap, RandomState};
