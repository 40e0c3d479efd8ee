//! Crate-level tests exercising the public API together.
