//! Library target of the npf CLI, exposing the inspect transforms for tests.

pub mod transforms;
