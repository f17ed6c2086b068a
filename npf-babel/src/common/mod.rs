//! Format-agnostic building blocks used by the conversion.

pub mod escape;
pub mod inline;
pub mod list_grouping;
pub mod ranges;
