//! Intermediate representation shared by every format.
//!
//! `nodes` holds the block tree that formats parse into and serialize from;
//! `inline` holds the formatting ranges and resolved spans used while
//! rendering text.

pub mod inline;
pub mod nodes;
