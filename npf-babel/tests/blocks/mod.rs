//! Block grammar tests
//!
//! Parsing of hand-written markup, and serialize → parse round trips over
//! generated trees.

mod parse;
mod round_trip;
