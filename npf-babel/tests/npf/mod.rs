//! NPF import tests
//!
//! End-to-end conversion of posts to block markup, and properties of the
//! range resolver and list grouping.

mod conversion;
mod properties;
