//! Format implementations
//!
//! This module contains all format implementations that convert between
//! the block tree and various text representations.

pub mod blocks;
pub mod html;
pub mod icons;
pub mod json;
pub mod npf;
pub mod treeviz;

pub use blocks::BlocksFormat;
pub use html::HtmlFormat;
pub use json::JsonFormat;
pub use npf::NpfFormat;
pub use treeviz::TreevizFormat;
