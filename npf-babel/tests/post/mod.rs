//! Post and page record tests

mod import;
