//! Conversion of NPF posts into block-grammar documents
//!
//!     This crate turns a post in Tumblr's Neue Post Format (an ordered array of typed content
//!     blocks with character-range formatting) into a tree of blocks, and writes that tree out
//!     as comment-delimited block markup, the body format of a WordPress post.
//!
//!     This is a pure lib, that is, it powers npf-cli but is shell agnostic: no code here
//!     assumes a shell environment, be it printing, env vars or logging. Every call is a pure
//!     function of its input and the format-type to tag table, and failures are returned as
//!     typed errors for the caller to log, skip or abort on.
//!
//! Architecture
//!
//!     The work that is independent of any one format lives in ./common, over the block tree
//!     defined in ./ir. Formats only adapt their own syntax to and from that tree.
//!
//!     The file structure :
//!     .
//!     ├── error.rs                # ConvertError and FormatError
//!     ├── format.rs               # Format trait definition
//!     ├── registry.rs             # FormatRegistry for discovery and selection
//!     ├── transforms.rs           # Functional entry points (post → markup)
//!     ├── post.rs                 # Posts and pages responses → content records
//!     ├── formats
//!     │   ├── npf                 # model.rs, builders.rs, convert.rs
//!     │   ├── blocks              # parser.rs, serializer.rs
//!     │   ├── json
//!     │   ├── html
//!     │   └── treeviz
//!     ├── ir                      # Block tree and span types
//!     └── common                  # Range resolution, inline rendering, list grouping
//!
//! Core Algorithms
//!
//!     1. Range resolution (./common/ranges.rs): overlapping, unsorted formatting ranges are
//!        split into a partition of the text, each span carrying the ranges that cover it.
//!     2. Inline rendering (./common/inline.rs): each span is escaped and wrapped in one tag
//!        per format, nested in the order of the tag table.
//!     3. List grouping (./common/list_grouping.rs): NPF lists are flat runs of list-item
//!        blocks; a two-state machine gathers each run into a list container.
//!     4. Serialization (./formats/blocks/serializer.rs): children are written at the
//!        placeholder positions of their parent's inner content.
//!
//! Testing
//!
//!     tests
//!     ├── lib.rs                  # collects the modules below
//!     ├── <area>
//!     │   └── <testname>.rs
//!     └── fixtures
//!         └── <post>.json
//!
//!     Rust does not discover tests in subdirectories, so each area is declared in tests/lib.rs.

pub mod error;
pub mod format;
pub mod formats;
pub mod post;
pub mod registry;
pub mod transforms;

pub mod common;
pub mod ir;

pub use common::inline::{FormatTags, TagMapping};
pub use error::{ConvertError, FormatError};
pub use format::Format;
pub use ir::nodes::{Block, BlockDocument};
pub use post::{PageRecord, PostDefaults, PostRecord};
pub use registry::FormatRegistry;
pub use transforms::npf_to_blocks;
