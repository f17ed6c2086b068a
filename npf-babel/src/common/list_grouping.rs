//! Groups runs of list items into list containers.
//!
//! NPF has no list container: a list is just consecutive text blocks with a
//! list-item subtype. The block grammar needs a `core/list` parent around the
//! items, so the stream of built nodes is passed through a small state
//! machine:
//!
//! ```text
//! Idle              + item(K)  -> InList(K, [item])
//! InList(K, items)  + item(K)  -> InList(K, items + [item])
//! InList(K, items)  + item(K') -> flush list(K, items), InList(K', [item])
//! InList(K, items)  + block    -> flush list(K, items), emit block, Idle
//! Idle              + block    -> emit block
//! end of stream in InList      -> flush list(K, items)
//! ```
//!
//! Any non-list node closes the open list, media blocks included, so an image
//! between two runs of bullets yields two separate lists.

use crate::ir::nodes::{Attrs, Block, ListKind};
use serde_json::Value;

/// A node produced by a block builder, tagged with whether it joins a list.
#[derive(Debug, Clone, PartialEq)]
pub enum Built {
    Block(Block),
    ListItem { kind: ListKind, item: Block },
}

#[derive(Debug, Default)]
enum State {
    #[default]
    Idle,
    InList {
        kind: ListKind,
        items: Vec<Block>,
    },
}

/// Streaming list aggregator. Feed nodes in document order with
/// [`ListGrouper::push`], then call [`ListGrouper::finish`].
#[derive(Debug, Default)]
pub struct ListGrouper {
    state: State,
    output: Vec<Block>,
}

impl ListGrouper {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, built: Built) {
        match built {
            Built::ListItem { kind, item } => match &mut self.state {
                State::InList {
                    kind: open_kind,
                    items,
                } if *open_kind == kind => items.push(item),
                _ => {
                    self.flush();
                    self.state = State::InList {
                        kind,
                        items: vec![item],
                    };
                }
            },
            Built::Block(block) => {
                self.flush();
                self.output.push(block);
            }
        }
    }

    /// Closes any open list and returns the top-level blocks.
    pub fn finish(mut self) -> Vec<Block> {
        self.flush();
        self.output
    }

    fn flush(&mut self) {
        if let State::InList { kind, items } = std::mem::take(&mut self.state) {
            self.output.push(make_list(kind, items));
        }
    }
}

/// Builds a closed `core/list` container around `items`.
pub fn make_list(kind: ListKind, items: Vec<Block>) -> Block {
    let mut attrs = Attrs::new();
    let (open, close) = match kind {
        ListKind::Unordered => ("<ul class=\"wp-block-list\">", "</ul>"),
        ListKind::Ordered => {
            attrs.insert("ordered".to_string(), Value::Bool(true));
            ("<ol class=\"wp-block-list\">", "</ol>")
        }
    };
    Block::container("core/list", attrs, open, items, close)
}
