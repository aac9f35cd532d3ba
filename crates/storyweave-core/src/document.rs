//! Rich-text document tree.
//!
//! Documents are exchanged in the editor's JSON shape, e.g.
//! `{"type":"doc","content":[{"type":"paragraph","content":[{"type":"text","text":"hi"}]}]}`.
//! Locked vocabulary words travel as `customWord` nodes whose `attrs` carry
//! the word and the identifier of the card slot it was dragged from.

use serde::{Deserialize, Serialize};

use crate::error::DocumentError;

/// Identifier of the card slot a locked word was dropped from.
///
/// The editor emits either numeric or string identifiers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum DropId {
    /// Numeric slot identifier.
    Number(i64),
    /// String slot identifier.
    Text(String),
}

/// Attributes of a locked word node.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LockedWord {
    /// The locked word as displayed.
    #[serde(default)]
    pub text: String,
    /// Where the word came from, if known.
    #[serde(rename = "droppedId", default)]
    pub dropped_id: Option<DropId>,
}

/// A node in the document tree.
///
/// Each node owns its children; there are no back-references.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum Node {
    /// A nested document root.
    Doc {
        /// Child nodes in order.
        #[serde(default)]
        content: Vec<Node>,
    },
    /// A paragraph boundary.
    Paragraph {
        /// Child nodes in order.
        #[serde(default, skip_serializing_if = "Vec::is_empty")]
        content: Vec<Node>,
    },
    /// A run of plain text.
    Text {
        /// The text itself.
        text: String,
    },
    /// An explicit line break.
    HardBreak,
    /// An indivisible locked vocabulary word.
    #[serde(rename = "customWord")]
    AtomicWord {
        /// The word and its provenance.
        attrs: LockedWord,
    },
}

impl Node {
    /// Builds a paragraph from the given children.
    #[must_use]
    pub fn paragraph(content: Vec<Node>) -> Self {
        Self::Paragraph { content }
    }

    /// Builds a text leaf.
    #[must_use]
    pub fn text(text: impl Into<String>) -> Self {
        Self::Text { text: text.into() }
    }

    /// Builds a locked word leaf.
    #[must_use]
    pub fn locked_word(text: impl Into<String>, dropped_id: Option<DropId>) -> Self {
        Self::AtomicWord {
            attrs: LockedWord {
                text: text.into(),
                dropped_id,
            },
        }
    }

    /// Returns the children of this node (empty for leaves).
    #[must_use]
    pub fn children(&self) -> &[Node] {
        match self {
            Self::Doc { content } | Self::Paragraph { content } => content,
            Self::Text { .. } | Self::HardBreak | Self::AtomicWord { .. } => &[],
        }
    }
}

// Dropping a node frees its subtree with an explicit stack, so a deeply
// nested tree cannot overflow.
impl Drop for Node {
    fn drop(&mut self) {
        let (Self::Doc { content } | Self::Paragraph { content }) = self else {
            return;
        };
        let mut stack = std::mem::take(content);
        while let Some(mut node) = stack.pop() {
            if let Self::Doc { content } | Self::Paragraph { content } = &mut node {
                stack.append(content);
            }
        }
    }
}

/// A complete document: the `doc` root and its children.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Node", into = "Node")]
pub struct Document {
    content: Vec<Node>,
}

impl Document {
    /// Creates a document from the root's children.
    #[must_use]
    pub fn new(content: Vec<Node>) -> Self {
        Self { content }
    }

    /// The editor's starting state: a single empty paragraph.
    #[must_use]
    pub fn empty() -> Self {
        Self::new(vec![Node::paragraph(Vec::new())])
    }

    /// Returns the root's children.
    #[must_use]
    pub fn content(&self) -> &[Node] {
        &self.content
    }

    /// Walks every node below the root in document order.
    ///
    /// Uses an explicit stack so arbitrarily deep trees cannot overflow.
    #[must_use]
    pub fn walk(&self) -> Walk<'_> {
        Walk {
            stack: self.content.iter().rev().collect(),
        }
    }
}

impl Default for Document {
    fn default() -> Self {
        Self::empty()
    }
}

impl TryFrom<Node> for Document {
    type Error = DocumentError;

    fn try_from(mut node: Node) -> Result<Self, Self::Error> {
        match &mut node {
            Node::Doc { content } => Ok(Self {
                content: std::mem::take(content),
            }),
            Node::Paragraph { .. } => Err(DocumentError::UnexpectedRoot("paragraph")),
            Node::Text { .. } => Err(DocumentError::UnexpectedRoot("text")),
            Node::HardBreak => Err(DocumentError::UnexpectedRoot("hardBreak")),
            Node::AtomicWord { .. } => Err(DocumentError::UnexpectedRoot("customWord")),
        }
    }
}

impl From<Document> for Node {
    fn from(document: Document) -> Self {
        Node::Doc {
            content: document.content,
        }
    }
}

/// Pre-order iterator over a document's nodes.
#[derive(Debug)]
pub struct Walk<'a> {
    stack: Vec<&'a Node>,
}

impl<'a> Iterator for Walk<'a> {
    type Item = &'a Node;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.stack.pop()?;
        self.stack.extend(node.children().iter().rev());
        Some(node)
    }
}
