//! Document tree.
//!
//! The host grammar produces a small set of block and inline nodes. Extensions
//! can add their own node types through [`CustomNode`]; they are stored as
//! trait objects and recovered with [`Block::downcast_ref`] /
//! [`Inline::downcast_ref`].

use std::any::Any;
use std::fmt;

/// Node type contributed by an extension.
///
/// Equality is delegated to [`dyn_eq`](Self::dyn_eq) so trees holding custom
/// nodes can still be compared in tests. Types implementing [`PartialEq`] can
/// forward to [`same_node`].
///
/// # Example
///
/// ```
/// use rstfmt_rst::{Block, CustomNode, same_node};
///
/// #[derive(Debug, PartialEq)]
/// struct Marker(u32);
///
/// impl CustomNode for Marker {
///     fn tagname(&self) -> &str { "marker" }
///
///     fn dyn_eq(&self, other: &dyn CustomNode) -> bool {
///         same_node(self, other)
///     }
/// }
///
/// let block = Block::Custom(Box::new(Marker(7)));
/// assert_eq!(block.downcast_ref::<Marker>(), Some(&Marker(7)));
/// ```
pub trait CustomNode: fmt::Debug + Send + Sync + Any {
    /// Name used when printing the tree.
    fn tagname(&self) -> &str;

    /// Compare with another custom node of any type.
    fn dyn_eq(&self, other: &dyn CustomNode) -> bool;
}

/// `true` when `other` has the type of `node` and compares equal to it.
pub fn same_node<T: CustomNode + PartialEq>(node: &T, other: &dyn CustomNode) -> bool {
    (other as &dyn Any)
        .downcast_ref::<T>()
        .is_some_and(|other| node == other)
}

impl PartialEq for Box<dyn CustomNode> {
    fn eq(&self, other: &Self) -> bool {
        self.dyn_eq(other.as_ref())
    }
}

/// Parsed document.
#[derive(Debug, Default, PartialEq)]
pub struct Document {
    /// Top-level blocks in source order.
    pub children: Vec<Block>,
}

impl Document {
    /// Iterate over all blocks depth-first, including nested ones.
    pub fn blocks(&self) -> impl Iterator<Item = &Block> {
        let mut stack: Vec<&Block> = self.children.iter().rev().collect();
        std::iter::from_fn(move || {
            let block = stack.pop()?;
            stack.extend(block.children().iter().rev());
            Some(block)
        })
    }

    /// Iterate over all inline nodes of all paragraphs, depth-first.
    pub fn inlines(&self) -> impl Iterator<Item = &Inline> {
        self.blocks().flat_map(|block| match block {
            Block::Paragraph { children, .. } => children.as_slice(),
            _ => [].as_slice(),
        })
    }
}

/// Block-level node.
#[derive(Debug, PartialEq)]
pub enum Block {
    /// Paragraph of inline content.
    Paragraph {
        /// Line of the first paragraph line (1-indexed).
        line: usize,
        /// Inline content.
        children: Vec<Inline>,
    },
    /// Indented block.
    BlockQuote {
        /// Line of the first quoted line (1-indexed).
        line: usize,
        /// Nested blocks.
        children: Vec<Block>,
    },
    /// Comment or other explicit markup kept verbatim
    /// (hyperlink targets, footnotes, substitution definitions).
    Comment {
        /// Line of the `..` marker (1-indexed).
        line: usize,
        /// Source text of the whole construct.
        text: String,
    },
    /// Semantic element produced by a built-in directive.
    Element(Element),
    /// Extension node.
    Custom(Box<dyn CustomNode>),
}

impl Block {
    /// Nested blocks, if this node has any.
    ///
    /// Custom nodes are opaque and report no children.
    pub fn children(&self) -> &[Block] {
        match self {
            Self::BlockQuote { children, .. } => children,
            Self::Element(element) => &element.children,
            Self::Paragraph { .. } | Self::Comment { .. } | Self::Custom(_) => &[],
        }
    }

    /// Downcast a custom node to a concrete type.
    pub fn downcast_ref<T: CustomNode>(&self) -> Option<&T> {
        match self {
            Self::Custom(node) => (node.as_ref() as &dyn Any).downcast_ref::<T>(),
            _ => None,
        }
    }
}

/// Semantic element produced by a built-in directive.
#[derive(Debug, Default, PartialEq)]
pub struct Element {
    /// Element name (e.g. "note", "image", "desc").
    pub tagname: String,
    /// Attributes in insertion order.
    pub attributes: Vec<(String, String)>,
    /// Literal text, for elements that hold text rather than blocks.
    pub text: Option<String>,
    /// Nested blocks.
    pub children: Vec<Block>,
}

impl Element {
    /// Create an empty element.
    #[must_use]
    pub fn new(tagname: impl Into<String>) -> Self {
        Self {
            tagname: tagname.into(),
            ..Default::default()
        }
    }

    /// Get an attribute value by name.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }
}

/// Inline node.
#[derive(Debug, PartialEq)]
pub enum Inline {
    /// Plain text with escapes removed.
    Text(String),
    /// `*emphasis*`
    Emphasis(String),
    /// `**strong**`
    Strong(String),
    /// ``` ``literal`` ```
    Literal(String),
    /// Semantic element produced by a built-in role or reference.
    Element {
        /// Element name (e.g. "reference", "title_reference").
        tagname: String,
        /// Display text.
        text: String,
        /// Source text of the whole construct.
        rawtext: String,
    },
    /// Extension node.
    Custom(Box<dyn CustomNode>),
}

impl Inline {
    /// Downcast a custom node to a concrete type.
    pub fn downcast_ref<T: CustomNode>(&self) -> Option<&T> {
        match self {
            Self::Custom(node) => (node.as_ref() as &dyn Any).downcast_ref::<T>(),
            _ => None,
        }
    }
}
