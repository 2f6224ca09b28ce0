//! Syntax tree for the builtin template dialect

use std::fmt;

/// Byte range in source text
pub type Span = std::ops::Range<usize>;

/// A node with its source location
#[derive(Debug, Clone, PartialEq)]
pub struct Spanned<T> {
    pub node: T,
    pub span: Span,
}

impl<T> Spanned<T> {
    pub fn new(node: T, span: Span) -> Self {
        Self { node, span }
    }
}

/// The body of a `{{ ... }}` tag
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// Field access: `{{ .One }}`
    Field(String),
    /// Zero-argument function call: `{{ ink }}`
    Call(String),
}

impl Action {
    /// The identifier the action refers to, without the leading dot
    pub fn name(&self) -> &str {
        match self {
            Action::Field(name) | Action::Call(name) => name,
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Action::Field(name) => write!(f, ".{}", name),
            Action::Call(name) => f.write_str(name),
        }
    }
}

/// A top-level piece of a template
#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    /// Literal text, copied to the output as-is
    Text(String),
    /// A substitution tag
    Action(Spanned<Action>),
}

/// A parsed builtin template
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Template {
    pub nodes: Vec<Node>,
}

impl Template {
    /// Iterate over every substitution tag in source order
    pub fn actions(&self) -> impl Iterator<Item = &Spanned<Action>> {
        self.nodes.iter().filter_map(|node| match node {
            Node::Action(action) => Some(action),
            Node::Text(_) => None,
        })
    }

    /// True when the template contains no substitution tags
    pub fn is_static(&self) -> bool {
        self.actions().next().is_none()
    }
}
