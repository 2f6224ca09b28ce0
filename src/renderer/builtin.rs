//! Execution of parsed builtin templates

use thiserror::Error;

use crate::error::ParseError;
use crate::parser::ast::{Action, Node, Span, Template};
use crate::parser::parse;

/// Field names a template can reference with `{{ .Name }}`
pub const BOUND_FIELDS: [&str; 11] = [
    "One", "Two", "Three", "Four", "Five", "Six", "Seven", "Eight", "Nine", "Ten", "Ink",
];

/// Function name a template can call with `{{ ink }}`
pub const BOUND_FUNCTION: &str = "ink";

/// A well-formed tag that names something outside the bound set
#[derive(Debug, Clone, PartialEq, Error)]
pub enum RenderError {
    #[error("can't evaluate field '{name}' (available: {})", BOUND_FIELDS.join(", "))]
    UnboundField { name: String, span: Span },

    #[error("function '{name}' not defined (available: ink)")]
    UnboundFunction { name: String, span: Span },
}

/// Errors from a full parse-and-execute pass
#[derive(Debug, Clone, PartialEq, Error)]
pub enum BuiltinError {
    #[error("parse errors: {}", crate::format_parse_errors(.0))]
    Parse(Vec<ParseError>),

    #[error(transparent)]
    Render(#[from] RenderError),
}

impl From<Vec<ParseError>> for BuiltinError {
    fn from(errors: Vec<ParseError>) -> Self {
        BuiltinError::Parse(errors)
    }
}

/// Values visible to one render call
///
/// Every field and the `ink` function resolve to the same replacement. A
/// `Bindings` lives only as long as the render that owns it, so concurrent
/// renders never see each other's replacement.
#[derive(Debug, Clone, Copy)]
pub struct Bindings<'a> {
    replacement: &'a str,
}

impl<'a> Bindings<'a> {
    pub fn new(replacement: &'a str) -> Self {
        Self { replacement }
    }

    pub fn field(&self, name: &str) -> Option<&'a str> {
        BOUND_FIELDS
            .contains(&name)
            .then_some(self.replacement)
    }

    pub fn call(&self, name: &str) -> Option<&'a str> {
        (name == BOUND_FUNCTION).then_some(self.replacement)
    }
}

/// Execute a parsed template against a set of bindings
pub fn execute(template: &Template, bindings: &Bindings<'_>) -> Result<String, RenderError> {
    let mut out = String::new();
    for node in &template.nodes {
        match node {
            Node::Text(text) => out.push_str(text),
            Node::Action(action) => {
                let value = match &action.node {
                    Action::Field(name) => {
                        bindings
                            .field(name)
                            .ok_or_else(|| RenderError::UnboundField {
                                name: name.clone(),
                                span: action.span.clone(),
                            })?
                    }
                    Action::Call(name) => {
                        bindings
                            .call(name)
                            .ok_or_else(|| RenderError::UnboundFunction {
                                name: name.clone(),
                                span: action.span.clone(),
                            })?
                    }
                };
                out.push_str(value);
            }
        }
    }
    Ok(out)
}

/// Parse `text` as a builtin template and substitute `replacement` into every tag
pub fn render_builtin(text: &str, replacement: &str) -> Result<String, BuiltinError> {
    let template = parse(text)?;
    Ok(execute(&template, &Bindings::new(replacement))?)
}
