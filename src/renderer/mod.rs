//! Template renderers
//!
//! Two dialects share one replacement value:
//!
//! - the builtin dialect substitutes `{{ .One }}`..`{{ .Ten }}`, `{{ .Ink }}`
//!   and `{{ ink }}` tags
//! - the user dialect replaces a caller-supplied literal or `{{regex}}`

pub mod builtin;
pub mod user;

pub use builtin::{render_builtin, Bindings, BuiltinError, RenderError};
pub use user::{render_user, RegexCompileError, UserPattern};

/// The substitution dialect for one request, selected once before rendering
#[derive(Debug, Clone)]
pub enum Dialect {
    Builtin,
    User(UserPattern),
}

impl Dialect {
    /// No find value selects the builtin dialect
    pub fn select(find: Option<&str>) -> Result<Self, RegexCompileError> {
        match find {
            None => Ok(Dialect::Builtin),
            Some(find) => UserPattern::from_find(find).map(Dialect::User),
        }
    }

    pub fn is_builtin(&self) -> bool {
        matches!(self, Dialect::Builtin)
    }
}
