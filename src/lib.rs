//! Data model for flexible command configuration documents.
//!
//! A [`CommandDocument`] ties a template string to the arguments and custom
//! logic its placeholders name; [`InfoDocument`] is the static-message
//! sibling. Both cross the boundary to the command dispatcher as JSON.

pub mod argument;
pub mod document;
pub mod info;
pub mod json;
pub mod logic;
pub mod resolve;
pub mod template;
pub mod validate;

pub use argument::{Argument, ArgumentKind, ArgumentType};
pub use document::{CommandDocument, Declaration, MutationError, RunAs};
pub use info::{InfoDocument, InfoError};
pub use json::DocumentError;
pub use logic::{Logic, LogicType, ParamError};
pub use resolve::{Invocation, ResolveError, render};
pub use template::{ParseError, Placeholder, PlaceholderKind, Segment, Template};
pub use validate::{Issue, Report, Severity};
