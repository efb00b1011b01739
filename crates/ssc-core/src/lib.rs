//! SSC Core - subscriber login grammar.
//!
//! Parses operator-typed logins, composes them from form options, and
//! renders the canonical identifier used to query the backends. Pure code,
//! no I/O.

pub mod composer;
pub mod error;
pub mod form;
pub mod grammar;
pub mod identifier;
pub mod point;
pub mod validation;

// Re-exports for convenience
pub use composer::OptionSet;
pub use error::{Reason, SyntaxError};
pub use form::{LoginForm, Mode};
pub use grammar::{FieldSpec, Grammar, GrammarError, Width, DEFAULT_CITIES, FIELDS};
pub use identifier::Identifier;
pub use point::Point;
pub use validation::Validator;
