//! Template Preprocessor
//!
//! The first pipeline stage. Scene files are written in a Liquid-style
//! templating dialect layered over the scene syntax:
//!
//! - `{% assign name = expr %}` binds a value for the rest of the file
//! - `{% for v in (a..b) %} ... {% endfor %}` unrolls its body once per
//!   value of `v` (the range is inclusive of both endpoints)
//! - `{{ expr }}` substitutes the stringified value in place
//! - `expr` is a literal or variable, optionally piped through a chain of
//!   numeric filters: `x | times: 2 | minus: 10`
//!
//! Expansion is a distinct pass that produces plain scene text before any
//! structural parsing begins, so the scene grammar never has to know about
//! templating. The pass is deterministic and has no side effects beyond the
//! returned text and the final variable environment.

pub mod expand;
pub mod filters;
pub mod lexer;
pub mod parser;

pub use expand::expand;
pub use filters::{Expr, FilterOp, Operand};
pub use lexer::Segment;
pub use parser::TemplateNode;
