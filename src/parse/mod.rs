//! Scene Parser
//!
//! The structural stage. Consumes the *expanded* scene text (all template
//! directives already resolved) and produces an AST of nested blocks:
//!
//! ```text
//! camera { location: {0, 1, -5}, look_at: {0, 0, 0} }
//! let white = colour { 1, 1, 1 }
//! sphere { centre: {0, 0, 0}, radius: 2,
//!          material: { pigment: solid { colour: white } } }
//! ```
//!
//! Top-level items are object blocks (`kind { field: value, ... }`) and
//! `let` declarations. Blocks nest arbitrarily as field values. A vector
//! literal `{a, b, c}` has exactly three numeric components.

pub mod ast;
pub mod lexer;
pub mod parser;

pub use ast::{Block, Field, FieldValue, Item, ObjectBlock};
pub use parser::parse;
