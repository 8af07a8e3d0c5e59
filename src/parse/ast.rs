//! Scene AST.
//!
//! The parser's output: a flat list of top-level items, each an object
//! block or a `let` declaration. Field values stay unresolved here —
//! identifier references and nested blocks are bound and type-checked by
//! the semantic resolver.

use glam::DVec3;

use crate::errors::SourcePos;
use crate::value::ValueKind;

/// A top-level item of the expanded scene text.
#[derive(Debug, Clone, PartialEq)]
pub enum Item {
    /// `let name = value`
    Let {
        name: String,
        value: FieldValue,
        pos: SourcePos,
    },
    /// `kind { field: value, ... }`
    Object(ObjectBlock),
}

/// An object block: a kind keyword followed by a braced field list.
#[derive(Debug, Clone, PartialEq)]
pub struct ObjectBlock {
    pub kind: String,
    pub block: Block,
    pub pos: SourcePos,
}

/// An ordered field list. Order is preserved so duplicate fields can apply
/// last-wins semantics and groups keep declaration order.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Block {
    pub fields: Vec<Field>,
}

/// One `name: value` entry in a block.
#[derive(Debug, Clone, PartialEq)]
pub struct Field {
    pub name: String,
    pub value: FieldValue,
    pub pos: SourcePos,
}

/// An unresolved field value.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    /// A numeric literal.
    Scalar(f64),
    /// A quoted string literal.
    Str(String),
    /// A `{a, b, c}` literal.
    Vector(DVec3),
    /// A bare identifier, resolved against the variable environment.
    Ident(String),
    /// An anonymous nested block, e.g. `finish: { reflection: 0.8 }`.
    Block(Block),
    /// A tagged value, e.g. `solid { colour: {...} }` or `colour {1, 0, 0}`.
    Tagged(String, Box<FieldValue>),
    /// A list of child objects, the body of a group's `objects:` field.
    Objects(Vec<ObjectBlock>),
}

impl FieldValue {
    /// The kind tag reported for this value in type mismatch diagnostics.
    /// Structural values (blocks, object lists) all report as `block`.
    #[must_use]
    pub fn kind(&self) -> ValueKind {
        match self {
            FieldValue::Scalar(_) => ValueKind::Scalar,
            FieldValue::Str(_) => ValueKind::Str,
            FieldValue::Vector(_) => ValueKind::Vector,
            // An identifier's true kind is only known after resolution;
            // callers resolve first and use the bound value's kind.
            FieldValue::Ident(_) => ValueKind::Str,
            FieldValue::Block(_) | FieldValue::Tagged(..) | FieldValue::Objects(_) => {
                ValueKind::Block
            }
        }
    }
}
