//! Resolved Values
//!
//! The source language is dynamically typed: a field value or variable
//! binding can be a number, a vector, a colour, a string fragment, or a
//! whole material description. [`Value`] is the closed tagged variant that
//! represents every such value after evaluation, so type checks in the
//! resolver are exhaustive pattern matches rather than ad-hoc inspection.
//!
//! Integers are kept distinct from floats because the template dialect
//! inherits Liquid's arithmetic: `Int ∘ Int` stays integral and
//! `divided_by` truncates, while any float operand promotes the result.

use std::fmt;

use glam::DVec3;

use crate::scene::{Colour, Finish, Material};

/// A fully evaluated value in the variable environment or a resolved field.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// An integer, e.g. a loop counter or an `assign`ed whole number.
    Int(i64),
    /// A real number.
    Scalar(f64),
    /// A three-component vector, bound via `let v = vector {x, y, z}`.
    Vector(DVec3),
    /// An RGB colour, bound via `let c = colour {r, g, b}`.
    Colour(Colour),
    /// A string fragment.
    Str(String),
    /// A named material, bound via `let m = material { ... }`.
    Material(Material),
    /// A named finish, bound via `let f = finish { ... }`.
    Finish(Finish),
}

impl Value {
    /// The kind tag of this value, for diagnostics.
    #[must_use]
    pub fn kind(&self) -> ValueKind {
        match self {
            Value::Int(_) => ValueKind::Int,
            Value::Scalar(_) => ValueKind::Scalar,
            Value::Vector(_) => ValueKind::Vector,
            Value::Colour(_) => ValueKind::Colour,
            Value::Str(_) => ValueKind::Str,
            Value::Material(_) => ValueKind::Material,
            Value::Finish(_) => ValueKind::Finish,
        }
    }

    /// Returns the numeric value as `f64` when this is a number.
    #[must_use]
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Int(i) => Some(*i as f64),
            Value::Scalar(s) => Some(*s),
            _ => None,
        }
    }

    /// Returns the integer value when this is an `Int`.
    #[must_use]
    pub fn as_int(&self) -> Option<i64> {
        match self {
            Value::Int(i) => Some(*i),
            _ => None,
        }
    }
}

/// Stringification used by `{{ ... }}` interpolation: integers render
/// without a decimal point, floats in shortest round-trip form.
impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Int(i) => write!(f, "{i}"),
            Value::Scalar(s) => write!(f, "{s}"),
            Value::Str(s) => write!(f, "{s}"),
            Value::Vector(v) => write!(f, "{{{}, {}, {}}}", v.x, v.y, v.z),
            Value::Colour(c) => write!(f, "{{{}, {}, {}}}", c.r, c.g, c.b),
            Value::Material(_) => write!(f, "<material>"),
            Value::Finish(_) => write!(f, "<finish>"),
        }
    }
}

/// The kind of a [`Value`], used in `TypeMismatch` diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueKind {
    Int,
    Scalar,
    Vector,
    Colour,
    Str,
    Material,
    Finish,
    /// A structural block value in the AST; never held in the environment,
    /// only reported in diagnostics.
    Block,
}

impl fmt::Display for ValueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ValueKind::Int => "integer",
            ValueKind::Scalar => "scalar",
            ValueKind::Vector => "vector3",
            ValueKind::Colour => "colour",
            ValueKind::Str => "string",
            ValueKind::Material => "material",
            ValueKind::Finish => "finish",
            ValueKind::Block => "block",
        };
        f.write_str(name)
    }
}
