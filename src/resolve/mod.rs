//! Semantic Resolver
//!
//! Consumes the parsed AST plus the variable environment left by the
//! template preprocessor. Binds `let` declarations, resolves identifier
//! references, type-checks every field against its block's schema, applies
//! defaults for optional fields, and enforces scene invariants — most
//! importantly that exactly one camera exists at the scene root.
//!
//! Field policy (documented decisions):
//! - unknown fields are rejected, not ignored
//! - duplicate fields apply last-wins
//! - missing required fields are hard errors

pub mod camera;
pub mod lights;
pub mod material;
pub mod primitive;
pub mod transform;

use log::debug;

use glam::DVec3;

use crate::CompileOptions;
use crate::env::Environment;
use crate::errors::{CompileError, Result, SourcePos};
use crate::parse::ast::{Field, FieldValue, Item};
use crate::scene::{Camera, Colour, SceneNode};
use crate::value::{Value, ValueKind};

/// Resolves all items into the camera and the node hierarchy.
pub fn resolve(
    items: &[Item],
    env: &mut Environment,
    options: &CompileOptions,
) -> Result<(Camera, Vec<SceneNode>)> {
    let mut cameras = Vec::new();
    let mut nodes = Vec::new();

    for item in items {
        match item {
            Item::Let { name, value, pos } => {
                let bound = bind_let(name, value, *pos, env)?;
                env.set(name.clone(), bound);
            }
            Item::Object(obj) if obj.kind == "camera" => {
                cameras.push(camera::resolve_camera(obj, env, options)?);
            }
            Item::Object(obj) => {
                nodes.push(primitive::resolve_node(obj, env)?);
            }
        }
    }

    debug!("Resolved {} cameras, {} root nodes", cameras.len(), nodes.len());

    let count = cameras.len();
    match (cameras.pop(), count) {
        (Some(camera), 1) => Ok((camera, nodes)),
        _ => Err(CompileError::SceneInvariant {
            reason: format!("expected exactly one camera, found {count}"),
        }),
    }
}

/// Evaluates the right-hand side of a `let` declaration.
fn bind_let(name: &str, value: &FieldValue, pos: SourcePos, env: &Environment) -> Result<Value> {
    match value {
        FieldValue::Scalar(n) => Ok(Value::Scalar(*n)),
        FieldValue::Str(s) => Ok(Value::Str(s.clone())),
        FieldValue::Vector(v) => Ok(Value::Vector(*v)),
        FieldValue::Ident(other) => env.get(other).cloned(),
        FieldValue::Tagged(tag, inner) => match (tag.as_str(), inner.as_ref()) {
            ("vector", FieldValue::Vector(v)) => Ok(Value::Vector(*v)),
            ("colour", FieldValue::Vector(v)) => Ok(Value::Colour(Colour::from(*v))),
            ("material", _) => {
                let field = synthetic_field(name, inner, pos);
                Ok(Value::Material(material::resolve_material("let", &field, env)?))
            }
            ("finish", _) => {
                let field = synthetic_field(name, inner, pos);
                Ok(Value::Finish(material::resolve_finish("let", &field, env)?))
            }
            (other, _) => Err(CompileError::SceneInvariant {
                reason: format!("`let {name}` has unknown binding kind `{other}`"),
            }),
        },
        FieldValue::Block(_) | FieldValue::Objects(_) => Err(CompileError::SceneInvariant {
            reason: format!("`let {name}` must bind a value, not a bare block"),
        }),
    }
}

/// Wraps a `let` right-hand side as a field so the block resolvers can
/// report it with the binding's name.
fn synthetic_field(name: &str, value: &FieldValue, pos: SourcePos) -> Field {
    Field {
        name: name.to_owned(),
        value: value.clone(),
        pos,
    }
}

// ============================================================================
// Field coercion helpers
// ============================================================================

fn mismatch(block: &str, field: &Field, expected: ValueKind, found: ValueKind) -> CompileError {
    CompileError::TypeMismatch {
        block: block.to_owned(),
        field: field.name.clone(),
        expected,
        found,
    }
}

/// A scalar field: a numeric literal, or an identifier bound to a number.
pub(crate) fn expect_scalar(block: &str, field: &Field, env: &Environment) -> Result<f64> {
    match &field.value {
        FieldValue::Scalar(n) => Ok(*n),
        FieldValue::Ident(name) => {
            let value = env.get(name)?;
            value
                .as_f64()
                .ok_or_else(|| mismatch(block, field, ValueKind::Scalar, value.kind()))
        }
        other => Err(mismatch(block, field, ValueKind::Scalar, other.kind())),
    }
}

/// A vector3 field: a `{a, b, c}` literal, a `vector {…}` tagged literal,
/// or an identifier bound to a vector.
pub(crate) fn expect_vector(block: &str, field: &Field, env: &Environment) -> Result<DVec3> {
    match &field.value {
        FieldValue::Vector(v) => Ok(*v),
        FieldValue::Tagged(tag, inner) if tag == "vector" => match inner.as_ref() {
            FieldValue::Vector(v) => Ok(*v),
            other => Err(mismatch(block, field, ValueKind::Vector, other.kind())),
        },
        FieldValue::Ident(name) => {
            let value = env.get(name)?;
            match value {
                Value::Vector(v) => Ok(*v),
                other => Err(mismatch(block, field, ValueKind::Vector, other.kind())),
            }
        }
        other => Err(mismatch(block, field, ValueKind::Vector, other.kind())),
    }
}

/// A colour field: an `{r, g, b}` literal, a `colour {…}` tagged literal,
/// or an identifier bound to a colour. A vector-bound identifier is a
/// mismatch — vectors and colours are distinct kinds.
pub(crate) fn expect_colour(block: &str, field: &Field, env: &Environment) -> Result<Colour> {
    match &field.value {
        FieldValue::Vector(v) => Ok(Colour::from(*v)),
        FieldValue::Tagged(tag, inner) if tag == "colour" => match inner.as_ref() {
            FieldValue::Vector(v) => Ok(Colour::from(*v)),
            other => Err(mismatch(block, field, ValueKind::Colour, other.kind())),
        },
        FieldValue::Ident(name) => {
            let value = env.get(name)?;
            match value {
                Value::Colour(c) => Ok(*c),
                other => Err(mismatch(block, field, ValueKind::Colour, other.kind())),
            }
        }
        other => Err(mismatch(block, field, ValueKind::Colour, other.kind())),
    }
}
