//! Transform block resolution.
//!
//! A `transform:` field is a block of `scale`, `rotate` and `translate`
//! vectors. Whatever order the fields are written in, the resulting matrix
//! always applies scale, then rotation, then translation; writing a field
//! twice keeps the last value, like every other field.

use crate::env::Environment;
use crate::errors::{CompileError, Result};
use crate::parse::ast::{Field, FieldValue};
use crate::resolve::expect_vector;
use crate::scene::Transform;
use crate::value::ValueKind;

/// Resolves a `transform:` field into a [`Transform`] record.
pub(crate) fn resolve_transform(block: &str, field: &Field, env: &Environment) -> Result<Transform> {
    let FieldValue::Block(body) = &field.value else {
        // An identifier can never be bound to a transform; report the
        // bound value's kind rather than the raw token shape.
        let found = match &field.value {
            FieldValue::Ident(name) => env.get(name)?.kind(),
            other => other.kind(),
        };
        return Err(CompileError::TypeMismatch {
            block: block.to_owned(),
            field: field.name.clone(),
            expected: ValueKind::Block,
            found,
        });
    };

    let mut transform = Transform::IDENTITY;
    for inner in &body.fields {
        match inner.name.as_str() {
            "scale" => transform.scale = expect_vector("transform", inner, env)?,
            "rotate" => transform.rotate = expect_vector("transform", inner, env)?,
            "translate" => transform.translate = expect_vector("transform", inner, env)?,
            other => return Err(CompileError::unknown_field("transform", other)),
        }
    }

    Ok(transform)
}
