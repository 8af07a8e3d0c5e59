//! Material, pigment, finish and opacity resolution.

use crate::env::Environment;
use crate::errors::{CompileError, Result};
use crate::parse::ast::{Block, Field, FieldValue};
use crate::resolve::{expect_colour, expect_scalar};
use crate::scene::{Finish, Material, Opacity, Pigment};
use crate::value::{Value, ValueKind};

fn mismatch(block: &str, field: &Field, expected: ValueKind, found: ValueKind) -> CompileError {
    CompileError::TypeMismatch {
        block: block.to_owned(),
        field: field.name.clone(),
        expected,
        found,
    }
}

/// Resolves a `material:` field: an inline block or an identifier bound
/// via `let m = material { ... }`.
pub(crate) fn resolve_material(block: &str, field: &Field, env: &Environment) -> Result<Material> {
    match &field.value {
        FieldValue::Block(body) => material_from_block(body, env),
        FieldValue::Ident(name) => match env.get(name)? {
            Value::Material(material) => Ok(*material),
            other => Err(mismatch(block, field, ValueKind::Material, other.kind())),
        },
        other => Err(mismatch(block, field, ValueKind::Material, other.kind())),
    }
}

fn material_from_block(body: &Block, env: &Environment) -> Result<Material> {
    let mut material = Material::default();

    for field in &body.fields {
        match field.name.as_str() {
            "pigment" => material.pigment = resolve_pigment(field, env)?,
            "finish" => material.finish = resolve_finish("material", field, env)?,
            "opacity" => material.opacity = resolve_opacity(field, env)?,
            other => return Err(CompileError::unknown_field("material", other)),
        }
    }

    Ok(material)
}

/// `pigment: solid { colour: ... }`. Solid is the only pigment kind.
fn resolve_pigment(field: &Field, env: &Environment) -> Result<Pigment> {
    match &field.value {
        FieldValue::Tagged(tag, inner) if tag == "solid" => {
            let FieldValue::Block(body) = inner.as_ref() else {
                return Err(mismatch("pigment", field, ValueKind::Colour, inner.kind()));
            };
            let mut colour = None;
            for inner_field in &body.fields {
                match inner_field.name.as_str() {
                    "colour" => colour = Some(expect_colour("pigment", inner_field, env)?),
                    other => return Err(CompileError::unknown_field("pigment", other)),
                }
            }
            let colour = colour.ok_or_else(|| CompileError::missing_field("pigment", "colour"))?;
            Ok(Pigment::Solid(colour))
        }
        FieldValue::Tagged(tag, _) => Err(CompileError::SceneInvariant {
            reason: format!("unknown pigment kind `{tag}`"),
        }),
        FieldValue::Ident(name) => {
            Err(mismatch("material", field, ValueKind::Block, env.get(name)?.kind()))
        }
        other => Err(mismatch("material", field, ValueKind::Block, other.kind())),
    }
}

/// Resolves a `finish:` field: an inline block or an identifier bound via
/// `let f = finish { ... }`. Unset properties keep their defaults.
pub(crate) fn resolve_finish(block: &str, field: &Field, env: &Environment) -> Result<Finish> {
    match &field.value {
        FieldValue::Block(body) => {
            let mut finish = Finish::default();
            for inner in &body.fields {
                match inner.name.as_str() {
                    "reflection" => {
                        finish.reflection = expect_scalar("finish", inner, env)?;
                    }
                    "ambient" => {
                        finish.ambient = expect_scalar("finish", inner, env)?;
                    }
                    "diffuse" => {
                        finish.diffuse = expect_scalar("finish", inner, env)?;
                    }
                    "highlight" => {
                        finish.highlight_hardness =
                            expect_scalar("finish", inner, env)?;
                    }
                    other => return Err(CompileError::unknown_field("finish", other)),
                }
            }
            Ok(finish)
        }
        FieldValue::Ident(name) => match env.get(name)? {
            Value::Finish(finish) => Ok(*finish),
            other => Err(mismatch(block, field, ValueKind::Finish, other.kind())),
        },
        other => Err(mismatch(block, field, ValueKind::Finish, other.kind())),
    }
}

/// `opacity: { alpha: ..., refractive_index: ... }`.
fn resolve_opacity(field: &Field, env: &Environment) -> Result<Opacity> {
    match &field.value {
        FieldValue::Block(body) => {
            let mut opacity = Opacity::default();
            for inner in &body.fields {
                match inner.name.as_str() {
                    "alpha" => {
                        opacity.alpha = expect_scalar("opacity", inner, env)?;
                    }
                    "refractive_index" => {
                        opacity.refractive_index =
                            expect_scalar("opacity", inner, env)?;
                    }
                    other => return Err(CompileError::unknown_field("opacity", other)),
                }
            }
            Ok(opacity)
        }
        FieldValue::Ident(name) => {
            Err(mismatch("material", field, ValueKind::Block, env.get(name)?.kind()))
        }
        other => Err(mismatch("material", field, ValueKind::Block, other.kind())),
    }
}
