//! Primitive and group resolution.
//!
//! Dispatches an object block by kind into the resolved node hierarchy.
//! `union` is accepted as an alias for `group`. A `camera` block reaching
//! this dispatch is inside a group — the scene root handles cameras — and
//! is rejected.

use crate::env::Environment;
use crate::errors::{CompileError, Result};
use crate::parse::ast::{FieldValue, ObjectBlock};
use crate::resolve::material::resolve_material;
use crate::resolve::transform::resolve_transform;
use crate::resolve::{expect_scalar, expect_vector, lights};
use crate::scene::{AxisAlignedBox, Group, Material, Plane, SceneNode, Sphere, Transform};

/// Resolves one non-camera object block into a scene node.
pub(crate) fn resolve_node(obj: &ObjectBlock, env: &Environment) -> Result<SceneNode> {
    match obj.kind.as_str() {
        "sphere" => resolve_sphere(obj, env),
        "plane" => resolve_plane(obj, env),
        "box" => resolve_box(obj, env),
        "point_light" => Ok(SceneNode::PointLight(lights::resolve_point_light(obj, env)?)),
        "group" | "union" => resolve_group(obj, env),
        "camera" => Err(CompileError::SceneInvariant {
            reason: "camera must appear at the scene root, not inside a group".to_owned(),
        }),
        other => Err(CompileError::SceneInvariant {
            reason: format!("unknown object kind `{other}`"),
        }),
    }
}

fn resolve_sphere(obj: &ObjectBlock, env: &Environment) -> Result<SceneNode> {
    let mut centre = None;
    let mut radius = None;
    let mut material = Material::default();
    let mut transform = Transform::IDENTITY;

    for field in &obj.block.fields {
        match field.name.as_str() {
            "centre" => centre = Some(expect_vector("sphere", field, env)?),
            "radius" => radius = Some(expect_scalar("sphere", field, env)?),
            "material" => material = resolve_material("sphere", field, env)?,
            "transform" => transform = resolve_transform("sphere", field, env)?,
            other => return Err(CompileError::unknown_field("sphere", other)),
        }
    }

    Ok(SceneNode::Sphere(Sphere {
        centre: centre.ok_or_else(|| CompileError::missing_field("sphere", "centre"))?,
        radius: radius.ok_or_else(|| CompileError::missing_field("sphere", "radius"))?,
        material,
        transform,
    }))
}

fn resolve_plane(obj: &ObjectBlock, env: &Environment) -> Result<SceneNode> {
    let mut normal = None;
    let mut offset = None;
    let mut material = Material::default();
    let mut transform = Transform::IDENTITY;

    for field in &obj.block.fields {
        match field.name.as_str() {
            "normal" => normal = Some(expect_vector("plane", field, env)?),
            "offset" => offset = Some(expect_scalar("plane", field, env)?),
            "material" => material = resolve_material("plane", field, env)?,
            "transform" => transform = resolve_transform("plane", field, env)?,
            other => return Err(CompileError::unknown_field("plane", other)),
        }
    }

    Ok(SceneNode::Plane(Plane {
        normal: normal.ok_or_else(|| CompileError::missing_field("plane", "normal"))?,
        offset: offset.ok_or_else(|| CompileError::missing_field("plane", "offset"))?,
        material,
        transform,
    }))
}

fn resolve_box(obj: &ObjectBlock, env: &Environment) -> Result<SceneNode> {
    let mut lower = None;
    let mut upper = None;
    let mut material = Material::default();
    let mut transform = Transform::IDENTITY;

    for field in &obj.block.fields {
        match field.name.as_str() {
            "lower" => lower = Some(expect_vector("box", field, env)?),
            "upper" => upper = Some(expect_vector("box", field, env)?),
            "material" => material = resolve_material("box", field, env)?,
            "transform" => transform = resolve_transform("box", field, env)?,
            other => return Err(CompileError::unknown_field("box", other)),
        }
    }

    Ok(SceneNode::Box(AxisAlignedBox {
        lower: lower.ok_or_else(|| CompileError::missing_field("box", "lower"))?,
        upper: upper.ok_or_else(|| CompileError::missing_field("box", "upper"))?,
        material,
        transform,
    }))
}

/// Resolves a `group { transform: ..., objects: { ... } }` block. The
/// children list may be empty or omitted entirely.
fn resolve_group(obj: &ObjectBlock, env: &Environment) -> Result<SceneNode> {
    let kind = obj.kind.as_str();
    let mut transform = Transform::IDENTITY;
    let mut children = Vec::new();

    for field in &obj.block.fields {
        match field.name.as_str() {
            "transform" => transform = resolve_transform(kind, field, env)?,
            "objects" => match &field.value {
                FieldValue::Objects(objects) => {
                    children = objects
                        .iter()
                        .map(|child| resolve_node(child, env))
                        .collect::<Result<Vec<_>>>()?;
                }
                // `objects: {}` parses as an empty block.
                FieldValue::Block(block) if block.fields.is_empty() => children = Vec::new(),
                other => {
                    let found = match other {
                        FieldValue::Ident(name) => env.get(name)?.kind(),
                        _ => other.kind(),
                    };
                    return Err(CompileError::TypeMismatch {
                        block: kind.to_owned(),
                        field: field.name.clone(),
                        expected: crate::value::ValueKind::Block,
                        found,
                    });
                }
            },
            other => return Err(CompileError::unknown_field(kind, other)),
        }
    }

    Ok(SceneNode::Group(Group {
        transform,
        children,
    }))
}
