//! Point light resolution.

use crate::env::Environment;
use crate::errors::{CompileError, Result};
use crate::parse::ast::ObjectBlock;
use crate::resolve::{expect_colour, expect_vector};
use crate::scene::PointLight;

/// Resolves a `point_light { ... }` block. Both `location` and `colour`
/// are required.
pub(crate) fn resolve_point_light(obj: &ObjectBlock, env: &Environment) -> Result<PointLight> {
    let mut location = None;
    let mut colour = None;

    for field in &obj.block.fields {
        match field.name.as_str() {
            "location" => location = Some(expect_vector("point_light", field, env)?),
            "colour" => colour = Some(expect_colour("point_light", field, env)?),
            other => return Err(CompileError::unknown_field("point_light", other)),
        }
    }

    Ok(PointLight {
        location: location.ok_or_else(|| CompileError::missing_field("point_light", "location"))?,
        colour: colour.ok_or_else(|| CompileError::missing_field("point_light", "colour"))?,
    })
}
