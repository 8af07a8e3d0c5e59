//! Camera block resolution.

use crate::CompileOptions;
use crate::env::Environment;
use crate::errors::{CompileError, Result};
use crate::parse::ast::ObjectBlock;
use crate::resolve::{expect_scalar, expect_vector};
use crate::scene::Camera;
use crate::scene::camera::{DEFAULT_FOV, DEFAULT_SKY};

/// Resolves a `camera { ... }` block. `location` and `look_at` are
/// required; `sky` and `field_of_view` fall back to their defaults. The
/// vertical field of view is derived from the output aspect ratio in
/// `options`.
pub(crate) fn resolve_camera(
    obj: &ObjectBlock,
    env: &Environment,
    options: &CompileOptions,
) -> Result<Camera> {
    let mut location = None;
    let mut look_at = None;
    let mut sky = DEFAULT_SKY;
    let mut field_of_view = DEFAULT_FOV;

    for field in &obj.block.fields {
        match field.name.as_str() {
            "location" => location = Some(expect_vector("camera", field, env)?),
            "look_at" => look_at = Some(expect_vector("camera", field, env)?),
            "sky" => sky = expect_vector("camera", field, env)?,
            "field_of_view" => field_of_view = expect_scalar("camera", field, env)?,
            other => return Err(CompileError::unknown_field("camera", other)),
        }
    }

    Ok(Camera {
        location: location.ok_or_else(|| CompileError::missing_field("camera", "location"))?,
        look_at: look_at.ok_or_else(|| CompileError::missing_field("camera", "look_at"))?,
        sky,
        field_of_view,
        aspect: options.aspect(),
    })
}
