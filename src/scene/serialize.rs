//! Scene writer.
//!
//! Emits a resolved [`Scene`] back out as plain (template-free) scene
//! text. Re-compiling the output with the same options reproduces an
//! equivalent scene, which pins the idempotence of resolution.
//!
//! World matrices are decomposed back into scale/rotate/translate records;
//! the decomposition loses any shear, but the compiler never produces
//! shear, so the round trip is faithful.

use std::fmt::Write;

use glam::{DAffine3, EulerRot};

use crate::scene::colour::Colour;
use crate::scene::material::{Material, Pigment};
use crate::scene::scene::{Primitive, Scene, Shape};

/// Writes the scene as scene-description text.
#[must_use]
pub fn serialize(scene: &Scene) -> String {
    let mut out = String::new();

    let cam = scene.camera();
    let _ = writeln!(
        out,
        "camera {{\n    location: {},\n    look_at: {},\n    sky: {},\n    field_of_view: {}\n}}\n",
        vector(cam.location.into()),
        vector(cam.look_at.into()),
        vector(cam.sky.into()),
        cam.field_of_view
    );

    for light in scene.lights() {
        let _ = writeln!(
            out,
            "point_light {{ location: {}, colour: {} }}\n",
            vector(light.location.into()),
            colour(light.colour)
        );
    }

    for primitive in scene.primitives() {
        write_primitive(&mut out, primitive);
    }

    out
}

fn write_primitive(out: &mut String, primitive: &Primitive) {
    let (kind, geometry) = match primitive.shape {
        Shape::Sphere { centre, radius } => (
            "sphere",
            format!("centre: {}, radius: {}", vector(centre.into()), radius),
        ),
        Shape::Plane { normal, offset } => (
            "plane",
            format!("normal: {}, offset: {}", vector(normal.into()), offset),
        ),
        Shape::Box { lower, upper } => (
            "box",
            format!("lower: {}, upper: {}", vector(lower.into()), vector(upper.into())),
        ),
    };

    let _ = write!(out, "{kind} {{\n    {geometry},\n    material: {}", material(&primitive.material));
    if let Some(transform) = transform_fields(primitive.world) {
        let _ = write!(out, ",\n    transform: {transform}");
    }
    let _ = writeln!(out, "\n}}\n");
}

fn transform_fields(world: DAffine3) -> Option<String> {
    if world == DAffine3::IDENTITY {
        return None;
    }
    let (scale, rotation, translation) = world.to_scale_rotation_translation();
    let (rx, ry, rz) = rotation.to_euler(EulerRot::XYZ);
    Some(format!(
        "{{ scale: {}, rotate: {}, translate: {} }}",
        vector([scale.x, scale.y, scale.z]),
        vector([rx.to_degrees(), ry.to_degrees(), rz.to_degrees()]),
        vector([translation.x, translation.y, translation.z])
    ))
}

fn material(material: &Material) -> String {
    let Pigment::Solid(c) = material.pigment;
    format!(
        "{{ pigment: solid {{ colour: {} }}, \
         finish: {{ reflection: {}, ambient: {}, diffuse: {}, highlight: {} }}, \
         opacity: {{ alpha: {}, refractive_index: {} }} }}",
        colour(c),
        material.finish.reflection,
        material.finish.ambient,
        material.finish.diffuse,
        material.finish.highlight_hardness,
        material.opacity.alpha,
        material.opacity.refractive_index
    )
}

fn colour(c: Colour) -> String {
    vector([c.r, c.g, c.b])
}

fn vector(v: [f64; 3]) -> String {
    format!("{{{}, {}, {}}}", v[0], v[1], v[2])
}
